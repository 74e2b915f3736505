//! Command-line / environment configuration.

use clap::Parser;

use stockroom_core::{Currency, DomainError};
use stockroom_sales::{DEFAULT_RECEIPT_PREFIX, InMemorySalesLedger, PaymentMethod, demo_history};

/// Terminal till for the stockroom inventory.
#[derive(Debug, Clone, Parser)]
#[command(name = "stockroom-pos", version)]
pub struct Config {
    /// Display currency (INR, USD, EUR, GBP).
    #[arg(long, env = "STOCKROOM_CURRENCY", default_value = "INR", value_parser = parse_currency)]
    pub currency: Currency,

    /// Payment method stamped on new sales (cash, card, upi).
    #[arg(long, env = "STOCKROOM_PAYMENT_METHOD", default_value = "cash")]
    pub payment_method: PaymentMethod,

    /// Prefix for generated receipt numbers.
    #[arg(long, env = "STOCKROOM_RECEIPT_PREFIX", default_value = DEFAULT_RECEIPT_PREFIX)]
    pub receipt_prefix: String,

    /// Start with an empty sales ledger instead of the demo receipts.
    #[arg(long)]
    pub no_demo_history: bool,
}

impl Config {
    pub fn ledger(&self) -> InMemorySalesLedger {
        let ledger = InMemorySalesLedger::new(self.receipt_prefix.clone(), self.payment_method);
        if self.no_demo_history {
            ledger
        } else {
            ledger.with_history(demo_history())
        }
    }
}

fn parse_currency(code: &str) -> Result<Currency, DomainError> {
    Currency::from_code(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_sales::SalesLedger;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["stockroom-pos"]).unwrap();
        assert_eq!(config.currency, Currency::INR);
        assert_eq!(config.payment_method, PaymentMethod::Cash);
        assert_eq!(config.receipt_prefix, "RCP-");
        assert!(!config.no_demo_history);
        assert_eq!(config.ledger().sales().len(), 2);
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "stockroom-pos",
            "--currency",
            "usd",
            "--payment-method",
            "UPI",
            "--receipt-prefix",
            "INV-",
            "--no-demo-history",
        ])
        .unwrap();

        assert_eq!(config.currency, Currency::USD);
        assert_eq!(config.payment_method, PaymentMethod::Upi);
        let ledger = config.ledger();
        assert!(ledger.sales().is_empty());
        assert_eq!(ledger.receipt_prefix(), "INV-");
    }

    #[test]
    fn unknown_currency_is_rejected() {
        assert!(Config::try_parse_from(["stockroom-pos", "--currency", "XYZ"]).is_err());
    }
}
