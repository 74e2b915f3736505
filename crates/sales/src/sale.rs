use core::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, Money, SessionId};

use crate::line::LineItem;

/// Label shown for sales recorded without a customer name.
pub const WALK_IN_CUSTOMER: &str = "Walk-in Customer";

/// A draft frozen at completion time, before the ledger files it.
///
/// Receipt number and payment method are not known yet; the ledger assigns
/// them when it turns this into a [`FinalizedSale`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedSale {
    pub session_id: SessionId,
    /// Possibly empty (walk-in).
    pub customer_name: String,
    pub lines: Vec<LineItem>,
    pub total: Money,
    pub occurred_at: DateTime<Utc>,
}

/// How the customer paid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Upi,
}

impl core::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
            PaymentMethod::Upi => "UPI",
        })
    }
}

impl FromStr for PaymentMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "card" => Ok(PaymentMethod::Card),
            "upi" => Ok(PaymentMethod::Upi),
            other => Err(DomainError::validation(format!(
                "unknown payment method: {other}"
            ))),
        }
    }
}

/// A sale as filed in the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizedSale {
    pub receipt_no: String,
    pub date: NaiveDate,
    pub customer_name: String,
    pub lines: Vec<LineItem>,
    pub total: Money,
    pub payment_method: PaymentMethod,
    /// Absent for sales imported from history.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<SessionId>,
}

impl FinalizedSale {
    pub fn from_completed(
        sale: CompletedSale,
        receipt_no: impl Into<String>,
        payment_method: PaymentMethod,
    ) -> Self {
        Self {
            receipt_no: receipt_no.into(),
            date: sale.occurred_at.date_naive(),
            customer_name: sale.customer_name,
            lines: sale.lines,
            total: sale.total,
            payment_method,
            session_id: Some(sale.session_id),
        }
    }

    /// Customer name for display; blank names read as a walk-in.
    pub fn customer_label(&self) -> &str {
        match self.customer_name.trim() {
            "" => WALK_IN_CUSTOMER,
            name => name,
        }
    }

    /// Number of units sold across all lines.
    pub fn unit_count(&self) -> u64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::ProductId;

    fn completed(customer: &str) -> CompletedSale {
        CompletedSale {
            session_id: SessionId::new(),
            customer_name: customer.to_string(),
            lines: vec![
                LineItem::new(ProductId::new(1), "Paracetamol 500mg", Money::from_major(24), 2),
                LineItem::new(ProductId::new(2), "Vitamin C", Money::from_major(45), 1),
            ],
            total: Money::from_major(93),
            occurred_at: "2024-01-20T10:30:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn from_completed_keeps_payload_and_stamps_date() {
        let sale = completed("John Doe");
        let session_id = sale.session_id;
        let finalized = FinalizedSale::from_completed(sale, "RCP-001", PaymentMethod::Cash);

        assert_eq!(finalized.receipt_no, "RCP-001");
        assert_eq!(finalized.date, NaiveDate::from_ymd_opt(2024, 1, 20).unwrap());
        assert_eq!(finalized.total, Money::from_major(93));
        assert_eq!(finalized.session_id, Some(session_id));
        assert_eq!(finalized.unit_count(), 3);
        assert_eq!(finalized.customer_label(), "John Doe");
    }

    #[test]
    fn blank_customer_is_a_walk_in() {
        let finalized =
            FinalizedSale::from_completed(completed("  "), "RCP-002", PaymentMethod::Upi);
        assert_eq!(finalized.customer_label(), WALK_IN_CUSTOMER);
    }

    #[test]
    fn payment_method_parse_and_display() {
        assert_eq!("UPI".parse::<PaymentMethod>().unwrap(), PaymentMethod::Upi);
        assert_eq!(" card ".parse::<PaymentMethod>().unwrap(), PaymentMethod::Card);
        assert_eq!(PaymentMethod::Upi.to_string(), "UPI");
        assert_eq!(PaymentMethod::default(), PaymentMethod::Cash);
        assert!(matches!(
            "cheque".parse::<PaymentMethod>(),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn serializes_to_json_for_export() {
        let finalized =
            FinalizedSale::from_completed(completed(""), "RCP-003", PaymentMethod::Card);
        let json = serde_json::to_value(&finalized).unwrap();

        assert_eq!(json["receipt_no"], "RCP-003");
        assert_eq!(json["date"], "2024-01-20");
        assert_eq!(json["total"], 9_300);
        assert_eq!(json["payment_method"], "card");
        assert_eq!(json["lines"][0]["quantity"], 2);
    }
}
