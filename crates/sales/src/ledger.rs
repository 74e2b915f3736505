//! Sales ledger: where completed sales are filed.
//!
//! The ledger is append-only from the till's point of view. It owns receipt
//! numbering and the payment method stamped on each sale; the draft never
//! reads it back.

use std::sync::Mutex;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockroom_core::{Money, ProductId};

use crate::line::LineItem;
use crate::sale::{CompletedSale, FinalizedSale, PaymentMethod};

/// Default receipt number prefix (`RCP-001`, `RCP-002`, ...).
pub const DEFAULT_RECEIPT_PREFIX: &str = "RCP-";

/// Append-only store of finalized sales.
pub trait SalesLedger {
    type Error: std::error::Error + Send + Sync + 'static;

    /// File a completed sale, assigning its receipt number and payment method.
    fn record(&self, sale: CompletedSale) -> Result<FinalizedSale, Self::Error>;

    /// All filed sales, oldest first.
    fn sales(&self) -> Vec<FinalizedSale>;

    fn find(&self, receipt_no: &str) -> Option<FinalizedSale> {
        self.sales()
            .into_iter()
            .find(|s| s.receipt_no.eq_ignore_ascii_case(receipt_no.trim()))
    }

    fn summary(&self) -> SalesSummary {
        SalesSummary::from_sales(&self.sales())
    }

    /// Summary restricted to sales dated `date`.
    fn summary_on(&self, date: NaiveDate) -> SalesSummary {
        let sales: Vec<_> = self.sales().into_iter().filter(|s| s.date == date).collect();
        SalesSummary::from_sales(&sales)
    }
}

/// Headline figures over a set of sales.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesSummary {
    pub order_count: usize,
    pub revenue: Money,
    /// `revenue / order_count`, rounded down to the minor unit; zero without orders.
    pub average_order_value: Money,
}

impl SalesSummary {
    pub fn from_sales(sales: &[FinalizedSale]) -> Self {
        let revenue: Money = sales.iter().map(|s| s.total).sum();
        let order_count = sales.len();
        Self {
            order_count,
            revenue,
            average_order_value: revenue.div_floor(order_count as u64),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InMemoryLedgerError {
    /// Recording failed due to internal lock poisoning.
    #[error("sales ledger lock poisoned")]
    Poisoned,
}

#[derive(Debug, Default)]
struct LedgerState {
    sales: Vec<FinalizedSale>,
    next_seq: u32,
}

/// In-memory ledger for tests/dev and the terminal till.
#[derive(Debug)]
pub struct InMemorySalesLedger {
    state: Mutex<LedgerState>,
    receipt_prefix: String,
    payment_method: PaymentMethod,
}

impl InMemorySalesLedger {
    pub fn new(receipt_prefix: impl Into<String>, payment_method: PaymentMethod) -> Self {
        Self {
            state: Mutex::new(LedgerState {
                sales: Vec::new(),
                next_seq: 1,
            }),
            receipt_prefix: receipt_prefix.into(),
            payment_method,
        }
    }

    /// Seed prior sales. Numbering continues after the highest sequence found
    /// under this ledger's prefix (or after the history length if none parse).
    pub fn with_history(self, history: Vec<FinalizedSale>) -> Self {
        let highest = history
            .iter()
            .filter_map(|s| s.receipt_no.strip_prefix(self.receipt_prefix.as_str()))
            .filter_map(|seq| seq.parse::<u32>().ok())
            .max()
            .unwrap_or(0);
        let next_seq = highest.max(history.len() as u32).saturating_add(1);

        Self {
            state: Mutex::new(LedgerState {
                sales: history,
                next_seq,
            }),
            ..self
        }
    }

    /// Ledger pre-filled with the two demo receipts.
    pub fn demo() -> Self {
        Self::default().with_history(demo_history())
    }

    pub fn receipt_prefix(&self) -> &str {
        &self.receipt_prefix
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }
}

impl Default for InMemorySalesLedger {
    fn default() -> Self {
        Self::new(DEFAULT_RECEIPT_PREFIX, PaymentMethod::default())
    }
}

impl SalesLedger for InMemorySalesLedger {
    type Error = InMemoryLedgerError;

    fn record(&self, sale: CompletedSale) -> Result<FinalizedSale, Self::Error> {
        let mut state = self.state.lock().map_err(|_| InMemoryLedgerError::Poisoned)?;

        let receipt_no = format!("{}{:03}", self.receipt_prefix, state.next_seq);
        state.next_seq = state.next_seq.saturating_add(1);

        let finalized = FinalizedSale::from_completed(sale, receipt_no, self.payment_method);
        state.sales.push(finalized.clone());
        Ok(finalized)
    }

    fn sales(&self) -> Vec<FinalizedSale> {
        self.state
            .lock()
            .map(|state| state.sales.clone())
            .unwrap_or_default()
    }
}

/// The two receipts the demo till starts with.
pub fn demo_history() -> Vec<FinalizedSale> {
    let date = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap_or_default();
    vec![
        FinalizedSale {
            receipt_no: "RCP-001".into(),
            date,
            customer_name: "John Doe".into(),
            lines: vec![
                LineItem::new(ProductId::new(1), "Paracetamol 500mg", Money::from_major(24), 2),
                LineItem::new(ProductId::new(2), "Vitamin C", Money::from_major(45), 1),
            ],
            total: Money::from_major(93),
            payment_method: PaymentMethod::Cash,
            session_id: None,
        },
        FinalizedSale {
            receipt_no: "RCP-002".into(),
            date,
            customer_name: String::new(),
            lines: vec![LineItem::new(
                ProductId::new(3),
                "Digital Thermometer",
                Money::from_major(320),
                1,
            )],
            total: Money::from_major(320),
            payment_method: PaymentMethod::Upi,
            session_id: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use stockroom_core::SessionId;

    fn completed(total_major: u64) -> CompletedSale {
        CompletedSale {
            session_id: SessionId::new(),
            customer_name: String::new(),
            lines: vec![LineItem::new(
                ProductId::new(9),
                "Test item",
                Money::from_major(total_major),
                1,
            )],
            total: Money::from_major(total_major),
            occurred_at: Utc::now(),
        }
    }

    #[test]
    fn receipt_numbers_are_sequential_and_zero_padded() {
        let ledger = InMemorySalesLedger::default();

        let first = ledger.record(completed(10)).unwrap();
        let second = ledger.record(completed(20)).unwrap();

        assert_eq!(first.receipt_no, "RCP-001");
        assert_eq!(second.receipt_no, "RCP-002");
        assert_eq!(ledger.sales().len(), 2);
    }

    #[test]
    fn numbering_continues_after_history() {
        let ledger = InMemorySalesLedger::demo();
        assert_eq!(ledger.sales().len(), 2);

        let next = ledger.record(completed(10)).unwrap();
        assert_eq!(next.receipt_no, "RCP-003");
    }

    #[test]
    fn custom_prefix_and_payment_method_are_applied() {
        let ledger = InMemorySalesLedger::new("INV-", PaymentMethod::Card);
        let sale = ledger.record(completed(5)).unwrap();

        assert_eq!(sale.receipt_no, "INV-001");
        assert_eq!(sale.payment_method, PaymentMethod::Card);
    }

    #[test]
    fn find_is_case_insensitive() {
        let ledger = InMemorySalesLedger::demo();
        let sale = ledger.find("rcp-002").unwrap();
        assert_eq!(sale.total, Money::from_major(320));
        assert!(ledger.find("RCP-999").is_none());
    }

    #[test]
    fn summary_over_demo_history() {
        let ledger = InMemorySalesLedger::demo();
        let summary = ledger.summary();

        assert_eq!(summary.order_count, 2);
        assert_eq!(summary.revenue, Money::from_major(413));
        assert_eq!(summary.average_order_value, Money::from_minor(20_650));
    }

    #[test]
    fn summary_on_filters_by_date() {
        let ledger = InMemorySalesLedger::demo();
        let today = ledger.record(completed(100)).unwrap().date;

        let summary = ledger.summary_on(today);
        assert_eq!(summary.order_count, 1);
        assert_eq!(summary.revenue, Money::from_major(100));
    }

    #[test]
    fn empty_summary_is_all_zero() {
        let ledger = InMemorySalesLedger::default();
        assert_eq!(ledger.summary(), SalesSummary::default());
    }
}
