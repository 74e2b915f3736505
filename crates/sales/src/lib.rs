//! Sales domain module: building, completing and filing till sales.
//!
//! [`SaleBuilder`] is the deterministic core (no IO); [`SaleSession`] wires
//! it to a catalog, a ledger and a notification sink.

pub mod draft;
pub mod ledger;
pub mod line;
pub mod receipt;
pub mod sale;
pub mod session;

pub use draft::{
    AddItem, CompleteSale, CustomerNamed, DiscardDraft, DraftDiscarded, DraftState, ItemAdded,
    ItemRemoved, QuantityChanged, QuantityIncremented, RemoveItem, SaleBuilder, SaleCommand,
    SaleCompleted, SaleEvent, SetCustomer, UpdateQuantity,
};
pub use ledger::{
    DEFAULT_RECEIPT_PREFIX, InMemoryLedgerError, InMemorySalesLedger, SalesLedger, SalesSummary,
    demo_history,
};
pub use line::LineItem;
pub use receipt::render_receipt;
pub use sale::{CompletedSale, FinalizedSale, PaymentMethod, WALK_IN_CUSTOMER};
pub use session::{SALE_COMPLETED_TITLE, SaleSession, SessionError};
