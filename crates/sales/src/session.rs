//! One sale-entry session: a draft wired to its collaborators.
//!
//! The session looks products up in the catalog, files completed sales in
//! the ledger and reports the outcome to a notification sink. Dropping the
//! session (or calling [`SaleSession::cancel`]) throws the draft away without
//! touching the catalog or the ledger.

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info, warn};

use stockroom_core::{Aggregate, Currency, DomainError, Money, ProductId, SessionId};
use stockroom_events::{Notification, NotificationSink};
use stockroom_products::Catalog;

use crate::draft::{CompleteSale, SaleBuilder, SaleCommand, SaleEvent};
use crate::ledger::SalesLedger;
use crate::sale::FinalizedSale;

pub const SALE_COMPLETED_TITLE: &str = "Sale Completed";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("unknown product {0}")]
    UnknownProduct(ProductId),

    #[error("sales ledger rejected the sale: {0}")]
    Ledger(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// A draft plus borrowed catalog, ledger and notification sink.
#[derive(Debug)]
pub struct SaleSession<'a, C, L, N> {
    builder: SaleBuilder,
    catalog: &'a C,
    ledger: &'a L,
    sink: &'a N,
    currency: Currency,
}

impl<'a, C, L, N> SaleSession<'a, C, L, N>
where
    C: Catalog,
    L: SalesLedger,
    N: NotificationSink,
{
    pub fn open(catalog: &'a C, ledger: &'a L, sink: &'a N) -> Self {
        let builder = SaleBuilder::new();
        info!(session_id = %builder.session_id(), "sale session opened");
        Self {
            builder,
            catalog,
            ledger,
            sink,
            currency: Currency::default(),
        }
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn id(&self) -> SessionId {
        self.builder.session_id()
    }

    pub fn draft(&self) -> &SaleBuilder {
        &self.builder
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn add_product(&mut self, product_id: ProductId) -> Result<(), SessionError> {
        let product = self
            .catalog
            .get(product_id)
            .ok_or(SessionError::UnknownProduct(product_id))?;

        if let Err(err) = self.builder.add_item(product) {
            info!(session_id = %self.id(), %product_id, error = %err, "add refused");
            return Err(err.into());
        }
        debug!(session_id = %self.id(), %product_id, "item added");
        Ok(())
    }

    /// Returns whether the draft changed.
    pub fn update_quantity(
        &mut self,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<bool, SessionError> {
        let changed = match self.builder.update_quantity(product_id, quantity) {
            Ok(changed) => changed,
            Err(err) => {
                info!(
                    session_id = %self.id(),
                    %product_id,
                    quantity,
                    error = %err,
                    "update refused"
                );
                return Err(err.into());
            }
        };

        // Quantities above stock are accepted as backorders.
        if let Some(line) = self.builder.line(product_id) {
            let stock = self.catalog.get(product_id).map(|p| u64::from(p.stock));
            if let Some(stock) = stock.filter(|&stock| line.quantity > stock) {
                warn!(
                    session_id = %self.id(),
                    %product_id,
                    quantity = line.quantity,
                    stock,
                    "quantity exceeds available stock"
                );
            }
        }

        debug!(session_id = %self.id(), %product_id, quantity, changed, "quantity updated");
        Ok(changed)
    }

    /// Returns whether a line was removed.
    pub fn remove_product(&mut self, product_id: ProductId) -> bool {
        let removed = self.builder.remove_item(product_id);
        debug!(session_id = %self.id(), %product_id, removed, "item removed");
        removed
    }

    pub fn set_customer(&mut self, name: impl Into<String>) {
        self.builder.set_customer(name);
    }

    pub fn total(&self) -> Money {
        self.builder.total()
    }

    /// Total with currency symbol, e.g. `₹344.00`.
    pub fn formatted_total(&self) -> String {
        self.total().format(&self.currency)
    }

    /// Complete the sale under the draft's customer name.
    ///
    /// The ledger is written before the draft is reset, so a ledger failure
    /// leaves the draft intact for another attempt. On success the draft is
    /// emptied and continues under a new [`SessionId`]. A failed notification
    /// is logged and does not undo the sale.
    pub fn complete(&mut self) -> Result<FinalizedSale, SessionError> {
        let session_id = self.id();
        let cmd = SaleCommand::CompleteSale(CompleteSale {
            customer_name: String::new(),
            next_session_id: SessionId::new(),
            occurred_at: Utc::now(),
        });

        let events = match self.builder.handle(&cmd) {
            Ok(events) => events,
            Err(err) => {
                info!(%session_id, error = %err, "completion refused");
                return Err(err.into());
            }
        };

        let mut finalized = None;
        for event in &events {
            if let SaleEvent::SaleCompleted(e) = event {
                let filed = self
                    .ledger
                    .record(e.sale.clone())
                    .map_err(|e| SessionError::Ledger(Box::new(e)))?;
                finalized = Some(filed);
            }
        }
        for event in &events {
            self.builder.apply(event);
        }

        let finalized =
            finalized.ok_or_else(|| DomainError::invariant("completion produced no sale"))?;

        let amount = finalized.total.format(&self.currency);
        info!(
            %session_id,
            next_session_id = %self.id(),
            receipt_no = %finalized.receipt_no,
            total = %amount,
            lines = finalized.lines.len(),
            "sale completed"
        );

        let notification = Notification::new(
            SALE_COMPLETED_TITLE,
            format!("Sale of {amount} completed successfully!"),
        );
        if let Err(err) = self.sink.notify(notification) {
            warn!(%session_id, error = ?err, "failed to deliver sale notification");
        }

        Ok(finalized)
    }

    /// Abandon the draft. Nothing outside the session is touched.
    pub fn cancel(mut self) {
        let lines = self.builder.lines().len();
        self.builder.discard();
        info!(session_id = %self.id(), lines, "sale session cancelled");
    }
}
