use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{
    Aggregate, AggregateRoot, DomainError, DomainResult, Money, ProductId, SessionId,
};
use stockroom_events::{Event, execute};
use stockroom_products::Product;

use crate::line::LineItem;
use crate::sale::CompletedSale;

/// Draft lifecycle. `CompleteSale` is only accepted from `Populated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftState {
    Empty,
    Populated,
}

/// Aggregate root: the draft of one sale being entered at the till.
///
/// Lines keep the order in which each product was first added, and a product
/// appears at most once. The total is never stored; see [`SaleBuilder::total`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleBuilder {
    id: SessionId,
    lines: Vec<LineItem>,
    customer_name: String,
    version: u64,
}

impl SaleBuilder {
    /// Open an empty draft for a new session.
    pub fn new() -> Self {
        Self::with_id(SessionId::new())
    }

    pub fn with_id(id: SessionId) -> Self {
        Self {
            id,
            lines: Vec::new(),
            customer_name: String::new(),
            version: 0,
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.id
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn line(&self, product_id: ProductId) -> Option<&LineItem> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn state(&self) -> DraftState {
        if self.lines.is_empty() {
            DraftState::Empty
        } else {
            DraftState::Populated
        }
    }

    /// Sum of `unit_price * quantity` over all lines, recomputed on every call.
    pub fn total(&self) -> Money {
        self.lines.iter().map(LineItem::line_total).sum()
    }

    /// Add one unit of `product`.
    ///
    /// A product already in the draft gets its quantity bumped in place.
    /// Products with zero stock are refused and the draft is left unchanged,
    /// as is an add that would push the total past what [`Money`] can hold.
    pub fn add_item(&mut self, product: &Product) -> DomainResult<()> {
        let cmd = SaleCommand::AddItem(AddItem::from_product(product, Utc::now()));
        execute(self, &cmd).map(|_| ())
    }

    /// Replace a line's quantity. Zero or negative removes the line; unknown
    /// products are ignored. Returns whether the draft changed.
    ///
    /// Quantities whose line or draft total would overflow are refused with a
    /// validation error and leave the draft unchanged.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) -> DomainResult<bool> {
        let cmd = SaleCommand::UpdateQuantity(UpdateQuantity {
            product_id,
            quantity,
            occurred_at: Utc::now(),
        });
        execute(self, &cmd).map(|events| !events.is_empty())
    }

    /// Delete a line if present. Returns whether a line was removed.
    pub fn remove_item(&mut self, product_id: ProductId) -> bool {
        let cmd = SaleCommand::RemoveItem(RemoveItem {
            product_id,
            occurred_at: Utc::now(),
        });
        self.execute_tolerant(&cmd)
    }

    pub fn set_customer(&mut self, name: impl Into<String>) {
        let cmd = SaleCommand::SetCustomer(SetCustomer {
            name: name.into(),
            occurred_at: Utc::now(),
        });
        self.execute_tolerant(&cmd);
    }

    /// Freeze the draft into a [`CompletedSale`] and reset to an empty draft
    /// under a fresh [`SessionId`].
    ///
    /// A blank `customer_name` falls back to the name set with
    /// [`SaleBuilder::set_customer`]. Refused with an invariant violation
    /// when there is nothing to complete.
    pub fn complete_sale(&mut self, customer_name: &str) -> DomainResult<CompletedSale> {
        let cmd = SaleCommand::CompleteSale(CompleteSale {
            customer_name: customer_name.to_string(),
            next_session_id: SessionId::new(),
            occurred_at: Utc::now(),
        });
        execute(self, &cmd)?
            .into_iter()
            .find_map(|ev| match ev {
                SaleEvent::SaleCompleted(e) => Some(e.sale),
                _ => None,
            })
            .ok_or_else(|| DomainError::invariant(NOTHING_TO_COMPLETE))
    }

    /// Throw the draft away without producing a sale.
    pub fn discard(&mut self) {
        let cmd = SaleCommand::Discard(DiscardDraft {
            occurred_at: Utc::now(),
        });
        self.execute_tolerant(&cmd);
    }

    // For commands whose handlers never refuse.
    fn execute_tolerant(&mut self, cmd: &SaleCommand) -> bool {
        execute(self, cmd).is_ok_and(|events| !events.is_empty())
    }

    /// Draft total with `product_id` at `quantity`, or `None` on overflow.
    fn total_with_quantity(&self, product_id: ProductId, quantity: u64) -> Option<Money> {
        self.lines.iter().try_fold(Money::ZERO, |acc, line| {
            let qty = if line.product_id == product_id {
                quantity
            } else {
                line.quantity
            };
            acc.checked_add(line.unit_price.checked_times(qty)?)
        })
    }
}

impl Default for SaleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AggregateRoot for SaleBuilder {
    type Id = SessionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

const NOTHING_TO_COMPLETE: &str = "nothing to complete: draft has no line items";

fn total_overflow(product_id: ProductId) -> DomainError {
    DomainError::validation(format!(
        "quantity for product {product_id} would overflow the sale total"
    ))
}

/// Command: AddItem.
///
/// Carries a snapshot of the catalog entry taken at command time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddItem {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Money,
    pub stock: u32,
    pub occurred_at: DateTime<Utc>,
}

impl AddItem {
    pub fn from_product(product: &Product, occurred_at: DateTime<Utc>) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.unit_price,
            stock: product.stock,
            occurred_at,
        }
    }
}

/// Command: UpdateQuantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateQuantity {
    pub product_id: ProductId,
    pub quantity: i64,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemoveItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveItem {
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: SetCustomer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetCustomer {
    pub name: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command: CompleteSale.
///
/// `next_session_id` is the id the emptied draft continues under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteSale {
    pub customer_name: String,
    pub next_session_id: SessionId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: DiscardDraft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscardDraft {
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaleCommand {
    AddItem(AddItem),
    UpdateQuantity(UpdateQuantity),
    RemoveItem(RemoveItem),
    SetCustomer(SetCustomer),
    CompleteSale(CompleteSale),
    Discard(DiscardDraft),
}

/// Event: ItemAdded (new line with quantity 1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAdded {
    pub session_id: SessionId,
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Money,
    pub occurred_at: DateTime<Utc>,
}

/// Event: QuantityIncremented (existing line, +1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityIncremented {
    pub session_id: SessionId,
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: QuantityChanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityChanged {
    pub session_id: SessionId,
    pub product_id: ProductId,
    pub quantity: u64,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRemoved {
    pub session_id: SessionId,
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: CustomerNamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerNamed {
    pub session_id: SessionId,
    pub name: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: SaleCompleted (the frozen sale, and the session that follows it).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleCompleted {
    pub sale: CompletedSale,
    pub next_session_id: SessionId,
}

/// Event: DraftDiscarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftDiscarded {
    pub session_id: SessionId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaleEvent {
    ItemAdded(ItemAdded),
    QuantityIncremented(QuantityIncremented),
    QuantityChanged(QuantityChanged),
    ItemRemoved(ItemRemoved),
    CustomerNamed(CustomerNamed),
    SaleCompleted(SaleCompleted),
    DraftDiscarded(DraftDiscarded),
}

impl Event for SaleEvent {
    fn event_type(&self) -> &'static str {
        match self {
            SaleEvent::ItemAdded(_) => "sales.draft.item_added",
            SaleEvent::QuantityIncremented(_) => "sales.draft.quantity_incremented",
            SaleEvent::QuantityChanged(_) => "sales.draft.quantity_changed",
            SaleEvent::ItemRemoved(_) => "sales.draft.item_removed",
            SaleEvent::CustomerNamed(_) => "sales.draft.customer_named",
            SaleEvent::SaleCompleted(_) => "sales.sale.completed",
            SaleEvent::DraftDiscarded(_) => "sales.draft.discarded",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            SaleEvent::ItemAdded(e) => e.occurred_at,
            SaleEvent::QuantityIncremented(e) => e.occurred_at,
            SaleEvent::QuantityChanged(e) => e.occurred_at,
            SaleEvent::ItemRemoved(e) => e.occurred_at,
            SaleEvent::CustomerNamed(e) => e.occurred_at,
            SaleEvent::SaleCompleted(e) => e.sale.occurred_at,
            SaleEvent::DraftDiscarded(e) => e.occurred_at,
        }
    }
}

impl Aggregate for SaleBuilder {
    type Command = SaleCommand;
    type Event = SaleEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            SaleEvent::ItemAdded(e) => {
                self.lines
                    .push(LineItem::new(e.product_id, e.name.clone(), e.unit_price, 1));
            }
            SaleEvent::QuantityIncremented(e) => {
                if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == e.product_id) {
                    line.quantity = line.quantity.saturating_add(1);
                }
            }
            SaleEvent::QuantityChanged(e) => {
                if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == e.product_id) {
                    line.quantity = e.quantity;
                }
            }
            SaleEvent::ItemRemoved(e) => {
                self.lines.retain(|l| l.product_id != e.product_id);
            }
            SaleEvent::CustomerNamed(e) => {
                self.customer_name = e.name.clone();
            }
            SaleEvent::SaleCompleted(e) => {
                self.lines.clear();
                self.customer_name.clear();
                self.id = e.next_session_id;
            }
            SaleEvent::DraftDiscarded(_) => {
                self.lines.clear();
                self.customer_name.clear();
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            SaleCommand::AddItem(cmd) => self.handle_add_item(cmd),
            SaleCommand::UpdateQuantity(cmd) => self.handle_update_quantity(cmd),
            SaleCommand::RemoveItem(cmd) => Ok(self.handle_remove_item(cmd)),
            SaleCommand::SetCustomer(cmd) => Ok(self.handle_set_customer(cmd)),
            SaleCommand::CompleteSale(cmd) => self.handle_complete(cmd),
            SaleCommand::Discard(cmd) => Ok(self.handle_discard(cmd)),
        }
    }
}

impl SaleBuilder {
    fn handle_add_item(&self, cmd: &AddItem) -> Result<Vec<SaleEvent>, DomainError> {
        if cmd.stock == 0 {
            return Err(DomainError::validation(format!(
                "product {} ({}) is out of stock",
                cmd.product_id, cmd.name
            )));
        }

        let fits = match self.line(cmd.product_id) {
            Some(line) => line
                .quantity
                .checked_add(1)
                .and_then(|qty| self.total_with_quantity(cmd.product_id, qty)),
            None => self.total().checked_add(cmd.unit_price),
        };
        if fits.is_none() {
            return Err(total_overflow(cmd.product_id));
        }

        let event = if self.line(cmd.product_id).is_some() {
            SaleEvent::QuantityIncremented(QuantityIncremented {
                session_id: self.id,
                product_id: cmd.product_id,
                occurred_at: cmd.occurred_at,
            })
        } else {
            SaleEvent::ItemAdded(ItemAdded {
                session_id: self.id,
                product_id: cmd.product_id,
                name: cmd.name.clone(),
                unit_price: cmd.unit_price,
                occurred_at: cmd.occurred_at,
            })
        };
        Ok(vec![event])
    }

    fn handle_update_quantity(&self, cmd: &UpdateQuantity) -> Result<Vec<SaleEvent>, DomainError> {
        if self.line(cmd.product_id).is_none() {
            return Ok(Vec::new());
        }

        // Non-positive quantities delete the line rather than clamping it.
        let event = match u64::try_from(cmd.quantity) {
            Ok(quantity) if quantity > 0 => {
                if self.total_with_quantity(cmd.product_id, quantity).is_none() {
                    return Err(total_overflow(cmd.product_id));
                }
                SaleEvent::QuantityChanged(QuantityChanged {
                    session_id: self.id,
                    product_id: cmd.product_id,
                    quantity,
                    occurred_at: cmd.occurred_at,
                })
            }
            _ => SaleEvent::ItemRemoved(ItemRemoved {
                session_id: self.id,
                product_id: cmd.product_id,
                occurred_at: cmd.occurred_at,
            }),
        };
        Ok(vec![event])
    }

    fn handle_remove_item(&self, cmd: &RemoveItem) -> Vec<SaleEvent> {
        if self.line(cmd.product_id).is_none() {
            return Vec::new();
        }
        vec![SaleEvent::ItemRemoved(ItemRemoved {
            session_id: self.id,
            product_id: cmd.product_id,
            occurred_at: cmd.occurred_at,
        })]
    }

    fn handle_set_customer(&self, cmd: &SetCustomer) -> Vec<SaleEvent> {
        let name = cmd.name.trim();
        if name == self.customer_name {
            return Vec::new();
        }
        vec![SaleEvent::CustomerNamed(CustomerNamed {
            session_id: self.id,
            name: name.to_string(),
            occurred_at: cmd.occurred_at,
        })]
    }

    fn handle_complete(&self, cmd: &CompleteSale) -> Result<Vec<SaleEvent>, DomainError> {
        if self.lines.is_empty() {
            return Err(DomainError::invariant(NOTHING_TO_COMPLETE));
        }

        let customer_name = match cmd.customer_name.trim() {
            "" => self.customer_name.clone(),
            given => given.to_string(),
        };

        Ok(vec![SaleEvent::SaleCompleted(SaleCompleted {
            sale: CompletedSale {
                session_id: self.id,
                customer_name,
                lines: self.lines.clone(),
                total: self.total(),
                occurred_at: cmd.occurred_at,
            },
            next_session_id: cmd.next_session_id,
        })])
    }

    fn handle_discard(&self, cmd: &DiscardDraft) -> Vec<SaleEvent> {
        if self.lines.is_empty() && self.customer_name.is_empty() {
            return Vec::new();
        }
        vec![SaleEvent::DraftDiscarded(DraftDiscarded {
            session_id: self.id,
            occurred_at: cmd.occurred_at,
        })]
    }
}
