use chrono::{DateTime, Utc};

/// Something that happened to a sale draft: an item added, a quantity
/// changed, the sale completed.
///
/// Once emitted an event is not edited. A draft's state is the result of
/// applying its events in order.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Dotted name such as `sales.draft.item_added`.
    fn event_type(&self) -> &'static str;

    /// Bumped when the payload shape of this event type changes.
    fn version(&self) -> u32;

    /// Till clock time at which the command was issued.
    fn occurred_at(&self) -> DateTime<Utc>;
}
