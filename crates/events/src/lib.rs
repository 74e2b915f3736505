//! Domain events and the notification side channel.
//!
//! - [`Event`]: facts emitted by aggregates
//! - [`execute`]: decide-then-apply helper for aggregates
//! - [`NotificationSink`]: where human-readable confirmations go

pub mod event;
pub mod handler;
pub mod recording_sink;
pub mod sink;

pub use event::Event;
pub use handler::execute;
pub use recording_sink::{RecordingSink, RecordingSinkError};
pub use sink::{Notification, NotificationSink};
