//! In-memory notification sink for tests/dev.

use std::sync::Mutex;

use thiserror::Error;

use crate::sink::{Notification, NotificationSink};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordingSinkError {
    /// Recording failed due to internal lock poisoning.
    #[error("notification log lock poisoned")]
    Poisoned,
}

/// Keeps every notification it receives, in arrival order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    received: Mutex<Vec<Notification>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything received so far.
    pub fn received(&self) -> Vec<Notification> {
        self.received
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<Notification> {
        self.received
            .lock()
            .ok()
            .and_then(|log| log.last().cloned())
    }
}

impl NotificationSink for RecordingSink {
    type Error = RecordingSinkError;

    fn notify(&self, notification: Notification) -> Result<(), Self::Error> {
        let mut log = self
            .received
            .lock()
            .map_err(|_| RecordingSinkError::Poisoned)?;
        log.push(notification);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn records_in_arrival_order() {
        let sink = RecordingSink::new();
        sink.notify(Notification::new("A", "first")).unwrap();
        sink.notify(Notification::new("B", "second")).unwrap();

        let received = sink.received();
        assert_eq!(received.len(), 2);
        assert_eq!(received[0].title, "A");
        assert_eq!(sink.last().unwrap().message, "second");
    }

    #[test]
    fn shared_through_arc() {
        let sink = Arc::new(RecordingSink::new());
        let handle = Arc::clone(&sink);
        handle.notify(Notification::new("Sale Completed", "ok")).unwrap();
        assert_eq!(sink.received().len(), 1);
    }

    #[test]
    fn display_joins_title_and_message() {
        let n = Notification::new("Sale Completed", "Sale of ₹48.00 completed successfully!");
        assert_eq!(
            n.to_string(),
            "Sale Completed: Sale of ₹48.00 completed successfully!"
        );
    }
}
