//! Notification sink that prints to the terminal.

use std::io::Write;

use stockroom_events::{Notification, NotificationSink};

/// Prints each notification as `[title] message` on stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl NotificationSink for ConsoleSink {
    type Error = std::io::Error;

    fn notify(&self, notification: Notification) -> Result<(), Self::Error> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "[{}] {}", notification.title, notification.message)?;
        out.flush()
    }
}
