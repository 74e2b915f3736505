//! Notification delivery abstraction.
//!
//! A notification is a short, human-readable confirmation ("Sale Completed")
//! aimed at whoever operates the till. Delivery is fire-and-forget from the
//! domain's point of view: a failed notification never undoes the operation
//! that produced it.

use std::sync::Arc;

/// A title plus a one-line message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

impl core::fmt::Display for Notification {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

/// Receives notifications (console, toast queue, in-memory recorder...).
///
/// Implementations must be `Send + Sync` so a single sink can be shared by
/// several sessions.
pub trait NotificationSink: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn notify(&self, notification: Notification) -> Result<(), Self::Error>;
}

impl<S> NotificationSink for Arc<S>
where
    S: NotificationSink + ?Sized,
{
    type Error = S::Error;

    fn notify(&self, notification: Notification) -> Result<(), Self::Error> {
        (**self).notify(notification)
    }
}
