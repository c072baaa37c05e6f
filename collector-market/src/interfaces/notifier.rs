use std::time::Duration;

/// How long a transient notification stays visible before auto-dismissing.
pub const NOTIFICATION_TTL: Duration = Duration::from_millis(3200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyVariant {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub variant: NotifyVariant,
    pub ttl: Duration,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            variant: NotifyVariant::Success,
            ttl: NOTIFICATION_TTL,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            variant: NotifyVariant::Error,
            ttl: NOTIFICATION_TTL,
        }
    }
}

/// Sink for the transient notifications every terminal action transition
/// emits, independent of the action record's own lifecycle.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Default sink forwarding notifications to the tracing log.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.variant {
            NotifyVariant::Success => {
                tracing::info!(message = %notification.message, "notification")
            }
            NotifyVariant::Error => {
                tracing::warn!(message = %notification.message, "notification")
            }
        }
    }
}
