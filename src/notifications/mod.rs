//! Notifications
//!
//! Ephemeral in-app messages stacked per screen corner, the cancellable
//! timers that expire them, and the pantry alert scheduler that feeds them.

mod scheduler;
mod stack;
mod timers;
mod types;

pub use scheduler::{check_alerts, record_metrics, AlertKind, AlertMessage, MetricsEntry};
pub use stack::{NotificationStack, StackEvent};
pub use timers::TimerQueue;
pub use types::{Notification, NotificationId, NotificationKind, NotificationRequest, Phase, Position};
