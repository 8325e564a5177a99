//! Push payload records and the events that trigger them.

mod call;
mod payload;

pub use call::CallStarted;
pub use payload::{NotificationData, NotificationType, PushNotification, PushPayload};
