//! Notification bounded context: push payloads built from chat events and
//! broadcast to per-conversation topics.
//!
//! Delivery is best-effort. The dispatcher returns typed results so callers
//! can observe failures; trigger adapters log and discard them.
//!
//! # Examples
//!
//! ```
//! use flexchat::chat::domain::Message;
//! use flexchat::notification::domain::{NotificationType, PushPayload};
//!
//! let message = Message {
//!     conversation_id: "c1".into(),
//!     user_id: "u1".into(),
//!     sender_name: "Alice".to_owned(),
//!     message_body: "hi".to_owned(),
//!     ..Message::empty()
//! };
//! let payload = PushPayload::for_message(&message);
//!
//! assert_eq!(payload.topic, "c1");
//! assert_eq!(payload.notification.title, "Alice");
//! assert_eq!(payload.data.notification_type(), NotificationType::Message);
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
