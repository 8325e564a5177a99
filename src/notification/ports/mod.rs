//! Collaborator ports for the notification context.

pub mod messenger;

pub use messenger::{DeliveryReceipt, PushError, PushMessenger, PushResult};

#[cfg(test)]
pub use messenger::MockPushMessenger;
