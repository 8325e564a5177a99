//! Topic broadcast port.

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::notification::domain::PushPayload;

/// Result type for push-messaging operations.
pub type PushResult<T> = Result<T, PushError>;

/// Identifier the push service assigns to an accepted broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeliveryReceipt(String);

impl DeliveryReceipt {
    /// Wraps a service-assigned message identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeliveryReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Push-messaging contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PushMessenger: Send + Sync {
    /// Broadcasts `payload` to every device subscribed to `payload.topic`.
    ///
    /// # Errors
    ///
    /// Returns [`PushError`] when the push service rejects or fails the
    /// broadcast.
    async fn send_to_topic(&self, payload: &PushPayload) -> PushResult<DeliveryReceipt>;
}

/// Errors returned by push-messaging implementations.
#[derive(Debug, Clone, Error)]
pub enum PushError {
    /// The payload was refused by the push service.
    #[error("push payload rejected: {0}")]
    Rejected(String),

    /// The push service could not be reached or failed.
    #[error("push delivery failed: {0}")]
    Delivery(Arc<dyn std::error::Error + Send + Sync>),
}

impl PushError {
    /// Wraps a transport or service error.
    pub fn delivery(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Delivery(Arc::new(err))
    }
}
