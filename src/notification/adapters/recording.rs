//! In-memory push messenger that records every broadcast.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::notification::{
    domain::PushPayload,
    ports::{DeliveryReceipt, PushError, PushMessenger, PushResult},
};

#[derive(Debug, Default)]
struct Outbox {
    sent: Vec<PushPayload>,
    failure: Option<String>,
}

/// Thread-safe push messenger that keeps sent payloads in memory.
///
/// Receipts are `projects/{project}/messages/{n}` with `n` counting from 1.
/// A messenger created with [`RecordingPushMessenger::failing`] rejects
/// every broadcast and records nothing.
#[derive(Debug, Clone)]
pub struct RecordingPushMessenger {
    project_id: String,
    outbox: Arc<RwLock<Outbox>>,
}

impl RecordingPushMessenger {
    /// Creates a messenger that accepts every broadcast.
    #[must_use]
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            outbox: Arc::new(RwLock::new(Outbox::default())),
        }
    }

    /// Creates a messenger whose broadcasts fail with `reason`.
    #[must_use]
    pub fn failing(project_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            outbox: Arc::new(RwLock::new(Outbox {
                sent: Vec::new(),
                failure: Some(reason.into()),
            })),
        }
    }

    /// Returns the payloads sent so far, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`PushError::Delivery`] when the lock is poisoned.
    pub fn sent(&self) -> PushResult<Vec<PushPayload>> {
        let outbox = self
            .outbox
            .read()
            .map_err(|err| PushError::delivery(std::io::Error::other(err.to_string())))?;
        Ok(outbox.sent.clone())
    }
}

#[async_trait]
impl PushMessenger for RecordingPushMessenger {
    async fn send_to_topic(&self, payload: &PushPayload) -> PushResult<DeliveryReceipt> {
        let mut outbox = self
            .outbox
            .write()
            .map_err(|err| PushError::delivery(std::io::Error::other(err.to_string())))?;
        if let Some(reason) = &outbox.failure {
            return Err(PushError::delivery(std::io::Error::other(reason.clone())));
        }
        outbox.sent.push(payload.clone());
        Ok(DeliveryReceipt::new(format!(
            "projects/{}/messages/{}",
            self.project_id,
            outbox.sent.len()
        )))
    }
}
