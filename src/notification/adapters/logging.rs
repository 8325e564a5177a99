//! Dry-run push messenger that logs payloads instead of sending them.

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::notification::{
    domain::PushPayload,
    ports::{DeliveryReceipt, PushError, PushMessenger, PushResult},
};

/// Push messenger that renders each payload as JSON into the log.
#[derive(Debug, Clone)]
pub struct LoggingPushMessenger {
    project_id: String,
}

impl LoggingPushMessenger {
    /// Creates a dry-run messenger for `project_id`.
    #[must_use]
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
        }
    }
}

#[async_trait]
impl PushMessenger for LoggingPushMessenger {
    async fn send_to_topic(&self, payload: &PushPayload) -> PushResult<DeliveryReceipt> {
        let rendered =
            serde_json::to_string(payload).map_err(|err| PushError::Rejected(err.to_string()))?;
        let receipt = DeliveryReceipt::new(format!(
            "projects/{}/messages/dry-run-{}",
            self.project_id,
            Uuid::new_v4().simple()
        ));
        info!(topic = %payload.topic, %receipt, payload = %rendered, "dry-run push broadcast");
        Ok(receipt)
    }
}
