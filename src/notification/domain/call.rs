//! Call-started trigger record.

use serde::{Deserialize, Serialize};

/// Document written to `ongoing_call/{conversationId}` when a participant
/// starts a call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CallStarted {
    /// Conversation being called; also the broadcast topic.
    pub conversation_id: String,
    /// User who started the call.
    pub call_initiator_id: String,
    /// Opaque session offer forwarded to callees.
    pub session_description: String,
}
