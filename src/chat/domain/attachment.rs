//! Files attached to messages, conversations, or users.

use super::{AttachmentId, ConversationId, MessageId, UserId};
use chrono::{DateTime, Utc};

/// A stored file and the entities it is addressed to.
///
/// Attachments are stored independently and fetched by foreign key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Document identifier.
    pub id: AttachmentId,
    /// Uploading user.
    pub user_id: UserId,
    /// Conversation the file was shared in.
    pub conversation_id: ConversationId,
    /// Message carrying the file.
    pub message_id: MessageId,
    /// Download URL in file storage.
    pub url: String,
    /// Original file name.
    pub name: String,
    /// MIME type reported at upload.
    pub mime_type: String,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Soft-delete instant; `None` while the attachment is live.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Attachment {
    /// Returns `true` when the attachment carries a soft-delete timestamp.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}
