//! Wire records as stored in the document database.
//!
//! Every string field defaults to empty and every list to empty when the
//! stored document lacks it. Timestamps are optional: the store leaves them
//! absent until it assigns a server time. Conversion to and from domain
//! records lives in [`super::mapping`].

use serde::{Deserialize, Serialize};
use std::fmt;

use super::timestamp::{WireTimestamp, lenient_timestamp};

// ============================================================================
// User
// ============================================================================

/// Stored user document.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserResponse {
    /// Document identifier.
    pub id: String,
    /// Display name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Password as persisted by the client.
    pub password: String,
    /// Phone number.
    pub phone_number: String,
    /// Profile photo URL.
    pub photo_profile_url: String,
    /// Conversation identifiers.
    pub conversation_ids: Vec<String>,
    /// Membership identifiers.
    pub conversation_member_ids: Vec<String>,
    /// Status text.
    pub status: String,
    /// Presence flag.
    #[serde(rename = "online", alias = "isOnline")]
    pub is_online: bool,
    /// Creation time, absent until assigned by the server.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<WireTimestamp>,
    /// Update time, absent until assigned by the server.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<WireTimestamp>,
    /// Soft-delete time.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub deleted_at: Option<WireTimestamp>,
}

impl fmt::Debug for UserResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserResponse")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("phone_number", &self.phone_number)
            .field("photo_profile_url", &self.photo_profile_url)
            .field("conversation_ids", &self.conversation_ids)
            .field("conversation_member_ids", &self.conversation_member_ids)
            .field("status", &self.status)
            .field("is_online", &self.is_online)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .field("deleted_at", &self.deleted_at)
            .finish()
    }
}

// ============================================================================
// Conversation
// ============================================================================

/// Stored conversation document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConversationResponse {
    /// Document identifier.
    pub id: String,
    /// Display name.
    pub conversation_name: String,
    /// Group flag.
    #[serde(rename = "group", alias = "isGroup")]
    pub is_group: bool,
    /// Dedup slug.
    pub slug: String,
    /// Image URL.
    pub image_url: String,
    /// Membership identifiers.
    pub conversation_member_ids: Vec<String>,
    /// Attachment identifiers.
    pub attachment_ids: Vec<String>,
    /// Message identifiers.
    pub message_ids: Vec<String>,
    /// Creation time, absent until assigned by the server.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<WireTimestamp>,
    /// Update time, absent until assigned by the server.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<WireTimestamp>,
    /// Soft-delete time.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub deleted_at: Option<WireTimestamp>,
}

// ============================================================================
// Conversation member
// ============================================================================

/// Stored conversation membership document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConversationMemberResponse {
    /// Document identifier.
    pub id: String,
    /// Member user identifier.
    pub user_id: String,
    /// Conversation identifier.
    pub conversation_id: String,
    /// Username at join time.
    pub username: String,
    /// Email at join time.
    pub email: String,
    /// Photo URL at join time.
    pub photo_profile_url: String,
    /// Identifiers of messages sent by the member.
    pub message_ids: Vec<String>,
    /// Join time, absent until assigned by the server.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub joined_at: Option<WireTimestamp>,
    /// Update time, absent until assigned by the server.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<WireTimestamp>,
    /// Leave time.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub left_at: Option<WireTimestamp>,
}

// ============================================================================
// Message
// ============================================================================

/// Stored message document.
///
/// This is also the record handed to the notification trigger when a
/// document is created under `messages/{messageId}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MessageResponse {
    /// Document identifier.
    pub id: String,
    /// Sender user identifier.
    pub user_id: String,
    /// Conversation identifier.
    pub conversation_id: String,
    /// Sending membership identifier.
    pub conversation_member_id: String,
    /// Sender display name.
    pub sender_name: String,
    /// Sender photo URL.
    pub sender_photo_url: String,
    /// Body text.
    pub message_body: String,
    /// Creation time, absent until assigned by the server.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<WireTimestamp>,
    /// Update time, absent until assigned by the server.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<WireTimestamp>,
    /// Soft-delete time.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub deleted_at: Option<WireTimestamp>,
}

// ============================================================================
// Attachment
// ============================================================================

/// Stored attachment document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttachmentResponse {
    /// Document identifier.
    pub id: String,
    /// Uploading user identifier.
    pub user_id: String,
    /// Conversation identifier.
    pub conversation_id: String,
    /// Message identifier.
    pub message_id: String,
    /// Download URL.
    pub url: String,
    /// File name.
    pub name: String,
    /// MIME type.
    pub mime_type: String,
    /// Creation time, absent until assigned by the server.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<WireTimestamp>,
    /// Soft-delete time.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub deleted_at: Option<WireTimestamp>,
}
