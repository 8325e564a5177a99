//! A single chat message.

use super::{ConversationId, ConversationMember, ConversationMemberId, MessageId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;

/// A message sent by a conversation member.
///
/// Sender display fields are denormalised from the member at send time so
/// a message renders without further lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Document identifier.
    pub id: MessageId,
    /// Conversation the message belongs to.
    pub conversation_id: ConversationId,
    /// Membership that sent the message.
    pub conversation_member_id: ConversationMemberId,
    /// User that sent the message.
    pub user_id: UserId,
    /// Sender display name at send time.
    pub sender_name: String,
    /// Sender photo URL at send time.
    pub sender_photo_url: String,
    /// Body text.
    pub message_body: String,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Last update instant.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete instant; `None` while the message is live.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Message {
    /// Returns the empty-message sentinel.
    ///
    /// Used as a conversation's latest message when it has none. All
    /// identifiers and text are empty and both timestamps are the Unix
    /// epoch, so the sentinel compares equal to itself across calls.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            id: MessageId::default(),
            conversation_id: ConversationId::default(),
            conversation_member_id: ConversationMemberId::default(),
            user_id: UserId::default(),
            sender_name: String::new(),
            sender_photo_url: String::new(),
            message_body: String::new(),
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            updated_at: DateTime::<Utc>::UNIX_EPOCH,
            deleted_at: None,
        }
    }

    /// Returns `true` when this is the empty-message sentinel.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::empty()
    }

    /// Drafts an unpersisted message from `member` with the given body.
    ///
    /// The identifier stays empty until the store assigns one.
    #[must_use]
    pub fn compose(
        member: &ConversationMember,
        body: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        let now = clock.utc();
        Self {
            id: MessageId::default(),
            conversation_id: member.conversation_id.clone(),
            conversation_member_id: member.id.clone(),
            user_id: member.user_id.clone(),
            sender_name: member.username.clone(),
            sender_photo_url: member.photo_profile_url.clone(),
            message_body: body.into(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Returns `true` when the message carries a soft-delete timestamp.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Returns a copy marked as deleted at the clock's current instant.
    #[must_use]
    pub fn soft_deleted(self, clock: &impl Clock) -> Self {
        let now = clock.utc();
        Self {
            updated_at: now,
            deleted_at: Some(now),
            ..self
        }
    }
}
