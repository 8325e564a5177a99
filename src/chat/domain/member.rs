//! Membership of a user in a conversation.

use super::{ConversationId, ConversationMemberId, Message, MessageId, User, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;

/// Link between a [`User`] and a conversation.
///
/// Carries the user's display fields at join time and owns the messages the
/// user sent into the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationMember {
    /// Document identifier.
    pub id: ConversationMemberId,
    /// Member user.
    pub user_id: UserId,
    /// Conversation joined.
    pub conversation_id: ConversationId,
    /// Username at join time.
    pub username: String,
    /// Email at join time.
    pub email: String,
    /// Profile photo URL at join time.
    pub photo_profile_url: String,
    /// Identifiers of messages sent by this member.
    pub message_ids: Vec<MessageId>,
    /// Messages sent by this member, supplied by the caller.
    pub messages: Vec<Message>,
    /// Join instant.
    pub joined_at: DateTime<Utc>,
    /// Last update instant.
    pub updated_at: DateTime<Utc>,
    /// Leave instant; `None` while the user is still a member.
    pub left_at: Option<DateTime<Utc>>,
}

impl ConversationMember {
    /// Creates an unpersisted membership of `user` in `conversation_id`,
    /// joined at the clock's current instant.
    #[must_use]
    pub fn join(user: &User, conversation_id: ConversationId, clock: &impl Clock) -> Self {
        let now = clock.utc();
        Self {
            id: ConversationMemberId::default(),
            user_id: user.id.clone(),
            conversation_id,
            username: user.username.clone(),
            email: user.email.clone(),
            photo_profile_url: user.photo_profile_url.clone(),
            message_ids: Vec::new(),
            messages: Vec::new(),
            joined_at: now,
            updated_at: now,
            left_at: None,
        }
    }

    /// Returns `true` when the member has left the conversation.
    #[must_use]
    pub const fn has_left(&self) -> bool {
        self.left_at.is_some()
    }

    /// Returns a copy that records leaving at the clock's current instant.
    #[must_use]
    pub fn leave(self, clock: &impl Clock) -> Self {
        let now = clock.utc();
        Self {
            updated_at: now,
            left_at: Some(now),
            ..self
        }
    }
}
