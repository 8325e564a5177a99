//! Conversion between wire records and domain records.
//!
//! Timestamp policy, applied per field:
//!
//! | Field kind | Absent on the wire | Present on the wire |
//! |---|---|---|
//! | creation, update, join | the mapping call's current instant | decoded |
//! | soft-delete, leave | stays `None` | decoded |
//!
//! A wire timestamp that cannot be decoded is treated as absent. The
//! current instant is read once per mapping call from the injected clock,
//! so every back-filled field of one record carries the same instant.
//!
//! Nested collections are never fetched here: callers pass already-mapped
//! children and the mapper only assembles. In the reverse direction,
//! derived and caller-supplied collections are dropped and only the stored
//! identifier lists are written.

use chrono::{DateTime, Utc};
use mockable::Clock;

use super::models::{
    AttachmentResponse, ConversationMemberResponse, ConversationResponse, MessageResponse,
    UserResponse,
};
use super::timestamp::WireTimestamp;
use crate::chat::domain::{
    Attachment, AttachmentId, Conversation, ConversationId, ConversationMember,
    ConversationMemberId, Message, MessageId, User, UserId,
};

/// Resolves a creation/update style timestamp: absent becomes `now`.
fn backfilled(timestamp: Option<WireTimestamp>, now: DateTime<Utc>) -> DateTime<Utc> {
    timestamp.and_then(WireTimestamp::to_datetime).unwrap_or(now)
}

/// Resolves a soft-delete style timestamp: absent stays absent.
fn kept_absent(timestamp: Option<WireTimestamp>) -> Option<DateTime<Utc>> {
    timestamp.and_then(WireTimestamp::to_datetime)
}

fn encoded(instant: DateTime<Utc>) -> Option<WireTimestamp> {
    Some(WireTimestamp::from_datetime(instant))
}

fn encoded_optional(instant: Option<DateTime<Utc>>) -> Option<WireTimestamp> {
    instant.map(WireTimestamp::from_datetime)
}

fn ids<T: From<String>>(values: Vec<String>) -> Vec<T> {
    values.into_iter().map(T::from).collect()
}

fn id_strings<T: AsRef<str>>(values: &[T]) -> Vec<String> {
    values.iter().map(|id| id.as_ref().to_owned()).collect()
}

// ============================================================================
// Message
// ============================================================================

impl MessageResponse {
    /// Maps the stored message to a domain [`Message`].
    ///
    /// # Examples
    ///
    /// ```
    /// use flexchat::chat::adapters::models::MessageResponse;
    /// use mockable::DefaultClock;
    ///
    /// let wire = MessageResponse {
    ///     id: "m1".to_owned(),
    ///     message_body: "hi".to_owned(),
    ///     ..MessageResponse::default()
    /// };
    /// let message = wire.into_domain(&DefaultClock);
    /// assert_eq!(message.message_body, "hi");
    /// assert!(message.deleted_at.is_none());
    /// ```
    #[must_use]
    pub fn into_domain(self, clock: &impl Clock) -> Message {
        let now = clock.utc();
        Message {
            id: MessageId::new(self.id),
            conversation_id: ConversationId::new(self.conversation_id),
            conversation_member_id: ConversationMemberId::new(self.conversation_member_id),
            user_id: UserId::new(self.user_id),
            sender_name: self.sender_name,
            sender_photo_url: self.sender_photo_url,
            message_body: self.message_body,
            created_at: backfilled(self.created_at, now),
            updated_at: backfilled(self.updated_at, now),
            deleted_at: kept_absent(self.deleted_at),
        }
    }

    /// Encodes a domain [`Message`] for persistence.
    #[must_use]
    pub fn from_domain(message: &Message) -> Self {
        Self {
            id: message.id.as_str().to_owned(),
            user_id: message.user_id.as_str().to_owned(),
            conversation_id: message.conversation_id.as_str().to_owned(),
            conversation_member_id: message.conversation_member_id.as_str().to_owned(),
            sender_name: message.sender_name.clone(),
            sender_photo_url: message.sender_photo_url.clone(),
            message_body: message.message_body.clone(),
            created_at: encoded(message.created_at),
            updated_at: encoded(message.updated_at),
            deleted_at: encoded_optional(message.deleted_at),
        }
    }
}

// ============================================================================
// Conversation member
// ============================================================================

impl ConversationMemberResponse {
    /// Maps the stored membership to a domain [`ConversationMember`],
    /// attaching the caller-supplied messages.
    #[must_use]
    pub fn into_domain(self, messages: Vec<Message>, clock: &impl Clock) -> ConversationMember {
        let now = clock.utc();
        ConversationMember {
            id: ConversationMemberId::new(self.id),
            user_id: UserId::new(self.user_id),
            conversation_id: ConversationId::new(self.conversation_id),
            username: self.username,
            email: self.email,
            photo_profile_url: self.photo_profile_url,
            message_ids: ids(self.message_ids),
            messages,
            joined_at: backfilled(self.joined_at, now),
            updated_at: backfilled(self.updated_at, now),
            left_at: kept_absent(self.left_at),
        }
    }

    /// Encodes a domain [`ConversationMember`] for persistence, dropping
    /// its message records.
    #[must_use]
    pub fn from_domain(member: &ConversationMember) -> Self {
        Self {
            id: member.id.as_str().to_owned(),
            user_id: member.user_id.as_str().to_owned(),
            conversation_id: member.conversation_id.as_str().to_owned(),
            username: member.username.clone(),
            email: member.email.clone(),
            photo_profile_url: member.photo_profile_url.clone(),
            message_ids: id_strings(&member.message_ids),
            joined_at: encoded(member.joined_at),
            updated_at: encoded(member.updated_at),
            left_at: encoded_optional(member.left_at),
        }
    }
}

// ============================================================================
// Conversation
// ============================================================================

impl ConversationResponse {
    /// Maps the stored conversation to a domain [`Conversation`].
    ///
    /// `members`, `messages`, and `attachments` are already-mapped children.
    /// The conversation's message list merges `messages` with every member's
    /// messages, newest first; its latest message is the newest of those or
    /// [`Message::empty`] when there are none.
    #[must_use]
    pub fn into_domain(
        self,
        members: Vec<ConversationMember>,
        messages: Vec<Message>,
        attachments: Vec<Attachment>,
        clock: &impl Clock,
    ) -> Conversation {
        let now = clock.utc();
        Conversation::builder(ConversationId::new(self.id), backfilled(self.created_at, now))
            .updated_at(backfilled(self.updated_at, now))
            .deleted_at(kept_absent(self.deleted_at))
            .with_name(self.conversation_name)
            .with_slug(self.slug)
            .group(self.is_group)
            .with_image_url(self.image_url)
            .with_member_ids(ids(self.conversation_member_ids))
            .with_attachment_ids(ids(self.attachment_ids))
            .with_message_ids(ids(self.message_ids))
            .with_members(members)
            .with_messages(messages)
            .with_attachments(attachments)
            .build()
    }

    /// Encodes a domain [`Conversation`] for persistence.
    ///
    /// Members, messages, attachments, and the latest message are derived
    /// in memory and are not written; the stored identifier lists are.
    #[must_use]
    pub fn from_domain(conversation: &Conversation) -> Self {
        Self {
            id: conversation.id.as_str().to_owned(),
            conversation_name: conversation.conversation_name.clone(),
            is_group: conversation.is_group,
            slug: conversation.slug.clone(),
            image_url: conversation.image_url.clone(),
            conversation_member_ids: id_strings(&conversation.conversation_member_ids),
            attachment_ids: id_strings(&conversation.attachment_ids),
            message_ids: id_strings(&conversation.message_ids),
            created_at: encoded(conversation.created_at),
            updated_at: encoded(conversation.updated_at),
            deleted_at: encoded_optional(conversation.deleted_at),
        }
    }
}

// ============================================================================
// User
// ============================================================================

impl UserResponse {
    /// Maps the stored user to a domain [`User`], attaching the
    /// caller-supplied conversations and memberships.
    #[must_use]
    pub fn into_domain(
        self,
        conversations: Vec<Conversation>,
        conversation_members: Vec<ConversationMember>,
        clock: &impl Clock,
    ) -> User {
        let now = clock.utc();
        User {
            id: UserId::new(self.id),
            username: self.username,
            email: self.email,
            password: self.password,
            phone_number: self.phone_number,
            photo_profile_url: self.photo_profile_url,
            status: self.status,
            is_online: self.is_online,
            conversation_ids: ids(self.conversation_ids),
            conversation_member_ids: ids(self.conversation_member_ids),
            conversations,
            conversation_members,
            created_at: backfilled(self.created_at, now),
            updated_at: backfilled(self.updated_at, now),
            deleted_at: kept_absent(self.deleted_at),
        }
    }

    /// Encodes a domain [`User`] for persistence.
    ///
    /// The password field is written as held on the record.
    #[must_use]
    pub fn from_domain(user: &User) -> Self {
        Self {
            id: user.id.as_str().to_owned(),
            username: user.username.clone(),
            email: user.email.clone(),
            password: user.password.clone(),
            phone_number: user.phone_number.clone(),
            photo_profile_url: user.photo_profile_url.clone(),
            conversation_ids: id_strings(&user.conversation_ids),
            conversation_member_ids: id_strings(&user.conversation_member_ids),
            status: user.status.clone(),
            is_online: user.is_online,
            created_at: encoded(user.created_at),
            updated_at: encoded(user.updated_at),
            deleted_at: encoded_optional(user.deleted_at),
        }
    }
}

// ============================================================================
// Attachment
// ============================================================================

impl AttachmentResponse {
    /// Maps the stored attachment to a domain [`Attachment`].
    #[must_use]
    pub fn into_domain(self, clock: &impl Clock) -> Attachment {
        Attachment {
            id: AttachmentId::new(self.id),
            user_id: UserId::new(self.user_id),
            conversation_id: ConversationId::new(self.conversation_id),
            message_id: MessageId::new(self.message_id),
            url: self.url,
            name: self.name,
            mime_type: self.mime_type,
            created_at: backfilled(self.created_at, clock.utc()),
            deleted_at: kept_absent(self.deleted_at),
        }
    }

    /// Encodes a domain [`Attachment`] for persistence.
    #[must_use]
    pub fn from_domain(attachment: &Attachment) -> Self {
        Self {
            id: attachment.id.as_str().to_owned(),
            user_id: attachment.user_id.as_str().to_owned(),
            conversation_id: attachment.conversation_id.as_str().to_owned(),
            message_id: attachment.message_id.as_str().to_owned(),
            url: attachment.url.clone(),
            name: attachment.name.clone(),
            mime_type: attachment.mime_type.clone(),
            created_at: encoded(attachment.created_at),
            deleted_at: encoded_optional(attachment.deleted_at),
        }
    }
}
