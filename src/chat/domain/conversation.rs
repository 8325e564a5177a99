//! Conversations and their derived message views.

use super::{
    Attachment, AttachmentId, ConversationId, ConversationMember, ConversationMemberId, Message,
    MessageId,
};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// A one-to-one or group conversation.
///
/// The message list and latest message are derived at assembly time from
/// the supplied messages and the members' messages; they are read through
/// accessors so they cannot drift from their sources. Changing members or
/// messages produces a new conversation via [`Conversation::with_member`]
/// or [`Conversation::with_message`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    /// Document identifier; also the push-messaging topic.
    pub id: ConversationId,
    /// Display name.
    pub conversation_name: String,
    /// Dedup key for "conversation between the same set of people".
    pub slug: String,
    /// Whether more than two people take part.
    pub is_group: bool,
    /// Conversation image URL.
    pub image_url: String,
    /// Membership identifiers as stored on the conversation document.
    pub conversation_member_ids: Vec<ConversationMemberId>,
    /// Attachment identifiers as stored on the conversation document.
    pub attachment_ids: Vec<AttachmentId>,
    /// Message identifiers as stored on the conversation document.
    pub message_ids: Vec<MessageId>,
    /// Attachments supplied by the caller.
    pub attachments: Vec<Attachment>,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Last update instant.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete instant; `None` while the conversation is live.
    pub deleted_at: Option<DateTime<Utc>>,
    members: Vec<ConversationMember>,
    supplied_messages: Vec<Message>,
    messages: Vec<Message>,
    latest_message: Message,
}

impl Conversation {
    /// Starts building a conversation with the given identity and creation
    /// instant.
    #[must_use]
    pub fn builder(id: ConversationId, created_at: DateTime<Utc>) -> ConversationBuilder {
        ConversationBuilder::new(id, created_at)
    }

    /// Members of the conversation, in stored order.
    #[must_use]
    pub fn members(&self) -> &[ConversationMember] {
        &self.members
    }

    /// All messages, newest first.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The newest message, or the [`Message::empty`] sentinel.
    #[must_use]
    pub const fn latest_message(&self) -> &Message {
        &self.latest_message
    }

    /// Returns `true` when the conversation carries a soft-delete timestamp.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Returns a copy with `member` appended and derived views recomputed.
    #[must_use]
    pub fn with_member(self, member: ConversationMember) -> Self {
        let mut builder = self.into_builder();
        if !member.id.is_empty() && !builder.conversation_member_ids.contains(&member.id) {
            builder.conversation_member_ids.push(member.id.clone());
        }
        builder.members.push(member);
        builder.build()
    }

    /// Returns a copy with `message` added and derived views recomputed.
    #[must_use]
    pub fn with_message(self, message: Message) -> Self {
        let mut builder = self.into_builder();
        if !message.id.is_empty() && !builder.message_ids.contains(&message.id) {
            builder.message_ids.push(message.id.clone());
        }
        builder.messages.push(message);
        builder.build()
    }

    fn into_builder(self) -> ConversationBuilder {
        ConversationBuilder {
            id: self.id,
            conversation_name: self.conversation_name,
            slug: self.slug,
            is_group: self.is_group,
            image_url: self.image_url,
            conversation_member_ids: self.conversation_member_ids,
            attachment_ids: self.attachment_ids,
            message_ids: self.message_ids,
            members: self.members,
            messages: self.supplied_messages,
            attachments: self.attachments,
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
        }
    }
}

/// Builder for [`Conversation`].
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use flexchat::chat::domain::{Conversation, ConversationId};
///
/// let conversation = Conversation::builder(ConversationId::new("c1"), Utc::now())
///     .with_name("alice bob")
///     .with_slug("alice,bob")
///     .build();
///
/// assert!(conversation.latest_message().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct ConversationBuilder {
    id: ConversationId,
    conversation_name: String,
    slug: String,
    is_group: bool,
    image_url: String,
    conversation_member_ids: Vec<ConversationMemberId>,
    attachment_ids: Vec<AttachmentId>,
    message_ids: Vec<MessageId>,
    members: Vec<ConversationMember>,
    messages: Vec<Message>,
    attachments: Vec<Attachment>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl ConversationBuilder {
    fn new(id: ConversationId, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            conversation_name: String::new(),
            slug: String::new(),
            is_group: false,
            image_url: String::new(),
            conversation_member_ids: Vec::new(),
            attachment_ids: Vec::new(),
            message_ids: Vec::new(),
            members: Vec::new(),
            messages: Vec::new(),
            attachments: Vec::new(),
            created_at,
            updated_at: created_at,
            deleted_at: None,
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.conversation_name = name.into();
        self
    }

    /// Sets the dedup slug.
    #[must_use]
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    /// Marks the conversation as a group conversation.
    #[must_use]
    pub const fn group(mut self, is_group: bool) -> Self {
        self.is_group = is_group;
        self
    }

    /// Sets the image URL.
    #[must_use]
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = url.into();
        self
    }

    /// Sets the stored membership identifiers.
    #[must_use]
    pub fn with_member_ids(mut self, ids: impl IntoIterator<Item = ConversationMemberId>) -> Self {
        self.conversation_member_ids = ids.into_iter().collect();
        self
    }

    /// Sets the stored attachment identifiers.
    #[must_use]
    pub fn with_attachment_ids(mut self, ids: impl IntoIterator<Item = AttachmentId>) -> Self {
        self.attachment_ids = ids.into_iter().collect();
        self
    }

    /// Sets the stored message identifiers.
    #[must_use]
    pub fn with_message_ids(mut self, ids: impl IntoIterator<Item = MessageId>) -> Self {
        self.message_ids = ids.into_iter().collect();
        self
    }

    /// Sets the already-mapped members.
    #[must_use]
    pub fn with_members(mut self, members: Vec<ConversationMember>) -> Self {
        self.members = members;
        self
    }

    /// Sets the already-mapped messages not reachable through members.
    #[must_use]
    pub fn with_messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = messages;
        self
    }

    /// Sets the already-mapped attachments.
    #[must_use]
    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }

    /// Sets the last update instant. Defaults to the creation instant.
    #[must_use]
    pub const fn updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = updated_at;
        self
    }

    /// Sets the soft-delete instant.
    #[must_use]
    pub const fn deleted_at(mut self, deleted_at: Option<DateTime<Utc>>) -> Self {
        self.deleted_at = deleted_at;
        self
    }

    /// Assembles the conversation and computes its derived views.
    #[must_use]
    pub fn build(self) -> Conversation {
        let messages = merge_messages(&self.messages, &self.members);
        let latest_message = messages.first().cloned().unwrap_or_else(Message::empty);
        Conversation {
            id: self.id,
            conversation_name: self.conversation_name,
            slug: self.slug,
            is_group: self.is_group,
            image_url: self.image_url,
            conversation_member_ids: self.conversation_member_ids,
            attachment_ids: self.attachment_ids,
            message_ids: self.message_ids,
            attachments: self.attachments,
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
            members: self.members,
            supplied_messages: self.messages,
            messages,
            latest_message,
        }
    }
}

/// Combines supplied messages with the members' messages, newest first.
///
/// Messages sharing a non-empty identifier appear once; the first
/// occurrence wins. Ties on creation time keep input order, supplied
/// messages before member messages.
fn merge_messages(supplied: &[Message], members: &[ConversationMember]) -> Vec<Message> {
    let mut seen: HashSet<&MessageId> = HashSet::new();
    let mut merged: Vec<Message> = supplied
        .iter()
        .chain(members.iter().flat_map(|member| member.messages.iter()))
        .filter(|message| message.id.is_empty() || seen.insert(&message.id))
        .cloned()
        .collect();
    merged.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    merged
}
