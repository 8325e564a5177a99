//! In-memory document store holding wire records.
//!
//! Documents are kept in their stored shape and mapped to domain records
//! on every read, so reads go through the same default policy as records
//! fetched from the real document store.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::chat::{
    adapters::models::{
        AttachmentResponse, ConversationMemberResponse, ConversationResponse, MessageResponse,
    },
    domain::{Attachment, AttachmentId, Conversation, ConversationId, Message, MessageId, UserId},
    ports::{
        AttachmentRepository, ChatRepositoryError, ChatRepositoryResult, ConversationRepository,
        MessageRepository,
    },
};

/// Thread-safe in-memory chat document store.
///
/// Clones share the same documents.
pub struct InMemoryChatStore<C = DefaultClock>
where
    C: Clock + Send + Sync,
{
    state: Arc<RwLock<ChatDocuments>>,
    clock: Arc<C>,
}

#[derive(Debug, Default)]
struct ChatDocuments {
    conversations: HashMap<String, ConversationResponse>,
    members: HashMap<String, ConversationMemberResponse>,
    messages: HashMap<String, MessageResponse>,
    attachments: HashMap<String, AttachmentResponse>,
}

impl<C> Clone for InMemoryChatStore<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C> fmt::Debug for InMemoryChatStore<C>
where
    C: Clock + Send + Sync,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryChatStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl InMemoryChatStore<DefaultClock> {
    /// Creates an empty store that back-fills timestamps from the system
    /// clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl Default for InMemoryChatStore<DefaultClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> InMemoryChatStore<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty store using `clock` for timestamp back-fill.
    #[must_use]
    pub fn with_clock(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(ChatDocuments::default())),
            clock,
        }
    }

    /// Inserts a raw conversation document, bypassing domain encoding.
    ///
    /// Lets callers seed documents whose server timestamps are still
    /// pending.
    ///
    /// # Errors
    ///
    /// Returns [`ChatRepositoryError::Persistence`] when the lock is
    /// poisoned.
    pub fn insert_conversation_document(
        &self,
        document: ConversationResponse,
    ) -> ChatRepositoryResult<()> {
        let mut state = self.write()?;
        state.conversations.insert(document.id.clone(), document);
        Ok(())
    }

    /// Inserts a raw membership document, bypassing domain encoding.
    ///
    /// # Errors
    ///
    /// Returns [`ChatRepositoryError::Persistence`] when the lock is
    /// poisoned.
    pub fn insert_member_document(
        &self,
        document: ConversationMemberResponse,
    ) -> ChatRepositoryResult<()> {
        let mut state = self.write()?;
        state.members.insert(document.id.clone(), document);
        Ok(())
    }

    /// Live attachments matching `predicate`, oldest first.
    fn live_attachments(
        &self,
        predicate: impl Fn(&AttachmentResponse) -> bool,
    ) -> ChatRepositoryResult<Vec<Attachment>> {
        let state = self.read()?;
        let mut attachments: Vec<Attachment> = state
            .attachments
            .values()
            .filter(|document| document.deleted_at.is_none() && predicate(document))
            .map(|document| document.clone().into_domain(&*self.clock))
            .collect();
        attachments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(attachments)
    }

    fn read(&self) -> ChatRepositoryResult<std::sync::RwLockReadGuard<'_, ChatDocuments>> {
        self.state.read().map_err(|err| {
            ChatRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> ChatRepositoryResult<std::sync::RwLockWriteGuard<'_, ChatDocuments>> {
        self.state.write().map_err(|err| {
            ChatRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

fn new_document_id() -> String {
    Uuid::new_v4().simple().to_string()
}

fn assigned_or_new(id: &str) -> String {
    if id.trim().is_empty() {
        new_document_id()
    } else {
        id.to_owned()
    }
}

fn push_unique(ids: &mut Vec<String>, id: &str) {
    if !ids.iter().any(|existing| existing == id) {
        ids.push(id.to_owned());
    }
}

/// Maps the stored messages named by `ids`, skipping dangling references.
fn load_messages(state: &ChatDocuments, ids: &[String], clock: &impl Clock) -> Vec<Message> {
    ids.iter()
        .filter_map(|id| state.messages.get(id))
        .map(|document| document.clone().into_domain(clock))
        .collect()
}

/// Assembles a conversation from its document and the documents it links.
fn load_conversation(
    state: &ChatDocuments,
    document: &ConversationResponse,
    clock: &impl Clock,
) -> Conversation {
    let members = document
        .conversation_member_ids
        .iter()
        .filter_map(|id| state.members.get(id))
        .map(|member| {
            let messages = load_messages(state, &member.message_ids, clock);
            member.clone().into_domain(messages, clock)
        })
        .collect();
    let messages = load_messages(state, &document.message_ids, clock);
    let attachments = document
        .attachment_ids
        .iter()
        .filter_map(|id| state.attachments.get(id))
        .map(|attachment| attachment.clone().into_domain(clock))
        .collect();
    document
        .clone()
        .into_domain(members, messages, attachments, clock)
}

#[async_trait]
impl<C> ConversationRepository for InMemoryChatStore<C>
where
    C: Clock + Send + Sync,
{
    async fn store(&self, conversation: &Conversation) -> ChatRepositoryResult<Conversation> {
        let mut state = self.write()?;
        let mut document = ConversationResponse::from_domain(conversation);
        document.id = assigned_or_new(&document.id);
        if state.conversations.contains_key(&document.id) {
            return Err(ChatRepositoryError::DuplicateConversation(
                ConversationId::new(document.id),
            ));
        }

        for member in conversation.members() {
            let mut member_document = ConversationMemberResponse::from_domain(member);
            member_document.id = assigned_or_new(&member_document.id);
            member_document.conversation_id.clone_from(&document.id);
            push_unique(&mut document.conversation_member_ids, &member_document.id);
            state
                .members
                .insert(member_document.id.clone(), member_document);
        }

        let stored = load_conversation(&state, &document, &*self.clock);
        state.conversations.insert(document.id.clone(), document);
        Ok(stored)
    }

    async fn find_by_id(&self, id: &ConversationId) -> ChatRepositoryResult<Option<Conversation>> {
        let state = self.read()?;
        Ok(state
            .conversations
            .get(id.as_str())
            .map(|document| load_conversation(&state, document, &*self.clock)))
    }

    async fn find_by_slug(&self, slug: &str) -> ChatRepositoryResult<Option<Conversation>> {
        let state = self.read()?;
        let oldest = state
            .conversations
            .values()
            .filter(|document| document.slug == slug && document.deleted_at.is_none())
            .min_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        Ok(oldest.map(|document| load_conversation(&state, document, &*self.clock)))
    }
}

#[async_trait]
impl<C> MessageRepository for InMemoryChatStore<C>
where
    C: Clock + Send + Sync,
{
    async fn append(&self, message: &Message) -> ChatRepositoryResult<Message> {
        let mut state = self.write()?;
        let mut document = MessageResponse::from_domain(message);
        document.id = assigned_or_new(&document.id);

        let conversation = state
            .conversations
            .get_mut(&document.conversation_id)
            .ok_or_else(|| {
                ChatRepositoryError::ConversationNotFound(message.conversation_id.clone())
            })?;
        push_unique(&mut conversation.message_ids, &document.id);
        if let Some(member) = state.members.get_mut(&document.conversation_member_id) {
            push_unique(&mut member.message_ids, &document.id);
        }

        let stored = document.clone().into_domain(&*self.clock);
        state.messages.insert(document.id.clone(), document);
        Ok(stored)
    }

    async fn find_by_conversation(
        &self,
        conversation_id: &ConversationId,
    ) -> ChatRepositoryResult<Vec<Message>> {
        let state = self.read()?;
        let mut messages: Vec<Message> = state
            .messages
            .values()
            .filter(|document| document.conversation_id == conversation_id.as_str())
            .map(|document| document.clone().into_domain(&*self.clock))
            .collect();
        messages.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(messages)
    }
}

#[async_trait]
impl<C> AttachmentRepository for InMemoryChatStore<C>
where
    C: Clock + Send + Sync,
{
    async fn store(&self, attachment: &Attachment) -> ChatRepositoryResult<Attachment> {
        let mut state = self.write()?;
        let mut document = AttachmentResponse::from_domain(attachment);
        document.id = assigned_or_new(&document.id);
        if let Some(conversation) = state.conversations.get_mut(&document.conversation_id) {
            push_unique(&mut conversation.attachment_ids, &document.id);
        }
        let stored = Attachment {
            id: AttachmentId::new(document.id.clone()),
            ..attachment.clone()
        };
        state.attachments.insert(document.id.clone(), document);
        Ok(stored)
    }

    async fn find_by_message(
        &self,
        message_id: &MessageId,
    ) -> ChatRepositoryResult<Vec<Attachment>> {
        self.live_attachments(|document| document.message_id == message_id.as_str())
    }

    async fn find_by_conversation(
        &self,
        conversation_id: &ConversationId,
    ) -> ChatRepositoryResult<Vec<Attachment>> {
        self.live_attachments(|document| document.conversation_id == conversation_id.as_str())
    }

    async fn find_by_user(&self, user_id: &UserId) -> ChatRepositoryResult<Vec<Attachment>> {
        self.live_attachments(|document| document.user_id == user_id.as_str())
    }
}
