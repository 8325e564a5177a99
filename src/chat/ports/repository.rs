//! Document-store ports for conversations, messages, and attachments.

use crate::chat::domain::{Attachment, Conversation, ConversationId, Message, MessageId, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for chat repository operations.
pub type ChatRepositoryResult<T> = Result<T, ChatRepositoryError>;

/// Conversation persistence contract.
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Stores a new conversation together with its members.
    ///
    /// Empty conversation and member identifiers are assigned by the store.
    /// Returns the conversation as persisted.
    ///
    /// # Errors
    ///
    /// Returns [`ChatRepositoryError::DuplicateConversation`] when the
    /// conversation identifier is already taken.
    async fn store(&self, conversation: &Conversation) -> ChatRepositoryResult<Conversation>;

    /// Finds a conversation by identifier, with members and messages.
    async fn find_by_id(&self, id: &ConversationId) -> ChatRepositoryResult<Option<Conversation>>;

    /// Finds the live conversation with the given slug, if any.
    async fn find_by_slug(&self, slug: &str) -> ChatRepositoryResult<Option<Conversation>>;
}

/// Message persistence contract.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Appends a message to its conversation.
    ///
    /// The store assigns an identifier when the message has none and links
    /// it from the conversation and the sending member. Returns the message
    /// as persisted.
    ///
    /// # Errors
    ///
    /// Returns [`ChatRepositoryError::ConversationNotFound`] when the
    /// conversation does not exist.
    async fn append(&self, message: &Message) -> ChatRepositoryResult<Message>;

    /// Returns the messages of a conversation, newest first.
    async fn find_by_conversation(
        &self,
        conversation_id: &ConversationId,
    ) -> ChatRepositoryResult<Vec<Message>>;
}

/// Attachment persistence contract.
#[async_trait]
pub trait AttachmentRepository: Send + Sync {
    /// Stores an attachment, assigning an identifier when it has none.
    async fn store(&self, attachment: &Attachment) -> ChatRepositoryResult<Attachment>;

    /// Returns the live attachments addressed to a message.
    async fn find_by_message(&self, message_id: &MessageId)
    -> ChatRepositoryResult<Vec<Attachment>>;

    /// Returns the live attachments shared in a conversation.
    async fn find_by_conversation(
        &self,
        conversation_id: &ConversationId,
    ) -> ChatRepositoryResult<Vec<Attachment>>;

    /// Returns the live attachments uploaded by a user.
    async fn find_by_user(&self, user_id: &UserId) -> ChatRepositoryResult<Vec<Attachment>>;
}

/// Errors returned by chat repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ChatRepositoryError {
    /// A conversation with the same identifier already exists.
    #[error("duplicate conversation identifier: {0}")]
    DuplicateConversation(ConversationId),

    /// The referenced conversation does not exist.
    #[error("conversation not found: {0}")]
    ConversationNotFound(ConversationId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ChatRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
