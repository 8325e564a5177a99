//! Find-or-create orchestration for conversations.

use crate::chat::{
    domain::{
        Conversation, ConversationId, ConversationMember, User, conversation_display_name,
        conversation_slug,
    },
    ports::{ChatRepositoryError, ConversationRepository},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Service-level errors for conversation operations.
#[derive(Debug, Error)]
pub enum ConversationServiceError {
    /// A conversation needs at least two participants.
    #[error("a conversation needs at least two participants, got {0}")]
    NotEnoughParticipants(usize),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ChatRepositoryError),
}

/// Result type for conversation service operations.
pub type ConversationServiceResult<T> = Result<T, ConversationServiceError>;

/// Conversation orchestration service.
pub struct ConversationService<R, C>
where
    R: ConversationRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for ConversationService<R, C>
where
    R: ConversationRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> ConversationService<R, C>
where
    R: ConversationRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new conversation service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Returns the live conversation between exactly these participants,
    /// creating it when none exists.
    ///
    /// Participants are matched by slug, so order and username case do not
    /// matter. A new conversation is named after the participants in the
    /// given order and is a group conversation when more than two people
    /// take part.
    ///
    /// # Errors
    ///
    /// Returns [`ConversationServiceError::NotEnoughParticipants`] for fewer
    /// than two participants and [`ConversationServiceError::Repository`]
    /// when lookup or persistence fails.
    pub async fn find_or_create(
        &self,
        participants: &[User],
    ) -> ConversationServiceResult<Conversation> {
        if participants.len() < 2 {
            return Err(ConversationServiceError::NotEnoughParticipants(
                participants.len(),
            ));
        }

        let usernames = participants.iter().map(|user| user.username.as_str());
        let slug = conversation_slug(usernames.clone());
        if let Some(existing) = self.repository.find_by_slug(&slug).await? {
            debug!(conversation_id = %existing.id, %slug, "conversation already exists");
            return Ok(existing);
        }

        let clock = &*self.clock;
        let members = participants
            .iter()
            .map(|user| ConversationMember::join(user, ConversationId::default(), clock))
            .collect();
        let draft = Conversation::builder(ConversationId::default(), clock.utc())
            .with_name(conversation_display_name(usernames))
            .with_slug(slug)
            .group(participants.len() > 2)
            .with_members(members)
            .build();

        let stored = self.repository.store(&draft).await?;
        info!(
            conversation_id = %stored.id,
            participants = participants.len(),
            "conversation created"
        );
        Ok(stored)
    }

    /// Retrieves a conversation by identifier.
    ///
    /// Returns `Ok(None)` when the conversation does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConversationServiceError::Repository`] when lookup fails.
    pub async fn find_by_id(
        &self,
        id: &ConversationId,
    ) -> ConversationServiceResult<Option<Conversation>> {
        Ok(self.repository.find_by_id(id).await?)
    }
}
