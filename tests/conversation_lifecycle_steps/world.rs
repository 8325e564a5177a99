//! Shared world state for conversation lifecycle BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use flexchat::chat::{
    adapters::memory::InMemoryChatStore,
    domain::{Conversation, User},
    services::{ConversationService, ConversationServiceError},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestConversationService = ConversationService<InMemoryChatStore, DefaultClock>;

/// Scenario world for conversation lifecycle behaviour tests.
pub struct ConversationWorld {
    pub store: InMemoryChatStore,
    pub service: TestConversationService,
    pub users: HashMap<String, User>,
    pub first_conversation: Option<Conversation>,
    pub last_result: Option<Result<Conversation, ConversationServiceError>>,
    pub messages_sent: i64,
}

impl ConversationWorld {
    /// Creates a world with an empty document store.
    #[must_use]
    pub fn new() -> Self {
        let store = InMemoryChatStore::new();
        let service =
            ConversationService::new(Arc::new(store.clone()), Arc::new(DefaultClock));
        Self {
            store,
            service,
            users: HashMap::new(),
            first_conversation: None,
            last_result: None,
            messages_sent: 0,
        }
    }

    /// Looks up a registered user by display name.
    pub fn user(&self, name: &str) -> Result<User, eyre::Report> {
        self.users
            .get(name)
            .cloned()
            .ok_or_else(|| eyre::eyre!("user {name} is not registered in scenario world"))
    }

    /// The conversation most recently opened in the scenario.
    pub fn current_conversation(&self) -> Result<&Conversation, eyre::Report> {
        match self.last_result.as_ref() {
            Some(Ok(conversation)) => Ok(conversation),
            Some(Err(err)) => Err(eyre::eyre!("opening the conversation failed: {err}")),
            None => self
                .first_conversation
                .as_ref()
                .ok_or_else(|| eyre::eyre!("no conversation opened in scenario world")),
        }
    }
}

impl Default for ConversationWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ConversationWorld {
    ConversationWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
