//! Shared world state for notification dispatch BDD scenarios.

use std::sync::Arc;

use flexchat::chat::{adapters::memory::InMemoryChatStore, domain::Message};
use flexchat::notification::{
    adapters::RecordingPushMessenger,
    domain::CallStarted,
    ports::DeliveryReceipt,
    services::{DispatchError, NotificationDispatcher},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Dispatcher type used by the BDD world.
pub type TestDispatcher =
    NotificationDispatcher<RecordingPushMessenger, InMemoryChatStore, DefaultClock>;

/// Scenario world for notification dispatch behaviour tests.
pub struct NotificationWorld {
    pub messenger: RecordingPushMessenger,
    pub store: InMemoryChatStore,
    pub pending_message: Option<Message>,
    pub pending_call: Option<CallStarted>,
    pub last_dispatch_result: Option<Result<DeliveryReceipt, DispatchError>>,
}

impl NotificationWorld {
    /// Creates a world with an accepting push service and an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            messenger: RecordingPushMessenger::new("flexchat-test"),
            store: InMemoryChatStore::new(),
            pending_message: None,
            pending_call: None,
            last_dispatch_result: None,
        }
    }

    /// Builds a dispatcher over the world's current collaborators.
    #[must_use]
    pub fn dispatcher(&self) -> TestDispatcher {
        NotificationDispatcher::new(
            Arc::new(self.messenger.clone()),
            Arc::new(self.store.clone()),
            Arc::new(DefaultClock),
        )
    }
}

impl Default for NotificationWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> NotificationWorld {
    NotificationWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
