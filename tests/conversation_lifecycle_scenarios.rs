//! Behaviour tests for conversation find-or-create and messaging.

mod conversation_lifecycle_steps;

use conversation_lifecycle_steps::world::{ConversationWorld, world};
use rstest_bdd_macros::scenario;

#[scenario(
    path = "tests/features/conversation_lifecycle.feature",
    name = "Two users start a conversation"
)]
#[tokio::test(flavor = "multi_thread")]
async fn two_users_start_conversation(world: ConversationWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/conversation_lifecycle.feature",
    name = "Reopening a conversation returns the existing one"
)]
#[tokio::test(flavor = "multi_thread")]
async fn reopening_returns_existing(world: ConversationWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/conversation_lifecycle.feature",
    name = "The newest message becomes the latest message"
)]
#[tokio::test(flavor = "multi_thread")]
async fn newest_message_is_latest(world: ConversationWorld) {
    let _ = world;
}
