//! Given steps for notification dispatch BDD scenarios.

use super::world::{NotificationWorld, run_async};
use chrono::Utc;
use eyre::WrapErr;
use flexchat::chat::{
    domain::{Conversation, ConversationId, Message},
    ports::ConversationRepository,
};
use flexchat::notification::{adapters::RecordingPushMessenger, domain::CallStarted};
use rstest_bdd_macros::given;

#[given(r#"a message from "{sender}" saying "{body}" in conversation "{conversation}""#)]
fn message_from_sender(
    world: &mut NotificationWorld,
    sender: String,
    body: String,
    conversation: String,
) {
    world.pending_message = Some(Message {
        id: "m1".into(),
        conversation_id: conversation.into(),
        user_id: format!("uid-{}", sender.to_lowercase()).into(),
        sender_name: sender,
        message_body: body,
        created_at: Utc::now(),
        ..Message::empty()
    });
}

#[given("a push service that rejects broadcasts")]
fn rejecting_push_service(world: &mut NotificationWorld) {
    world.messenger = RecordingPushMessenger::failing("flexchat-test", "service unavailable");
}

#[given(r#"a conversation "{id}" named "{name}""#)]
fn existing_conversation(
    world: &mut NotificationWorld,
    id: String,
    name: String,
) -> Result<(), eyre::Report> {
    let conversation = Conversation::builder(ConversationId::new(id), Utc::now())
        .with_name(name)
        .build();
    run_async(ConversationRepository::store(&world.store, &conversation))
        .wrap_err("store conversation for call scenario")?;
    Ok(())
}

#[given(r#"a call started by "{initiator}" in conversation "{conversation}""#)]
fn call_started(world: &mut NotificationWorld, initiator: String, conversation: String) {
    world.pending_call = Some(CallStarted {
        conversation_id: conversation,
        call_initiator_id: initiator,
        session_description: "v=0".to_owned(),
    });
}
