//! When steps for notification dispatch BDD scenarios.

use super::world::{NotificationWorld, run_async};
use flexchat::chat::adapters::MessageResponse;
use rstest_bdd_macros::when;

#[when("the message notification is dispatched")]
fn dispatch_message(world: &mut NotificationWorld) -> Result<(), eyre::Report> {
    let message = world
        .pending_message
        .clone()
        .ok_or_else(|| eyre::eyre!("missing pending message in scenario world"))?;
    let dispatcher = world.dispatcher();
    world.last_dispatch_result = Some(run_async(dispatcher.dispatch_message(&message)));
    Ok(())
}

#[when(r#"the trigger fires for message "{id}" from "{sender}" in conversation "{conversation}""#)]
fn trigger_fires(world: &mut NotificationWorld, id: String, sender: String, conversation: String) {
    let snapshot = MessageResponse {
        id: id.clone(),
        conversation_id: conversation,
        sender_name: sender,
        message_body: "hi".to_owned(),
        ..MessageResponse::default()
    };
    let dispatcher = world.dispatcher();
    run_async(dispatcher.on_message_created(&id, snapshot));
}

#[when("the call notification is dispatched")]
fn dispatch_call(world: &mut NotificationWorld) -> Result<(), eyre::Report> {
    let call = world
        .pending_call
        .clone()
        .ok_or_else(|| eyre::eyre!("missing pending call in scenario world"))?;
    let dispatcher = world.dispatcher();
    world.last_dispatch_result = Some(run_async(dispatcher.dispatch_call(&call)));
    Ok(())
}
