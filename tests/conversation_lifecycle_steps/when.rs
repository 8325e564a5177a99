//! When steps for conversation lifecycle BDD scenarios.

use super::world::{ConversationWorld, run_async};
use chrono::Duration;
use eyre::WrapErr;
use flexchat::chat::{domain::Message, ports::MessageRepository};
use mockable::DefaultClock;
use rstest_bdd_macros::when;

#[when(r#""{opener}" opens a conversation with "{other}""#)]
fn open_conversation(
    world: &mut ConversationWorld,
    opener: String,
    other: String,
) -> Result<(), eyre::Report> {
    let participants = [world.user(&opener)?, world.user(&other)?];
    world.last_result = Some(run_async(world.service.find_or_create(&participants)));
    Ok(())
}

#[when(r#""{sender}" sends "{body}""#)]
fn send_message(
    world: &mut ConversationWorld,
    sender: String,
    body: String,
) -> Result<(), eyre::Report> {
    let conversation = world.current_conversation()?.clone();
    let user = world.user(&sender)?;
    let member = conversation
        .members()
        .iter()
        .find(|member| member.user_id == user.id)
        .ok_or_else(|| eyre::eyre!("{sender} is not a member of the conversation"))?;
    let draft = Message::compose(member, body, &DefaultClock);
    let message = Message {
        created_at: draft.created_at + Duration::seconds(world.messages_sent),
        ..draft
    };
    world.messages_sent += 1;
    run_async(world.store.append(&message)).wrap_err("append message")?;
    Ok(())
}
