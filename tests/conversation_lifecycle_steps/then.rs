//! Then steps for conversation lifecycle BDD scenarios.

use super::world::{ConversationWorld, run_async};
use flexchat::chat::{domain::Conversation, ports::ConversationRepository};
use rstest_bdd_macros::then;

fn reload(world: &ConversationWorld) -> Result<Conversation, eyre::Report> {
    let id = world.current_conversation()?.id.clone();
    run_async(world.store.find_by_id(&id))
        .map_err(|err| eyre::eyre!("lookup failed: {err}"))?
        .ok_or_else(|| eyre::eyre!("conversation {id} disappeared from the store"))
}

#[then(r#"a one-to-one conversation named "{name}" exists with slug "{slug}""#)]
fn one_to_one_conversation(
    world: &ConversationWorld,
    name: String,
    slug: String,
) -> Result<(), eyre::Report> {
    let conversation = reload(world)?;
    if conversation.is_group {
        return Err(eyre::eyre!("expected a one-to-one conversation"));
    }
    if conversation.conversation_name != name {
        return Err(eyre::eyre!(
            "expected name {name:?}, found {:?}",
            conversation.conversation_name
        ));
    }
    if conversation.slug != slug {
        return Err(eyre::eyre!(
            "expected slug {slug:?}, found {:?}",
            conversation.slug
        ));
    }
    Ok(())
}

#[then("the conversation has no latest message")]
fn no_latest_message(world: &ConversationWorld) -> Result<(), eyre::Report> {
    if !reload(world)?.latest_message().is_empty() {
        return Err(eyre::eyre!("expected the empty latest-message sentinel"));
    }
    Ok(())
}

#[then("the same conversation is returned")]
fn same_conversation_returned(world: &ConversationWorld) -> Result<(), eyre::Report> {
    let first = world
        .first_conversation
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing first conversation in scenario world"))?;
    let reopened = world.current_conversation()?;
    if first.id != reopened.id {
        return Err(eyre::eyre!(
            "expected conversation {}, got {}",
            first.id,
            reopened.id
        ));
    }
    Ok(())
}

#[then(r#"the latest message is "{body}" from "{sender}""#)]
fn latest_message_is(
    world: &ConversationWorld,
    body: String,
    sender: String,
) -> Result<(), eyre::Report> {
    let conversation = reload(world)?;
    let latest = conversation.latest_message();
    if latest.message_body != body || latest.sender_name != sender {
        return Err(eyre::eyre!(
            "expected {body:?} from {sender}, found {:?} from {}",
            latest.message_body,
            latest.sender_name
        ));
    }
    Ok(())
}

#[then("the conversation holds {count:usize} messages")]
fn conversation_holds(world: &ConversationWorld, count: usize) -> Result<(), eyre::Report> {
    let held = reload(world)?.messages().len();
    if held != count {
        return Err(eyre::eyre!("expected {count} messages, found {held}"));
    }
    Ok(())
}
