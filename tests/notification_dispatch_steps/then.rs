//! Then steps for notification dispatch BDD scenarios.

use super::world::NotificationWorld;
use flexchat::notification::{domain::PushPayload, ports::PushError, services::DispatchError};
use rstest_bdd_macros::then;

fn only_payload(world: &NotificationWorld) -> Result<PushPayload, eyre::Report> {
    let sent = world
        .messenger
        .sent()
        .map_err(|err| eyre::eyre!("outbox unreadable: {err}"))?;
    match sent.as_slice() {
        [payload] => Ok(payload.clone()),
        other => Err(eyre::eyre!(
            "expected exactly one notification, found {}",
            other.len()
        )),
    }
}

#[then(r#"exactly one notification is sent to topic "{topic}""#)]
fn one_notification_to_topic(
    world: &NotificationWorld,
    topic: String,
) -> Result<(), eyre::Report> {
    let payload = only_payload(world)?;
    if payload.topic != topic {
        return Err(eyre::eyre!("expected topic {topic}, found {}", payload.topic));
    }
    Ok(())
}

#[then(r#"the notification title is "{title}""#)]
fn notification_title(world: &NotificationWorld, title: String) -> Result<(), eyre::Report> {
    let payload = only_payload(world)?;
    if payload.notification.title != title {
        return Err(eyre::eyre!(
            "expected title {title:?}, found {:?}",
            payload.notification.title
        ));
    }
    Ok(())
}

#[then(r#"the notification body is "{body}""#)]
fn notification_body(world: &NotificationWorld, body: String) -> Result<(), eyre::Report> {
    let payload = only_payload(world)?;
    if payload.notification.body != body {
        return Err(eyre::eyre!(
            "expected body {body:?}, found {:?}",
            payload.notification.body
        ));
    }
    Ok(())
}

#[then(r#"the notification type is "{kind}""#)]
fn notification_type(world: &NotificationWorld, kind: String) -> Result<(), eyre::Report> {
    let payload = only_payload(world)?;
    let actual = payload.data.notification_type();
    if actual.as_str() != kind {
        return Err(eyre::eyre!("expected type {kind}, found {actual}"));
    }
    Ok(())
}

#[then("dispatch fails with a push error")]
fn dispatch_failed_with_push_error(world: &NotificationWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_dispatch_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing dispatch result in scenario world"))?;
    if !matches!(result, Err(DispatchError::Push(PushError::Delivery(_)))) {
        return Err(eyre::eyre!("expected push delivery error, got {result:?}"));
    }
    Ok(())
}

#[then("dispatch fails because the conversation was not found")]
fn dispatch_failed_with_missing_conversation(
    world: &NotificationWorld,
) -> Result<(), eyre::Report> {
    let result = world
        .last_dispatch_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing dispatch result in scenario world"))?;
    if !matches!(result, Err(DispatchError::ConversationNotFound(_))) {
        return Err(eyre::eyre!(
            "expected conversation-not-found error, got {result:?}"
        ));
    }
    Ok(())
}

#[then("no notification is sent")]
fn no_notification_sent(world: &NotificationWorld) -> Result<(), eyre::Report> {
    let sent = world
        .messenger
        .sent()
        .map_err(|err| eyre::eyre!("outbox unreadable: {err}"))?;
    if !sent.is_empty() {
        return Err(eyre::eyre!("expected no notifications, found {}", sent.len()));
    }
    Ok(())
}
