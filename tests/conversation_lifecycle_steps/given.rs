//! Given steps for conversation lifecycle BDD scenarios.

use super::world::{ConversationWorld, run_async};
use eyre::WrapErr;
use flexchat::chat::domain::{AuthenticatedIdentity, User};
use mockable::DefaultClock;
use rstest_bdd_macros::given;

#[given(r#"registered users "{first}" and "{second}""#)]
fn registered_users(world: &mut ConversationWorld, first: String, second: String) {
    for name in [first, second] {
        let user = User::from_identity(
            AuthenticatedIdentity {
                uid: format!("uid-{}", name.to_lowercase()),
                display_name: Some(name.clone()),
                email: Some(format!("{}@example.com", name.to_lowercase())),
                ..AuthenticatedIdentity::default()
            },
            &DefaultClock,
        );
        world.users.insert(name, user);
    }
}

#[given(r#""{opener}" has opened a conversation with "{other}""#)]
fn conversation_already_opened(
    world: &mut ConversationWorld,
    opener: String,
    other: String,
) -> Result<(), eyre::Report> {
    let participants = [world.user(&opener)?, world.user(&other)?];
    let conversation = run_async(world.service.find_or_create(&participants))
        .wrap_err("open initial conversation")?;
    world.first_conversation = Some(conversation);
    Ok(())
}
