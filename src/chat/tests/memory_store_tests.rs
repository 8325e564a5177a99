//! Tests for the in-memory chat document store.

use std::sync::Arc;

use super::FixedClock;
use crate::chat::{
    adapters::{ConversationMemberResponse, ConversationResponse, memory::InMemoryChatStore},
    domain::{
        Attachment, AttachmentId, AuthenticatedIdentity, Conversation, ConversationId,
        ConversationMember, Message, MessageId, User, UserId,
    },
    ports::{AttachmentRepository, ChatRepositoryError, ConversationRepository, MessageRepository},
};
use chrono::Duration;
use rstest::{fixture, rstest};

type TestStore = InMemoryChatStore<FixedClock>;

#[fixture]
fn clock() -> FixedClock {
    FixedClock::at(1_700_000_000)
}

#[fixture]
fn store(clock: FixedClock) -> TestStore {
    InMemoryChatStore::with_clock(Arc::new(clock))
}

fn user(name: &str, clock: &FixedClock) -> User {
    User::from_identity(
        AuthenticatedIdentity {
            uid: format!("uid-{name}"),
            display_name: Some(name.to_owned()),
            ..AuthenticatedIdentity::default()
        },
        clock,
    )
}

fn draft_conversation(slug: &str, clock: &FixedClock) -> Conversation {
    let members = ["alice", "bob"]
        .into_iter()
        .map(|name| ConversationMember::join(&user(name, clock), ConversationId::default(), clock))
        .collect();
    Conversation::builder(ConversationId::default(), clock.0)
        .with_slug(slug)
        .with_members(members)
        .build()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_assigns_ids_and_links_members(store: TestStore, clock: FixedClock) {
    let stored = ConversationRepository::store(&store, &draft_conversation("alice,bob", &clock))
        .await
        .expect("conversation should be stored");

    assert!(!stored.id.is_empty());
    assert_eq!(stored.members().len(), 2);
    assert_eq!(stored.conversation_member_ids.len(), 2);
    for member in stored.members() {
        assert!(!member.id.is_empty());
        assert_eq!(member.conversation_id, stored.id);
    }

    let fetched = store
        .find_by_id(&stored.id)
        .await
        .expect("lookup should succeed");
    assert_eq!(fetched, Some(stored));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_rejects_duplicate_identifier(store: TestStore, clock: FixedClock) {
    let conversation = Conversation::builder(ConversationId::new("c1"), clock.0).build();
    ConversationRepository::store(&store, &conversation)
        .await
        .expect("first store should succeed");

    let result = ConversationRepository::store(&store, &conversation).await;

    assert!(matches!(
        result,
        Err(ChatRepositoryError::DuplicateConversation(ref id)) if id.as_str() == "c1"
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_by_slug_skips_deleted_conversations(store: TestStore, clock: FixedClock) {
    let deleted = Conversation::builder(ConversationId::new("gone"), clock.0)
        .with_slug("alice,bob")
        .deleted_at(Some(clock.0))
        .build();
    ConversationRepository::store(&store, &deleted)
        .await
        .expect("store should succeed");

    let before = store
        .find_by_slug("alice,bob")
        .await
        .expect("lookup should succeed");
    assert!(before.is_none());

    let live = ConversationRepository::store(&store, &draft_conversation("alice,bob", &clock))
        .await
        .expect("store should succeed");
    let after = store
        .find_by_slug("alice,bob")
        .await
        .expect("lookup should succeed");
    assert_eq!(after.map(|c| c.id), Some(live.id));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_by_slug_prefers_oldest_conversation(store: TestStore, clock: FixedClock) {
    let newer = Conversation::builder(ConversationId::new("newer"), clock.0 + Duration::hours(1))
        .with_slug("alice,bob")
        .build();
    let older = Conversation::builder(ConversationId::new("older"), clock.0)
        .with_slug("alice,bob")
        .build();
    for conversation in [&newer, &older] {
        ConversationRepository::store(&store, conversation)
            .await
            .expect("store should succeed");
    }

    let found = store
        .find_by_slug("alice,bob")
        .await
        .expect("lookup should succeed");

    assert_eq!(found.map(|c| c.id), Some(ConversationId::new("older")));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn appended_messages_become_latest_message(store: TestStore, clock: FixedClock) {
    let conversation = ConversationRepository::store(&store, &draft_conversation("a,b", &clock))
        .await
        .expect("store should succeed");
    let sender = conversation
        .members()
        .first()
        .cloned()
        .expect("conversation should have members");

    let first = Message::compose(&sender, "first", &clock);
    let second = Message {
        created_at: clock.0 + Duration::seconds(5),
        ..Message::compose(&sender, "second", &clock)
    };
    let stored_first = store.append(&first).await.expect("append should succeed");
    let stored_second = store.append(&second).await.expect("append should succeed");

    let reloaded = store
        .find_by_id(&conversation.id)
        .await
        .expect("lookup should succeed")
        .expect("conversation should exist");
    assert_eq!(reloaded.latest_message(), &stored_second);
    assert_eq!(reloaded.messages().len(), 2);
    let reloaded_sender = reloaded
        .members()
        .iter()
        .find(|member| member.id == sender.id)
        .expect("sender should still be a member");
    assert_eq!(
        reloaded_sender.message_ids,
        vec![stored_first.id.clone(), stored_second.id.clone()]
    );

    let listed = MessageRepository::find_by_conversation(&store, &conversation.id)
        .await
        .expect("listing should succeed");
    assert_eq!(listed, vec![stored_second, stored_first]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn append_to_unknown_conversation_fails(store: TestStore, clock: FixedClock) {
    let message = Message {
        conversation_id: ConversationId::new("missing"),
        created_at: clock.0,
        ..Message::empty()
    };

    let result = store.append(&message).await;

    assert!(matches!(
        result,
        Err(ChatRepositoryError::ConversationNotFound(_))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn pending_server_timestamps_are_backfilled_on_read(store: TestStore, clock: FixedClock) {
    store
        .insert_member_document(ConversationMemberResponse {
            id: "cm1".to_owned(),
            conversation_id: "c1".to_owned(),
            ..ConversationMemberResponse::default()
        })
        .expect("seed should succeed");
    store
        .insert_conversation_document(ConversationResponse {
            id: "c1".to_owned(),
            conversation_member_ids: vec!["cm1".to_owned()],
            ..ConversationResponse::default()
        })
        .expect("seed should succeed");

    let conversation = store
        .find_by_id(&ConversationId::new("c1"))
        .await
        .expect("lookup should succeed")
        .expect("conversation should exist");

    assert_eq!(conversation.created_at, clock.0);
    let member = conversation
        .members()
        .first()
        .expect("member should be attached");
    assert_eq!(member.joined_at, clock.0);
    assert!(member.left_at.is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn attachments_are_found_by_message_conversation_and_user(
    store: TestStore,
    clock: FixedClock,
) {
    let live = Attachment {
        id: AttachmentId::default(),
        user_id: UserId::new("u1"),
        conversation_id: ConversationId::new("c1"),
        message_id: MessageId::new("m1"),
        url: "https://files.example/attachments/a.png".to_owned(),
        name: "a.png".to_owned(),
        mime_type: "image/png".to_owned(),
        created_at: clock.0,
        deleted_at: None,
    };
    let deleted = Attachment {
        name: "b.png".to_owned(),
        deleted_at: Some(clock.0),
        ..live.clone()
    };
    let stored = AttachmentRepository::store(&store, &live)
        .await
        .expect("store should succeed");
    AttachmentRepository::store(&store, &deleted)
        .await
        .expect("store should succeed");

    let by_message = store
        .find_by_message(&MessageId::new("m1"))
        .await
        .expect("lookup should succeed");
    let by_conversation =
        AttachmentRepository::find_by_conversation(&store, &ConversationId::new("c1"))
            .await
            .expect("lookup should succeed");
    let by_user = store
        .find_by_user(&UserId::new("u1"))
        .await
        .expect("lookup should succeed");

    assert!(!stored.id.is_empty());
    assert_eq!(by_message, vec![stored.clone()]);
    assert_eq!(by_conversation, vec![stored.clone()]);
    assert_eq!(by_user, vec![stored]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn clones_over_the_system_clock_share_documents() {
    let clock = FixedClock::at(1_700_000_000);
    let original = InMemoryChatStore::new();
    let cloned = original.clone();

    let stored = ConversationRepository::store(&cloned, &draft_conversation("alice,bob", &clock))
        .await
        .expect("conversation should be stored");
    let found = original
        .find_by_id(&stored.id)
        .await
        .expect("lookup should succeed");

    assert_eq!(found.map(|conversation| conversation.id), Some(stored.id));
    assert!(format!("{original:?}").starts_with("InMemoryChatStore"));
}
