//! Tests for the push messenger adapters.

use crate::chat::domain::Message;
use crate::notification::{
    adapters::{LoggingPushMessenger, RecordingPushMessenger},
    domain::PushPayload,
    ports::{PushError, PushMessenger},
};
use rstest::{fixture, rstest};

#[fixture]
fn payload() -> PushPayload {
    PushPayload::for_message(&Message {
        conversation_id: "c1".into(),
        user_id: "u1".into(),
        sender_name: "Alice".to_owned(),
        message_body: "hi".to_owned(),
        ..Message::empty()
    })
}

#[rstest]
#[tokio::test]
async fn recording_messenger_numbers_receipts(payload: PushPayload) {
    let messenger = RecordingPushMessenger::new("flexchat");

    let first = messenger
        .send_to_topic(&payload)
        .await
        .expect("send should succeed");
    let second = messenger
        .send_to_topic(&payload)
        .await
        .expect("send should succeed");

    assert_eq!(first.as_str(), "projects/flexchat/messages/1");
    assert_eq!(second.as_str(), "projects/flexchat/messages/2");
    assert_eq!(
        messenger.sent().expect("outbox should be readable"),
        vec![payload.clone(), payload]
    );
}

#[rstest]
#[tokio::test]
async fn failing_messenger_records_nothing(payload: PushPayload) {
    let messenger = RecordingPushMessenger::failing("flexchat", "quota exceeded");

    let result = messenger.send_to_topic(&payload).await;

    assert!(matches!(result, Err(PushError::Delivery(_))));
    assert!(messenger.sent().expect("outbox should be readable").is_empty());
}

#[rstest]
#[tokio::test]
async fn logging_messenger_issues_dry_run_receipt(payload: PushPayload) {
    let messenger = LoggingPushMessenger::new("flexchat");

    let receipt = messenger
        .send_to_topic(&payload)
        .await
        .expect("dry run should succeed");

    assert!(
        receipt
            .as_str()
            .starts_with("projects/flexchat/messages/dry-run-")
    );
}
