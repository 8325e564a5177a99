//! Sends the push notification for one newly created chat message.
//!
//! Usage:
//!
//! ```text
//! message_notification <message-id> < snapshot.json
//! ```
//!
//! Standard input carries the `messages/{messageId}` document snapshot as
//! JSON, for example:
//!
//! ```json
//! {
//!   "id": "m1",
//!   "conversationId": "c1",
//!   "userId": "u1",
//!   "senderName": "Alice",
//!   "senderPhotoUrl": "https://img.example/alice.png",
//!   "messageBody": "hi",
//!   "createdAt": { "_seconds": 1700000000, "_nanoseconds": 0 }
//! }
//! ```
//!
//! Configuration comes from `FLEXCHAT_`-prefixed environment variables.
//! Broadcasts go to Firebase Cloud Messaging with the configured service
//! account, or only to the log when `FLEXCHAT_DRY_RUN=true`. Delivery
//! failures are logged and the process still exits successfully, so a
//! trigger is never retried because of notification delivery.

use std::io::{self, Read};
use std::sync::Arc;

use flexchat::chat::adapters::{MessageResponse, memory::InMemoryChatStore};
use flexchat::config::AppConfig;
use flexchat::notification::{
    adapters::{FcmError, FcmPushMessenger, LoggingPushMessenger},
    ports::PushMessenger,
    services::NotificationDispatcher,
};
use flexchat::telemetry;
use mockable::DefaultClock;
use thiserror::Error;
use tracing::debug;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that stop the trigger before dispatch.
#[derive(Debug, Error)]
enum TriggerError {
    /// Invalid command-line arguments.
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
    /// The snapshot could not be read from standard input.
    #[error("failed to read snapshot: {0}")]
    SnapshotRead(#[source] io::Error),
    /// The snapshot is not a message document.
    #[error("failed to parse snapshot: {0}")]
    SnapshotParse(#[source] serde_json::Error),
    /// The async runtime could not be started.
    #[error("failed to initialise runtime: {0}")]
    RuntimeInit(#[source] io::Error),
    /// The push messenger could not be built from the service account.
    #[error("failed to initialise push messenger: {0}")]
    Messenger(#[source] FcmError),
}

fn main() -> Result<(), BoxError> {
    let config = AppConfig::from_env()?;
    let installed = telemetry::init(&config.log_filter);
    debug!(installed, region = %config.region, "telemetry ready");

    let message_id = parse_args(std::env::args().skip(1))?;
    let snapshot = read_snapshot(io::stdin().lock())?;
    run(&config, &message_id, snapshot)?;
    Ok(())
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<String, TriggerError> {
    let message_id = args
        .next()
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| TriggerError::InvalidArgs("missing message id argument".into()))?;
    if let Some(extra) = args.next() {
        return Err(TriggerError::InvalidArgs(format!(
            "unexpected argument: {extra}"
        )));
    }
    Ok(message_id)
}

fn read_snapshot(mut input: impl Read) -> Result<MessageResponse, TriggerError> {
    let mut raw = String::new();
    input
        .read_to_string(&mut raw)
        .map_err(TriggerError::SnapshotRead)?;
    serde_json::from_str(&raw).map_err(TriggerError::SnapshotParse)
}

fn run(
    config: &AppConfig,
    message_id: &str,
    snapshot: MessageResponse,
) -> Result<(), TriggerError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(TriggerError::RuntimeInit)?;
    let message = with_path_id(snapshot, message_id);
    if config.dry_run {
        let messenger = LoggingPushMessenger::new(config.project_id.clone());
        runtime.block_on(notify(config, Arc::new(messenger), message_id, message));
    } else {
        let messenger = FcmPushMessenger::new(config.service_account())
            .map_err(TriggerError::Messenger)?
            .with_endpoint(config.fcm_endpoint.clone());
        runtime.block_on(notify(config, Arc::new(messenger), message_id, message));
    }
    Ok(())
}

async fn notify<P>(
    config: &AppConfig,
    messenger: Arc<P>,
    message_id: &str,
    message: MessageResponse,
) where
    P: PushMessenger,
{
    let dispatcher = NotificationDispatcher::new(
        messenger,
        Arc::new(InMemoryChatStore::new()),
        Arc::new(DefaultClock),
    )
    .with_call_templates(config.call_templates());
    dispatcher.on_message_created(message_id, message).await;
}

/// Fills a missing document id from the trigger path.
fn with_path_id(snapshot: MessageResponse, message_id: &str) -> MessageResponse {
    if snapshot.id.trim().is_empty() {
        MessageResponse {
            id: message_id.to_owned(),
            ..snapshot
        }
    } else {
        snapshot
    }
}
