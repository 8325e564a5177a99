//! Broadcasts push notifications for chat events.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, info};

use super::templates::{CallTemplates, TemplateError};
use crate::chat::{
    adapters::MessageResponse,
    domain::{ConversationId, Message},
    ports::{ChatRepositoryError, ConversationRepository},
};
use crate::notification::{
    domain::{CallStarted, NotificationData, PushNotification, PushPayload},
    ports::{DeliveryReceipt, PushError, PushMessenger},
};
use mockable::Clock;

/// Errors returned when a notification could not be broadcast.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The push service failed the broadcast.
    #[error(transparent)]
    Push(#[from] PushError),
    /// The called conversation does not exist.
    #[error("conversation not found: {0}")]
    ConversationNotFound(ConversationId),
    /// Conversation lookup failed.
    #[error(transparent)]
    Repository(#[from] ChatRepositoryError),
    /// Notification text could not be rendered.
    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Single-shot notification dispatcher.
///
/// Each call handles one trigger independently; nothing is retried and no
/// state is kept between calls.
pub struct NotificationDispatcher<P, R, C>
where
    P: PushMessenger,
    R: ConversationRepository,
    C: Clock + Send + Sync,
{
    messenger: Arc<P>,
    conversations: Arc<R>,
    clock: Arc<C>,
    call_templates: CallTemplates,
}

impl<P, R, C> Clone for NotificationDispatcher<P, R, C>
where
    P: PushMessenger,
    R: ConversationRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            messenger: Arc::clone(&self.messenger),
            conversations: Arc::clone(&self.conversations),
            clock: Arc::clone(&self.clock),
            call_templates: self.call_templates.clone(),
        }
    }
}

impl<P, R, C> NotificationDispatcher<P, R, C>
where
    P: PushMessenger,
    R: ConversationRepository,
    C: Clock + Send + Sync,
{
    /// Creates a dispatcher with the default call templates.
    #[must_use]
    pub fn new(messenger: Arc<P>, conversations: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            messenger,
            conversations,
            clock,
            call_templates: CallTemplates::default(),
        }
    }

    /// Replaces the call notification templates.
    #[must_use]
    pub fn with_call_templates(mut self, call_templates: CallTemplates) -> Self {
        self.call_templates = call_templates;
        self
    }

    /// Broadcasts the notification for a newly created message to its
    /// conversation's topic.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Push`] when the push service fails.
    pub async fn dispatch_message(&self, message: &Message) -> DispatchResult<DeliveryReceipt> {
        let payload = PushPayload::for_message(message);
        self.send(&payload).await
    }

    /// Broadcasts the incoming-call notification for a started call.
    ///
    /// The conversation is looked up to name it in the title.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::ConversationNotFound`] when the conversation
    /// does not exist, [`DispatchError::Repository`] when lookup fails,
    /// [`DispatchError::Template`] when the title or body cannot be
    /// rendered, and [`DispatchError::Push`] when the push service fails.
    pub async fn dispatch_call(&self, call: &CallStarted) -> DispatchResult<DeliveryReceipt> {
        let conversation_id = ConversationId::new(call.conversation_id.clone());
        let conversation = self
            .conversations
            .find_by_id(&conversation_id)
            .await?
            .ok_or_else(|| DispatchError::ConversationNotFound(conversation_id.clone()))?;

        let (title, body) = self.call_templates.render(
            &conversation.conversation_name,
            conversation_id.as_str(),
            &call.call_initiator_id,
        )?;
        let payload = PushPayload {
            topic: conversation_id.as_str().to_owned(),
            notification: PushNotification {
                title,
                body,
                icon: None,
            },
            data: NotificationData::Call {
                call_initiator_id: call.call_initiator_id.clone(),
                conversation_id: conversation_id.as_str().to_owned(),
                session_description: call.session_description.clone(),
            },
        };
        self.send(&payload).await
    }

    /// Handles a `messages/{messageId}` creation trigger.
    ///
    /// Failures are logged and discarded; the triggering write is never
    /// failed by notification delivery.
    pub async fn on_message_created(&self, message_id: &str, snapshot: MessageResponse) {
        debug!(message_id, "message created");
        let message = snapshot.into_domain(&*self.clock);
        if let Err(err) = self.dispatch_message(&message).await {
            error!(
                message_id,
                conversation_id = %message.conversation_id,
                error = %err,
                "failed to send message notification"
            );
        }
    }

    /// Handles an `ongoing_call/{conversationId}` creation trigger.
    ///
    /// Failures are logged and discarded.
    pub async fn on_call_started(&self, call: &CallStarted) {
        debug!(conversation_id = %call.conversation_id, "call started");
        if let Err(err) = self.dispatch_call(call).await {
            error!(
                conversation_id = %call.conversation_id,
                error = %err,
                "failed to send call notification"
            );
        }
    }

    async fn send(&self, payload: &PushPayload) -> DispatchResult<DeliveryReceipt> {
        let receipt = self.messenger.send_to_topic(payload).await?;
        info!(
            topic = %payload.topic,
            notification_type = %payload.data.notification_type(),
            %receipt,
            "successfully sent notification"
        );
        Ok(receipt)
    }
}
