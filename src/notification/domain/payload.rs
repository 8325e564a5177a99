//! Topic broadcast payloads.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::chat::domain::{Message, UserId};

/// Kind of event a push payload announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationType {
    /// A new chat message.
    Message,
    /// An incoming call.
    Call,
}

impl NotificationType {
    /// Wire spelling carried in the `notificationType` data key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Message => "Message",
            Self::Call => "Call",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-visible part of a push payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushNotification {
    /// Notification title.
    pub title: String,
    /// Notification body.
    pub body: String,
    /// Icon URL, omitted when the sender has no photo.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Key-value data delivered to the receiving app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    into = "BTreeMap<String, String>",
    try_from = "BTreeMap<String, String>"
)]
pub enum NotificationData {
    /// Data for a new message.
    Message {
        /// Sender.
        user_id: String,
        /// Conversation the message was posted in.
        conversation_id: String,
    },
    /// Data for an incoming call.
    Call {
        /// User who started the call.
        call_initiator_id: String,
        /// Conversation being called.
        conversation_id: String,
        /// Opaque session offer.
        session_description: String,
    },
}

impl NotificationData {
    /// Kind of event this data describes.
    #[must_use]
    pub const fn notification_type(&self) -> NotificationType {
        match self {
            Self::Message { .. } => NotificationType::Message,
            Self::Call { .. } => NotificationType::Call,
        }
    }

    /// Conversation the event belongs to.
    #[must_use]
    pub fn conversation_id(&self) -> &str {
        match self {
            Self::Message {
                conversation_id, ..
            }
            | Self::Call {
                conversation_id, ..
            } => conversation_id,
        }
    }

    /// User whose action caused the event.
    #[must_use]
    pub fn originator(&self) -> &str {
        match self {
            Self::Message { user_id, .. } => user_id,
            Self::Call {
                call_initiator_id, ..
            } => call_initiator_id,
        }
    }
}

impl From<NotificationData> for BTreeMap<String, String> {
    fn from(data: NotificationData) -> Self {
        let notification_type = data.notification_type();
        let mut map = match data {
            NotificationData::Message {
                user_id,
                conversation_id,
            } => Self::from([
                ("userId".to_owned(), user_id),
                ("conversationId".to_owned(), conversation_id),
            ]),
            NotificationData::Call {
                call_initiator_id,
                conversation_id,
                session_description,
            } => Self::from([
                ("callInitiatorId".to_owned(), call_initiator_id),
                ("conversationId".to_owned(), conversation_id),
                ("sessionDescription".to_owned(), session_description),
            ]),
        };
        map.insert(
            "notificationType".to_owned(),
            notification_type.as_str().to_owned(),
        );
        map
    }
}

impl TryFrom<BTreeMap<String, String>> for NotificationData {
    type Error = String;

    fn try_from(mut map: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        let mut take = |key: &str| map.remove(key).unwrap_or_default();
        match take("notificationType").as_str() {
            "Call" => Ok(Self::Call {
                call_initiator_id: take("callInitiatorId"),
                conversation_id: take("conversationId"),
                session_description: take("sessionDescription"),
            }),
            "Message" | "" => Ok(Self::Message {
                user_id: take("userId"),
                conversation_id: take("conversationId"),
            }),
            other => Err(format!("unknown notification type: {other}")),
        }
    }
}

/// A push notification addressed to a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushPayload {
    /// Topic the payload is broadcast to; the conversation identifier.
    pub topic: String,
    /// User-visible notification.
    pub notification: PushNotification,
    /// Data delivered to the app.
    pub data: NotificationData,
}

impl PushPayload {
    /// Builds the payload announcing a newly created message.
    ///
    /// The title is the sender's name, the body is the message text, and
    /// the icon is the sender's photo. The payload is broadcast to the
    /// message's conversation. A blank photo URL leaves the icon out;
    /// any other URL is sent exactly as stored.
    #[must_use]
    pub fn for_message(message: &Message) -> Self {
        let photo = &message.sender_photo_url;
        Self {
            topic: message.conversation_id.as_str().to_owned(),
            notification: PushNotification {
                title: message.sender_name.clone(),
                body: message.message_body.clone(),
                icon: (!photo.trim().is_empty()).then(|| photo.clone()),
            },
            data: NotificationData::Message {
                user_id: message.user_id.as_str().to_owned(),
                conversation_id: message.conversation_id.as_str().to_owned(),
            },
        }
    }

    /// Returns `true` when `user_id` caused this notification.
    ///
    /// Receiving apps use this to suppress notifications about the
    /// current user's own actions.
    #[must_use]
    pub fn is_from(&self, user_id: &UserId) -> bool {
        !user_id.is_empty() && self.data.originator() == user_id.as_str()
    }
}
