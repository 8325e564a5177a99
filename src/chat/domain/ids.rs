//! Document identifier newtypes.
//!
//! Identifiers are opaque strings assigned by the document store. An empty
//! identifier is valid in memory and means "not yet persisted".

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! document_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps a document identifier.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns `true` when no identifier has been assigned.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.0.trim().is_empty()
            }

            /// Returns the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

document_id!(
    /// Identifier of a user document.
    UserId
);

document_id!(
    /// Identifier of a conversation document.
    ///
    /// Also used as the push-messaging topic for the conversation.
    ConversationId
);

document_id!(
    /// Identifier of a conversation membership document.
    ConversationMemberId
);

document_id!(
    /// Identifier of a message document.
    MessageId
);

document_id!(
    /// Identifier of an attachment document.
    AttachmentId
);
