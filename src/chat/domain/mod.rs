//! Chat domain records.
//!
//! All records are immutable values in application memory; a change is a
//! new record. Soft-deleted entities keep their data and carry a deletion
//! timestamp.

pub mod attachment;
pub mod conversation;
pub mod ids;
pub mod member;
pub mod message;
pub mod slug;
pub mod user;

pub use attachment::Attachment;
pub use conversation::{Conversation, ConversationBuilder};
pub use ids::{AttachmentId, ConversationId, ConversationMemberId, MessageId, UserId};
pub use member::ConversationMember;
pub use message::Message;
pub use slug::{conversation_display_name, conversation_slug};
pub use user::{AuthenticatedIdentity, DEFAULT_STATUS, User};
