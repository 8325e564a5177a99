//! Adapters for the chat context: wire records, their mapping to domain
//! records, and in-memory implementations of the chat ports.

pub mod mapping;
pub mod memory;
pub mod models;
pub mod timestamp;

pub use models::{
    AttachmentResponse, ConversationMemberResponse, ConversationResponse, MessageResponse,
    UserResponse,
};
pub use timestamp::WireTimestamp;
