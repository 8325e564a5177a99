//! Application services for the chat context.

pub mod attachment;
pub mod conversation;

pub use attachment::{
    ATTACHMENT_PATH_PREFIX, AttachmentService, CreateAttachmentError, CreateAttachmentRequest,
    GetAttachmentError,
};
pub use conversation::{ConversationService, ConversationServiceError, ConversationServiceResult};
