//! Collaborator ports for the chat context.

pub mod repository;
pub mod storage;

pub use repository::{
    AttachmentRepository, ChatRepositoryError, ChatRepositoryResult, ConversationRepository,
    MessageRepository,
};
pub use storage::{FileStorage, FileStorageError, FileStorageResult, FileUpload, UploadProgress};
