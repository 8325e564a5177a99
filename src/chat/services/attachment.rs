//! Validated attachment upload and lookup.

use crate::chat::{
    domain::{Attachment, AttachmentId, ConversationId, MessageId, UserId},
    ports::{
        AttachmentRepository, ChatRepositoryError, FileStorage, FileStorageError, FileUpload,
        UploadProgress,
    },
};
use mockable::Clock;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};

/// Object path prefix for uploaded attachments.
pub const ATTACHMENT_PATH_PREFIX: &str = "attachments";

/// Request payload for attaching a file to a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAttachmentRequest {
    user_id: UserId,
    conversation_id: ConversationId,
    message_id: MessageId,
    file_name: String,
    mime_type: String,
    bytes: Vec<u8>,
}

impl CreateAttachmentRequest {
    /// Creates a request for `bytes` uploaded as `file_name`.
    #[must_use]
    pub fn new(
        user_id: impl Into<UserId>,
        conversation_id: impl Into<ConversationId>,
        message_id: impl Into<MessageId>,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            conversation_id: conversation_id.into(),
            message_id: message_id.into(),
            file_name: file_name.into(),
            mime_type: String::new(),
            bytes,
        }
    }

    /// Sets the MIME type recorded as the object's content type.
    #[must_use]
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    /// Object path the file is uploaded to.
    #[must_use]
    pub fn storage_path(&self) -> String {
        format!("{ATTACHMENT_PATH_PREFIX}/{}", self.file_name)
    }

    fn validate(&self) -> Result<(), CreateAttachmentError> {
        if self.user_id.is_empty() {
            return Err(CreateAttachmentError::UserIdEmptyOrBlank);
        }
        if self.message_id.is_empty() {
            return Err(CreateAttachmentError::MessageIdEmptyOrBlank);
        }
        if self.conversation_id.is_empty() {
            return Err(CreateAttachmentError::ConversationIdEmptyOrBlank);
        }
        if self.bytes.is_empty() {
            return Err(CreateAttachmentError::FileEmpty);
        }
        Ok(())
    }

    fn metadata(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("userId".to_owned(), self.user_id.as_str().to_owned()),
            (
                "conversationId".to_owned(),
                self.conversation_id.as_str().to_owned(),
            ),
            ("messageId".to_owned(), self.message_id.as_str().to_owned()),
        ])
    }
}

/// Errors returned when creating an attachment.
#[derive(Debug, Error)]
pub enum CreateAttachmentError {
    /// The uploading user identifier is empty or blank.
    #[error("user id should not be empty or blank")]
    UserIdEmptyOrBlank,
    /// The message identifier is empty or blank.
    #[error("message id should not be empty or blank")]
    MessageIdEmptyOrBlank,
    /// The conversation identifier is empty or blank.
    #[error("conversation id should not be empty or blank")]
    ConversationIdEmptyOrBlank,
    /// No file contents were supplied.
    #[error("file should not be empty")]
    FileEmpty,
    /// The upload to file storage failed.
    #[error("failed to insert file to storage: {0}")]
    FailedToInsertToStorage(#[source] FileStorageError),
    /// File storage could not produce a download URL.
    #[error("failed to retrieve download url: {0}")]
    FailedToRetrieveDownloadUrl(#[source] FileStorageError),
    /// File storage produced an empty or blank download URL.
    #[error("download url should not be empty or blank")]
    DownloadUrlEmptyOrBlank,
    /// The attachment document could not be written.
    #[error("failed to insert attachment to database: {0}")]
    FailedToInsertToDatabase(#[source] ChatRepositoryError),
}

impl From<FileStorageError> for CreateAttachmentError {
    fn from(err: FileStorageError) -> Self {
        match err {
            FileStorageError::Upload(_) => Self::FailedToInsertToStorage(err),
            FileStorageError::DownloadUrl(_) => Self::FailedToRetrieveDownloadUrl(err),
        }
    }
}

/// Errors returned when looking attachments up.
#[derive(Debug, Error)]
pub enum GetAttachmentError {
    /// A lookup key was empty or blank.
    #[error("invalid argument: {field}")]
    ArgumentError {
        /// Wire name of the offending field.
        field: &'static str,
    },
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ChatRepositoryError),
}

/// Attachment orchestration service.
pub struct AttachmentService<R, S, C>
where
    R: AttachmentRepository,
    S: FileStorage,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    storage: Arc<S>,
    clock: Arc<C>,
}

impl<R, S, C> Clone for AttachmentService<R, S, C>
where
    R: AttachmentRepository,
    S: FileStorage,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            storage: Arc::clone(&self.storage),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, S, C> AttachmentService<R, S, C>
where
    R: AttachmentRepository,
    S: FileStorage,
    C: Clock + Send + Sync,
{
    /// Creates a new attachment service.
    #[must_use]
    pub const fn new(repository: Arc<R>, storage: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            repository,
            storage,
            clock,
        }
    }

    /// Uploads a file and records it as an attachment of a message.
    ///
    /// Identifiers are checked in the order user, message, conversation,
    /// then the file contents. The file is uploaded under
    /// [`ATTACHMENT_PATH_PREFIX`] with the identifiers as object metadata,
    /// and `on_progress` observes the transfer.
    ///
    /// # Errors
    ///
    /// Returns the first failed [`CreateAttachmentError`] check, or the
    /// collaborator failure wrapped in the matching variant.
    pub async fn create(
        &self,
        request: CreateAttachmentRequest,
        on_progress: Option<&(dyn Fn(UploadProgress) + Send + Sync)>,
    ) -> Result<Attachment, CreateAttachmentError> {
        request.validate()?;

        let path = request.storage_path();
        let upload = FileUpload {
            path: path.clone(),
            bytes: &request.bytes,
            mime_type: request.mime_type.clone(),
            metadata: request.metadata(),
        };
        let url = self.storage.upload(upload, on_progress).await.map_err(|err| {
            error!(%path, error = %err, "attachment upload failed");
            CreateAttachmentError::from(err)
        })?;
        if url.trim().is_empty() {
            return Err(CreateAttachmentError::DownloadUrlEmptyOrBlank);
        }
        debug!(%path, %url, "attachment uploaded");

        let draft = Attachment {
            id: AttachmentId::default(),
            user_id: request.user_id,
            conversation_id: request.conversation_id,
            message_id: request.message_id,
            url,
            name: request.file_name,
            mime_type: request.mime_type,
            created_at: self.clock.utc(),
            deleted_at: None,
        };
        let stored = self
            .repository
            .store(&draft)
            .await
            .map_err(CreateAttachmentError::FailedToInsertToDatabase)?;
        info!(
            attachment_id = %stored.id,
            message_id = %stored.message_id,
            "attachment created"
        );
        Ok(stored)
    }

    /// Returns the live attachments of a message.
    ///
    /// An empty list means the message has no attachments.
    ///
    /// # Errors
    ///
    /// Returns [`GetAttachmentError::ArgumentError`] for a blank message id
    /// and [`GetAttachmentError::Repository`] when lookup fails.
    pub async fn find_by_message(
        &self,
        message_id: &MessageId,
    ) -> Result<Vec<Attachment>, GetAttachmentError> {
        if message_id.is_empty() {
            return Err(GetAttachmentError::ArgumentError { field: "messageId" });
        }
        Ok(self.repository.find_by_message(message_id).await?)
    }

    /// Returns the live attachments shared in a conversation.
    ///
    /// # Errors
    ///
    /// Returns [`GetAttachmentError::ArgumentError`] for a blank
    /// conversation id and [`GetAttachmentError::Repository`] when lookup
    /// fails.
    pub async fn find_by_conversation(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Vec<Attachment>, GetAttachmentError> {
        if conversation_id.is_empty() {
            return Err(GetAttachmentError::ArgumentError {
                field: "conversationId",
            });
        }
        Ok(self.repository.find_by_conversation(conversation_id).await?)
    }

    /// Returns the live attachments a user has uploaded.
    ///
    /// # Errors
    ///
    /// Returns [`GetAttachmentError::ArgumentError`] for a blank user id
    /// and [`GetAttachmentError::Repository`] when lookup fails.
    pub async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Attachment>, GetAttachmentError> {
        if user_id.is_empty() {
            return Err(GetAttachmentError::ArgumentError { field: "userId" });
        }
        Ok(self.repository.find_by_user(user_id).await?)
    }
}
