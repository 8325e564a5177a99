//! Registered users.

use super::{Conversation, ConversationId, ConversationMember, ConversationMemberId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;

/// Status text given to newly registered users.
pub const DEFAULT_STATUS: &str = "Welcome to FlexChat";

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Document identifier; matches the authentication subject.
    pub id: UserId,
    /// Display name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Password as stored in the user document.
    ///
    /// The document store persists this field verbatim; see the project
    /// design notes before relying on it.
    pub password: String,
    /// Phone number.
    pub phone_number: String,
    /// Profile photo URL.
    pub photo_profile_url: String,
    /// Free-form status text.
    pub status: String,
    /// Presence flag.
    pub is_online: bool,
    /// Conversations the user takes part in.
    pub conversation_ids: Vec<ConversationId>,
    /// Memberships held by the user.
    pub conversation_member_ids: Vec<ConversationMemberId>,
    /// Conversations supplied by the caller.
    pub conversations: Vec<Conversation>,
    /// Memberships supplied by the caller.
    pub conversation_members: Vec<ConversationMember>,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Last update instant.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete instant; `None` while the account is live.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Identity details received from the authentication collaborator after a
/// successful sign-in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    /// Authentication subject identifier.
    pub uid: String,
    /// Display name, when the provider supplies one.
    pub display_name: Option<String>,
    /// Email, when the provider supplies one.
    pub email: Option<String>,
    /// Phone number, when the provider supplies one.
    pub phone_number: Option<String>,
    /// Photo URL, when the provider supplies one.
    pub photo_url: Option<String>,
}

impl User {
    /// Builds the user record written on first sign-in.
    ///
    /// Missing provider fields become empty strings, the status is
    /// [`DEFAULT_STATUS`], the user starts offline with no conversations,
    /// and no password is recorded.
    #[must_use]
    pub fn from_identity(identity: AuthenticatedIdentity, clock: &impl Clock) -> Self {
        let now = clock.utc();
        Self {
            id: UserId::new(identity.uid),
            username: identity.display_name.unwrap_or_default(),
            email: identity.email.unwrap_or_default(),
            password: String::new(),
            phone_number: identity.phone_number.unwrap_or_default(),
            photo_profile_url: identity.photo_url.unwrap_or_default(),
            status: DEFAULT_STATUS.to_owned(),
            is_online: false,
            conversation_ids: Vec::new(),
            conversation_member_ids: Vec::new(),
            conversations: Vec::new(),
            conversation_members: Vec::new(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Returns `true` when the account carries a soft-delete timestamp.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}
