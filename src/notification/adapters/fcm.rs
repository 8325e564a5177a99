//! Firebase Cloud Messaging topic sender.
//!
//! Broadcasts go to the HTTP v1 `messages:send` endpoint. Access tokens are
//! minted from the service account with a signed JWT assertion and cached
//! until shortly before they expire.

use std::fmt;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use mockable::{Clock, DefaultClock};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::notification::{
    domain::{NotificationData, PushPayload},
    ports::{DeliveryReceipt, PushError, PushMessenger, PushResult},
};

/// Base URL of the production messaging API.
pub const DEFAULT_FCM_ENDPOINT: &str = "https://fcm.googleapis.com";

/// Google OAuth2 token endpoint used by service accounts.
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

const MESSAGING_SCOPE: &str = "https://www.googleapis.com/auth/firebase.messaging";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECONDS: i64 = 3600;
const REFRESH_MARGIN_SECONDS: i64 = 60;

/// Service-account credentials used to authorise broadcasts.
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceAccount {
    /// Cloud project the topics belong to.
    pub project_id: String,
    /// Service-account email; the JWT issuer.
    pub client_email: String,
    /// RSA private key in PEM form.
    pub private_key: String,
    /// OAuth2 token endpoint.
    pub token_uri: String,
}

impl fmt::Debug for ServiceAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccount")
            .field("project_id", &self.project_id)
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

/// Failures talking to the messaging service.
#[derive(Debug, Error)]
pub enum FcmError {
    /// The private key is not a usable RSA PEM key.
    #[error("invalid service-account key: {0}")]
    Key(#[source] jsonwebtoken::errors::Error),
    /// The token assertion could not be signed.
    #[error("failed to sign token assertion: {0}")]
    Assertion(#[source] jsonwebtoken::errors::Error),
    /// The HTTP exchange failed before a response was read.
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The token endpoint refused the assertion.
    #[error("token endpoint returned {status}: {body}")]
    Token {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },
    /// The messaging endpoint refused or failed the broadcast.
    #[error("messaging endpoint returned {status}: {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },
    /// The token cache lock was poisoned.
    #[error("token cache unavailable: {0}")]
    Cache(String),
}

impl From<FcmError> for PushError {
    fn from(err: FcmError) -> Self {
        let refused = matches!(err, FcmError::Api { status, .. } if (400..500).contains(&status));
        if refused {
            Self::Rejected(err.to_string())
        } else {
            Self::delivery(err)
        }
    }
}

#[derive(Debug, Clone)]
struct AccessToken {
    value: String,
    expires_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenGrant {
    access_token: String,
    expires_in: i64,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    message: OutgoingMessage<'a>,
}

#[derive(Serialize)]
struct OutgoingMessage<'a> {
    topic: &'a str,
    notification: OutgoingNotification<'a>,
    data: &'a NotificationData,
    #[serde(skip_serializing_if = "Option::is_none")]
    android: Option<PlatformConfig<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    webpush: Option<PlatformConfig<'a>>,
}

#[derive(Serialize)]
struct OutgoingNotification<'a> {
    title: &'a str,
    body: &'a str,
}

#[derive(Clone, Copy, Serialize)]
struct PlatformConfig<'a> {
    notification: PlatformNotification<'a>,
}

#[derive(Clone, Copy, Serialize)]
struct PlatformNotification<'a> {
    icon: &'a str,
}

#[derive(Deserialize)]
struct SendResponse {
    #[serde(default)]
    name: String,
}

impl<'a> SendRequest<'a> {
    fn for_payload(payload: &'a PushPayload) -> Self {
        // The v1 API has no top-level icon; it lives on each platform block.
        let platform = payload.notification.icon.as_deref().map(|icon| PlatformConfig {
            notification: PlatformNotification { icon },
        });
        Self {
            message: OutgoingMessage {
                topic: &payload.topic,
                notification: OutgoingNotification {
                    title: &payload.notification.title,
                    body: &payload.notification.body,
                },
                data: &payload.data,
                android: platform,
                webpush: platform,
            },
        }
    }
}

/// Push messenger that broadcasts through Firebase Cloud Messaging.
pub struct FcmPushMessenger<C = DefaultClock>
where
    C: Clock + Send + Sync,
{
    account: ServiceAccount,
    signing_key: EncodingKey,
    endpoint: String,
    http: reqwest::Client,
    clock: Arc<C>,
    token: Mutex<Option<AccessToken>>,
}

impl FcmPushMessenger<DefaultClock> {
    /// Creates a messenger for `account` against the production endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`FcmError::Key`] when the private key cannot be parsed and
    /// [`FcmError::Http`] when the HTTP client cannot be built.
    pub fn new(account: ServiceAccount) -> Result<Self, FcmError> {
        Self::with_clock(account, Arc::new(DefaultClock))
    }
}

impl<C> FcmPushMessenger<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a messenger that reads token lifetimes from `clock`.
    ///
    /// # Errors
    ///
    /// Returns [`FcmError::Key`] when the private key cannot be parsed and
    /// [`FcmError::Http`] when the HTTP client cannot be built.
    pub fn with_clock(account: ServiceAccount, clock: Arc<C>) -> Result<Self, FcmError> {
        let signing_key =
            EncodingKey::from_rsa_pem(account.private_key.as_bytes()).map_err(FcmError::Key)?;
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            account,
            signing_key,
            endpoint: DEFAULT_FCM_ENDPOINT.to_owned(),
            http,
            clock,
            token: Mutex::new(None),
        })
    }

    /// Points the messenger at another messaging API base URL.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn send_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/messages:send",
            self.endpoint.trim_end_matches('/'),
            self.account.project_id
        )
    }

    fn cached_token(&self, now: DateTime<Utc>) -> Result<Option<String>, FcmError> {
        let guard = self
            .token
            .lock()
            .map_err(|err| FcmError::Cache(err.to_string()))?;
        let refresh_after = now.checked_add_signed(Duration::seconds(REFRESH_MARGIN_SECONDS));
        Ok(guard
            .as_ref()
            .filter(|token| refresh_after.is_some_and(|limit| token.expires_at > limit))
            .map(|token| token.value.clone()))
    }

    fn remember_token(&self, token: AccessToken) -> Result<(), FcmError> {
        let mut guard = self
            .token
            .lock()
            .map_err(|err| FcmError::Cache(err.to_string()))?;
        *guard = Some(token);
        Ok(())
    }

    async fn access_token(&self) -> Result<String, FcmError> {
        let now = self.clock.utc();
        if let Some(value) = self.cached_token(now)? {
            return Ok(value);
        }

        let claims = AssertionClaims {
            iss: &self.account.client_email,
            scope: MESSAGING_SCOPE,
            aud: &self.account.token_uri,
            iat: now.timestamp(),
            exp: now.timestamp().saturating_add(ASSERTION_LIFETIME_SECONDS),
        };
        let assertion =
            jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &self.signing_key)
                .map_err(FcmError::Assertion)?;

        let response = self
            .http
            .post(&self.account.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FcmError::Token {
                status: status.as_u16(),
                body,
            });
        }
        let grant: TokenGrant = response.json().await?;
        let lifetime = Duration::try_seconds(grant.expires_in).unwrap_or_else(Duration::zero);
        let expires_at = now.checked_add_signed(lifetime).unwrap_or(now);
        debug!(%expires_at, "minted messaging access token");
        self.remember_token(AccessToken {
            value: grant.access_token.clone(),
            expires_at,
        })?;
        Ok(grant.access_token)
    }

    async fn broadcast(&self, payload: &PushPayload) -> Result<DeliveryReceipt, FcmError> {
        let access_token = self.access_token().await?;
        let response = self
            .http
            .post(self.send_url())
            .bearer_auth(access_token)
            .json(&SendRequest::for_payload(payload))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FcmError::Api {
                status: status.as_u16(),
                body,
            });
        }
        let sent: SendResponse = response.json().await?;
        Ok(DeliveryReceipt::new(sent.name))
    }
}

impl<C> fmt::Debug for FcmPushMessenger<C>
where
    C: Clock + Send + Sync,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FcmPushMessenger")
            .field("account", &self.account)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<C> PushMessenger for FcmPushMessenger<C>
where
    C: Clock + Send + Sync,
{
    async fn send_to_topic(&self, payload: &PushPayload) -> PushResult<DeliveryReceipt> {
        self.broadcast(payload).await.map_err(PushError::from)
    }
}
