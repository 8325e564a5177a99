//! Process configuration.
//!
//! [`AppConfig`] is read once at start-up from `FLEXCHAT_`-prefixed
//! environment variables, after an optional `.env` file has been loaded,
//! and then passed explicitly to whatever needs it.

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

use crate::notification::{
    adapters::{DEFAULT_FCM_ENDPOINT, DEFAULT_TOKEN_URI, ServiceAccount},
    services::{CallTemplates, DEFAULT_CALL_BODY, DEFAULT_CALL_TITLE_TEMPLATE},
};

/// Environment variable prefix for every configuration key.
pub const ENV_PREFIX: &str = "FLEXCHAT_";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable was missing or could not be parsed.
    #[error("invalid environment configuration: {0}")]
    Env(#[from] envy::Error),
    /// A `.env` file exists but could not be read or parsed.
    #[error("unreadable .env file: {0}")]
    EnvFile(#[source] dotenvy::Error),
}

/// Service configuration.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Cloud project identifier.
    pub project_id: String,
    /// Service-account client email.
    pub client_email: String,
    /// Service-account private key (PEM).
    pub private_key: String,
    /// OAuth2 token endpoint for the service account.
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    /// Base URL of the push messaging API.
    #[serde(default = "default_fcm_endpoint")]
    pub fcm_endpoint: String,
    /// Log broadcasts instead of sending them.
    #[serde(default)]
    pub dry_run: bool,
    /// Deployment region for trigger functions.
    #[serde(default = "default_region")]
    pub region: String,
    /// Default `tracing` filter directive; `RUST_LOG` takes precedence.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// Title template for call notifications.
    #[serde(default = "default_call_title_template")]
    pub call_title_template: String,
    /// Body template for call notifications.
    #[serde(default = "default_call_body")]
    pub call_body: String,
}

fn default_region() -> String {
    "asia-southeast2".to_owned()
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_owned()
}

fn default_fcm_endpoint() -> String {
    DEFAULT_FCM_ENDPOINT.to_owned()
}

fn default_log_filter() -> String {
    "info".to_owned()
}

fn default_call_title_template() -> String {
    DEFAULT_CALL_TITLE_TEMPLATE.to_owned()
}

fn default_call_body() -> String {
    DEFAULT_CALL_BODY.to_owned()
}

impl AppConfig {
    /// Loads configuration from the process environment.
    ///
    /// A `.env` file in the working directory, when present, is loaded
    /// first; variables already set in the environment win.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EnvFile`] when a `.env` file exists but
    /// cannot be read, and [`ConfigError::Env`] when a required variable is
    /// missing or a value cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        accept_missing_env_file(dotenvy::dotenv())?;
        Ok(envy::prefixed(ENV_PREFIX).from_env()?)
    }

    /// Loads configuration from explicit `(name, value)` pairs.
    ///
    /// Names carry the [`ENV_PREFIX`], as in the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Env`] when a required key is missing or a
    /// value cannot be parsed.
    pub fn from_iter<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::prefixed(ENV_PREFIX).from_iter(vars)?)
    }

    /// Service-account credentials for the push adapter.
    #[must_use]
    pub fn service_account(&self) -> ServiceAccount {
        ServiceAccount {
            project_id: self.project_id.clone(),
            client_email: self.client_email.clone(),
            private_key: self.private_key.clone(),
            token_uri: self.token_uri.clone(),
        }
    }

    /// Call notification templates built from this configuration.
    #[must_use]
    pub fn call_templates(&self) -> CallTemplates {
        CallTemplates::new(self.call_title_template.clone(), self.call_body.clone())
    }
}

/// Treats an absent `.env` file as empty and any other failure as fatal.
fn accept_missing_env_file<T>(loaded: Result<T, dotenvy::Error>) -> Result<(), ConfigError> {
    match loaded {
        Err(err) if !err.not_found() => Err(ConfigError::EnvFile(err)),
        _ => Ok(()),
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("project_id", &self.project_id)
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .field("token_uri", &self.token_uri)
            .field("fcm_endpoint", &self.fcm_endpoint)
            .field("dry_run", &self.dry_run)
            .field("region", &self.region)
            .field("log_filter", &self.log_filter)
            .field("call_title_template", &self.call_title_template)
            .field("call_body", &self.call_body)
            .finish()
    }
}
