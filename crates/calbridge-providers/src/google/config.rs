//! Google Calendar provider configuration.

use std::path::PathBuf;
use std::time::Duration;

/// OAuth 2.0 credentials for Google API access.
///
/// Users must provide their own OAuth client ID and secret, as Google
/// requires registered applications for API access. The redirect URI is the
/// address Google sends the authorization code back to after consent.
#[derive(Debug, Clone, Default)]
pub struct OAuthCredentials {
    /// The OAuth 2.0 client ID from Google Cloud Console.
    pub client_id: String,
    /// The OAuth 2.0 client secret from Google Cloud Console.
    pub client_secret: String,
    /// The registered redirect URI for the authorization code.
    pub redirect_uri: String,
}

impl OAuthCredentials {
    /// Creates new OAuth credentials.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
        }
    }

    /// Returns true when client id, client secret and redirect URI are all
    /// non-empty.
    ///
    /// Used for startup diagnostics only, not enforced as a routing
    /// precondition.
    pub fn is_complete(&self) -> bool {
        !self.client_id.is_empty()
            && !self.client_secret.is_empty()
            && !self.redirect_uri.is_empty()
    }
}

/// Configuration for the Google Calendar provider.
#[derive(Debug, Clone)]
pub struct GoogleConfig {
    /// OAuth credentials for API access.
    pub credentials: OAuthCredentials,

    /// OAuth scopes to request.
    pub scopes: Vec<String>,

    /// Path to store OAuth tokens. Defaults to `token.json` in the working
    /// directory.
    pub token_path: PathBuf,

    /// Request timeout for API and token-endpoint calls.
    pub timeout: Duration,
}

impl GoogleConfig {
    /// Default timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Default OAuth scopes: full calendar and event access.
    pub const DEFAULT_SCOPES: [&'static str; 2] = [
        "https://www.googleapis.com/auth/calendar",
        "https://www.googleapis.com/auth/calendar.events",
    ];

    /// Creates a new Google configuration with the given credentials.
    pub fn new(credentials: OAuthCredentials) -> Self {
        Self {
            credentials,
            scopes: Self::DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect(),
            token_path: PathBuf::from("token.json"),
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Sets the token storage path.
    pub fn with_token_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_path = path.into();
        self
    }

    /// Sets the OAuth scopes.
    pub fn with_scopes(mut self, scopes: Vec<String>) -> Self {
        self.scopes = scopes;
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.scopes.is_empty() {
            return Err("at least one OAuth scope is required".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_credentials() -> OAuthCredentials {
        OAuthCredentials::new(
            "test-client.apps.googleusercontent.com",
            "test-secret",
            "http://localhost:3000/auth/callback",
        )
    }

    #[test]
    fn credentials_completeness() {
        assert!(test_credentials().is_complete());

        let no_redirect = OAuthCredentials::new("id", "secret", "");
        assert!(!no_redirect.is_complete());

        assert!(!OAuthCredentials::default().is_complete());
    }

    #[test]
    fn config_defaults() {
        let config = GoogleConfig::new(test_credentials());
        assert_eq!(config.token_path, PathBuf::from("token.json"));
        assert_eq!(config.scopes.len(), 2);
        assert!(config.scopes[0].contains("auth/calendar"));
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn config_builders() {
        let config = GoogleConfig::new(test_credentials())
            .with_token_path("/var/lib/calbridge/tokens.json")
            .with_scopes(vec!["scope1".to_string()])
            .with_timeout(Duration::from_secs(10));

        assert_eq!(
            config.token_path,
            PathBuf::from("/var/lib/calbridge/tokens.json")
        );
        assert_eq!(config.scopes, vec!["scope1".to_string()]);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn config_validation() {
        assert!(GoogleConfig::new(test_credentials()).validate().is_ok());
        assert!(
            GoogleConfig::new(test_credentials())
                .with_scopes(vec![])
                .validate()
                .is_err()
        );
    }
}
