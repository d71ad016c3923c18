//! OAuth 2.0 authorization-code flow for Google APIs.
//!
//! The server never opens a browser itself: it hands the consent URL to the
//! caller (the `/auth/url` protocol operation), Google redirects the user to
//! the configured redirect URI, and the authorization code comes back
//! through the `/auth/callback` protocol operation. This module builds the
//! consent URL and exchanges codes for tokens.

use std::time::Duration;

use tracing::info;

use crate::error::{ProviderError, ProviderResult};

use super::config::OAuthCredentials;
use super::tokens::TokenInfo;

/// Google OAuth endpoints.
const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// OAuth client for Google APIs.
#[derive(Debug)]
pub struct OAuthClient {
    credentials: OAuthCredentials,
    http_client: reqwest::Client,
}

impl OAuthClient {
    /// Creates a new OAuth client with the given credentials.
    pub fn new(credentials: OAuthCredentials, timeout: Duration) -> ProviderResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                ProviderError::internal(format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            credentials,
            http_client,
        })
    }

    /// Builds the Google OAuth consent URL.
    ///
    /// Deterministic given the credentials and scopes: requests offline
    /// access so a refresh token is included in the exchange response.
    pub fn authorization_url(&self, scopes: &[String]) -> String {
        let scope = scopes.join(" ");

        format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&\
            access_type=offline&prompt=consent",
            GOOGLE_AUTH_URL,
            urlencoding::encode(&self.credentials.client_id),
            urlencoding::encode(&self.credentials.redirect_uri),
            urlencoding::encode(&scope),
        )
    }

    /// Exchanges an authorization code for access and refresh tokens.
    ///
    /// # Errors
    ///
    /// Returns an authentication error if Google rejects the code, a network
    /// error if the token endpoint is unreachable, and an invalid-response
    /// error if the response cannot be parsed.
    pub async fn exchange_code(&self, code: &str) -> ProviderResult<TokenInfo> {
        let params = [
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("code", code),
            ("grant_type", "authorization_code"),
            ("redirect_uri", self.credentials.redirect_uri.as_str()),
        ];

        let response = self
            .http_client
            .post(GOOGLE_TOKEN_URL)
            .form(&params)
            .send()
            .await
            .map_err(|e| ProviderError::network(format!("token exchange request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::network(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(ProviderError::authentication(format!(
                "token exchange failed ({}): {}",
                status, body
            )));
        }

        let token_response: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            ProviderError::invalid_response(format!("invalid token response: {}", e))
        })?;

        info!("successfully obtained tokens");
        Ok(TokenInfo::new(
            token_response.access_token,
            token_response.refresh_token,
            token_response.token_type,
        ))
    }
}

/// Response from Google's token endpoint.
#[derive(Debug, serde::Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    token_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn test_client() -> OAuthClient {
        OAuthClient::new(
            OAuthCredentials::new(
                "test-client.apps.googleusercontent.com",
                "test-secret",
                "http://localhost:3000/auth/callback",
            ),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn authorization_url_format() {
        let client = test_client();
        let url = client.authorization_url(&[
            "https://www.googleapis.com/auth/calendar".to_string(),
            "https://www.googleapis.com/auth/calendar.events".to_string(),
        ]);

        assert!(url.starts_with(GOOGLE_AUTH_URL));
        assert!(url.contains("client_id=test-client.apps.googleusercontent.com"));
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fauth%2Fcallback"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("access_type=offline"));
        // scopes are space-joined then percent-encoded
        assert!(url.contains("calendar.events"));
    }

    #[test]
    fn authorization_url_is_deterministic() {
        let client = test_client();
        let scopes = vec!["scope-a".to_string()];
        assert_eq!(
            client.authorization_url(&scopes),
            client.authorization_url(&scopes)
        );
    }

    #[test]
    fn token_response_parsing() {
        let json = r#"{
            "access_token": "ya29.token",
            "refresh_token": "1//refresh",
            "expires_in": 3599,
            "token_type": "Bearer"
        }"#;

        let parsed: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.access_token, "ya29.token");
        assert_eq!(parsed.refresh_token, Some("1//refresh".to_string()));
        assert_eq!(parsed.token_type, Some("Bearer".to_string()));
    }

    #[test]
    fn token_response_without_refresh_token() {
        let json = r#"{"access_token": "ya29.token"}"#;
        let parsed: TokenResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.refresh_token.is_none());
    }
}
