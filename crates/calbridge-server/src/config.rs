//! Server configuration from environment variables.
//!
//! The deployment contract is a flat set of environment variables with
//! working defaults, so the server starts with no configuration at all
//! (albeit unauthenticated until OAuth credentials are provided).

use std::path::PathBuf;

use calbridge_providers::{AuthMethod, OAuthCredentials};
use tracing::warn;

/// Identity fields reported by the server-info endpoint.
#[derive(Debug, Clone)]
pub struct ServerIdentity {
    /// Stable server identifier.
    pub id: String,
    /// Human-readable server name.
    pub name: String,
    /// Human-readable server description.
    pub description: String,
    /// Server version string.
    pub version: String,
}

impl Default for ServerIdentity {
    fn default() -> Self {
        Self {
            id: "calbridge".to_string(),
            name: "Google Calendar Bridge".to_string(),
            description: "Retrieves and manages Google Calendar events".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// TCP port to listen on.
    pub port: u16,

    /// The configured authentication method.
    pub auth_method: AuthMethod,

    /// Identity fields for server-info responses.
    pub identity: ServerIdentity,

    /// Google OAuth credentials (may be incomplete; reported at startup).
    pub credentials: OAuthCredentials,

    /// Path of the persisted OAuth token file.
    pub token_path: PathBuf,

    /// Path of the persisted direct-auth record.
    pub direct_token_path: PathBuf,

    /// Whether to emit JSON logs (for production deployments).
    pub json_logs: bool,
}

impl ServerConfig {
    /// Default listen port.
    pub const DEFAULT_PORT: u16 = 3000;

    /// Reads the configuration from process environment variables.
    ///
    /// Recognized variables, all optional:
    /// `PORT`, `AUTH_METHOD`, `GOOGLE_CLIENT_ID`, `GOOGLE_CLIENT_SECRET`,
    /// `GOOGLE_REDIRECT_URI`, `GOOGLE_TOKEN_PATH`, `DIRECT_AUTH_TOKEN_PATH`,
    /// `MCP_SERVER_ID`, `MCP_SERVER_NAME`, `MCP_SERVER_DESCRIPTION`,
    /// `LOG_FORMAT` (`json` for structured logs).
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// `from_env` passes `std::env::var`; tests pass closures over maps.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = ServerIdentity::default();

        let port = match lookup("PORT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(port = %raw, "invalid PORT value, using default");
                Self::DEFAULT_PORT
            }),
            None => Self::DEFAULT_PORT,
        };

        let auth_method = AuthMethod::parse(
            lookup("AUTH_METHOD")
                .unwrap_or_else(|| "google_cloud".to_string())
                .as_str(),
        );

        let credentials = OAuthCredentials::new(
            lookup("GOOGLE_CLIENT_ID").unwrap_or_default(),
            lookup("GOOGLE_CLIENT_SECRET").unwrap_or_default(),
            lookup("GOOGLE_REDIRECT_URI").unwrap_or_default(),
        );

        Self {
            port,
            auth_method,
            identity: ServerIdentity {
                id: lookup("MCP_SERVER_ID").unwrap_or(defaults.id),
                name: lookup("MCP_SERVER_NAME").unwrap_or(defaults.name),
                description: lookup("MCP_SERVER_DESCRIPTION").unwrap_or(defaults.description),
                version: defaults.version,
            },
            credentials,
            token_path: lookup("GOOGLE_TOKEN_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("token.json")),
            direct_token_path: lookup("DIRECT_AUTH_TOKEN_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("direct_auth_token.json")),
            json_logs: lookup("LOG_FORMAT").as_deref() == Some("json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> ServerConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = config_from(&[]);
        assert_eq!(config.port, 3000);
        assert_eq!(config.auth_method, AuthMethod::GoogleCloud);
        assert_eq!(config.identity.id, "calbridge");
        assert!(!config.credentials.is_complete());
        assert_eq!(config.token_path, PathBuf::from("token.json"));
        assert!(!config.json_logs);
    }

    #[test]
    fn environment_overrides() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("AUTH_METHOD", "direct"),
            ("MCP_SERVER_ID", "calbridge-staging"),
            ("GOOGLE_CLIENT_ID", "id.apps.googleusercontent.com"),
            ("GOOGLE_CLIENT_SECRET", "secret"),
            ("GOOGLE_REDIRECT_URI", "https://example.com/auth/callback"),
            ("GOOGLE_TOKEN_PATH", "/var/lib/calbridge/token.json"),
            ("LOG_FORMAT", "json"),
        ]);

        assert_eq!(config.port, 8080);
        assert_eq!(config.auth_method, AuthMethod::Direct);
        assert_eq!(config.identity.id, "calbridge-staging");
        assert!(config.credentials.is_complete());
        assert_eq!(
            config.token_path,
            PathBuf::from("/var/lib/calbridge/token.json")
        );
        assert!(config.json_logs);
    }

    #[test]
    fn invalid_port_falls_back_to_default() {
        let config = config_from(&[("PORT", "not-a-port")]);
        assert_eq!(config.port, ServerConfig::DEFAULT_PORT);
    }

    #[test]
    fn unknown_auth_method_falls_back_to_oauth() {
        let config = config_from(&[("AUTH_METHOD", "kerberos")]);
        assert_eq!(config.auth_method, AuthMethod::GoogleCloud);
    }
}
