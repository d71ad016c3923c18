//! Authentication method selection.

use std::sync::Arc;

use tracing::warn;

use super::strategy::AuthStrategy;

/// The configured authentication method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    /// Google Cloud OAuth (the default).
    GoogleCloud,
    /// Direct user credentials or cookies.
    Direct,
}

impl AuthMethod {
    /// Parses a configuration value into a method.
    ///
    /// Unrecognized values fall back to [`AuthMethod::GoogleCloud`] with a
    /// warning rather than failing startup; this keeps a typo in the
    /// deployment configuration from taking the server down.
    pub fn parse(value: &str) -> Self {
        match value {
            "google_cloud" => Self::GoogleCloud,
            "direct" => Self::Direct,
            other => {
                warn!(
                    method = %other,
                    "unknown auth method, falling back to Google Cloud OAuth"
                );
                Self::GoogleCloud
            }
        }
    }

    /// Returns the configuration name of this method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GoogleCloud => "google_cloud",
            Self::Direct => "direct",
        }
    }
}

/// Chooses the active authentication strategy and answers strategy-agnostic
/// authentication probes.
///
/// Both strategies are constructed once at startup and injected here; the
/// selector only picks between them, it owns no credential state itself.
pub struct AuthSelector {
    method: AuthMethod,
    oauth: Arc<dyn AuthStrategy>,
    direct: Arc<dyn AuthStrategy>,
    oauth_configured: bool,
}

impl AuthSelector {
    /// Creates a selector over the two strategies.
    ///
    /// `oauth_configured` reports whether the OAuth client id, secret and
    /// redirect URI are all present; it feeds startup diagnostics only.
    pub fn new(
        method: AuthMethod,
        oauth: Arc<dyn AuthStrategy>,
        direct: Arc<dyn AuthStrategy>,
        oauth_configured: bool,
    ) -> Self {
        Self {
            method,
            oauth,
            direct,
            oauth_configured,
        }
    }

    /// Returns the configured method.
    pub fn method(&self) -> AuthMethod {
        self.method
    }

    /// Returns the active strategy for the configured method.
    pub fn active(&self) -> &dyn AuthStrategy {
        match self.method {
            AuthMethod::GoogleCloud => self.oauth.as_ref(),
            AuthMethod::Direct => self.direct.as_ref(),
        }
    }

    /// Returns whether the OAuth strategy is fully configured.
    ///
    /// Diagnostic only: routing never gates on this.
    pub fn is_configured(&self) -> bool {
        self.oauth_configured
    }

    /// Returns whether the caller is authenticated under the active
    /// strategy.
    pub async fn is_authenticated(&self) -> bool {
        self.active().is_authorized().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::BoxFuture;

    struct FixedStrategy {
        name: &'static str,
        authorized: bool,
    }

    impl AuthStrategy for FixedStrategy {
        fn name(&self) -> &str {
            self.name
        }
        fn is_authorized(&self) -> BoxFuture<'_, bool> {
            let authorized = self.authorized;
            Box::pin(async move { authorized })
        }
        fn load_persisted(&self) -> BoxFuture<'_, bool> {
            let authorized = self.authorized;
            Box::pin(async move { authorized })
        }
    }

    fn selector(method: AuthMethod) -> AuthSelector {
        AuthSelector::new(
            method,
            Arc::new(FixedStrategy {
                name: "google_cloud",
                authorized: true,
            }),
            Arc::new(FixedStrategy {
                name: "direct",
                authorized: false,
            }),
            true,
        )
    }

    #[test]
    fn parse_known_methods() {
        assert_eq!(AuthMethod::parse("google_cloud"), AuthMethod::GoogleCloud);
        assert_eq!(AuthMethod::parse("direct"), AuthMethod::Direct);
    }

    #[test]
    fn parse_unknown_falls_back_to_oauth() {
        assert_eq!(AuthMethod::parse("ldap"), AuthMethod::GoogleCloud);
        assert_eq!(AuthMethod::parse(""), AuthMethod::GoogleCloud);
    }

    #[test]
    fn selects_configured_strategy() {
        assert_eq!(
            selector(AuthMethod::GoogleCloud).active().name(),
            "google_cloud"
        );
        assert_eq!(selector(AuthMethod::Direct).active().name(), "direct");
    }

    #[tokio::test]
    async fn authentication_probe_follows_active_strategy() {
        assert!(selector(AuthMethod::GoogleCloud).is_authenticated().await);
        assert!(!selector(AuthMethod::Direct).is_authenticated().await);
    }

    #[test]
    fn configured_flag_is_reported() {
        let selector = AuthSelector::new(
            AuthMethod::GoogleCloud,
            Arc::new(FixedStrategy {
                name: "google_cloud",
                authorized: false,
            }),
            Arc::new(FixedStrategy {
                name: "direct",
                authorized: false,
            }),
            false,
        );
        assert!(!selector.is_configured());
    }
}
