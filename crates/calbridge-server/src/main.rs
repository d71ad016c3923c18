//! Server binary: configuration, dependency wiring and the serve loop.

use std::sync::Arc;

use tracing::{info, warn};

use calbridge_core::{TracingConfig, init_tracing};
use calbridge_providers::{
    AuthMethod, AuthSelector, CalendarClient, DirectStrategy, GoogleCalendarService, GoogleConfig,
    OAuthStrategy,
};
use calbridge_server::http::{self, AppState};
use calbridge_server::{Dispatcher, ServerConfig, ServerError};

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    let config = ServerConfig::from_env();

    let tracing_config = if config.json_logs {
        TracingConfig::server()
    } else {
        TracingConfig::default()
    };
    init_tracing(tracing_config)?;

    // Construct the collaborators once and inject them everywhere.
    let google_config = GoogleConfig::new(config.credentials.clone())
        .with_token_path(config.token_path.clone());
    let client: Arc<dyn CalendarClient> = Arc::new(GoogleCalendarService::new(google_config)?);

    let direct = Arc::new(DirectStrategy::with_token_path(
        config.direct_token_path.clone(),
    ));
    let selector = Arc::new(AuthSelector::new(
        config.auth_method,
        Arc::new(OAuthStrategy::new(client.clone())),
        direct.clone(),
        config.credentials.is_complete(),
    ));

    let dispatcher = Arc::new(Dispatcher::new(
        config.identity.clone(),
        selector.clone(),
        client,
    ));

    info!(
        port = config.port,
        server_id = %config.identity.id,
        server_name = %config.identity.name,
        "starting MCP server"
    );
    report_auth_status(&selector).await;

    http::serve(AppState::new(dispatcher, direct), config.port).await
}

/// Logs the authentication situation at startup so operators see at a
/// glance whether the server can reach the calendar API.
async fn report_auth_status(selector: &AuthSelector) {
    match selector.method() {
        AuthMethod::Direct => {
            info!("using direct authentication method");
            info!("direct authentication endpoint available at /auth/direct");
        }
        AuthMethod::GoogleCloud => {
            info!("using Google Cloud OAuth authentication method");
            if !selector.is_configured() {
                warn!(
                    "Google OAuth is not fully configured; set GOOGLE_CLIENT_ID, \
                     GOOGLE_CLIENT_SECRET and GOOGLE_REDIRECT_URI"
                );
            }
        }
    }

    if selector.is_authenticated().await {
        info!("existing authentication found");
    } else {
        info!("no authentication found; the user needs to authenticate");
    }
}
