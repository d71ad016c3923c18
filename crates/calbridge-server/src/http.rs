//! HTTP transport binding.
//!
//! Thin plumbing between HTTP and the protocol core: routes build a
//! [`ProtocolRequest`] from the verb plus query string (GET) or JSON body
//! (everything else), hand it to the dispatcher, and translate the
//! envelope's error code into an HTTP status. No request logic lives here.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Query, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::info;

use calbridge_protocol::{ErrorCode, ProtocolError, ProtocolRequest, ProtocolResponse, ServerInfo};
use calbridge_providers::DirectStrategy;

use crate::dispatcher::Dispatcher;
use crate::error::ServerResult;
use crate::registry::paths;

/// Shared state for all routes.
#[derive(Clone)]
pub struct AppState {
    /// The protocol core.
    pub dispatcher: Arc<Dispatcher>,
    /// The direct authentication strategy, for the `/auth/direct` route.
    pub direct: Arc<DirectStrategy>,
    started_at: DateTime<Utc>,
}

impl AppState {
    /// Creates the state with the start time stamped now.
    pub fn new(dispatcher: Arc<Dispatcher>, direct: Arc<DirectStrategy>) -> Self {
        Self {
            dispatcher,
            direct,
            started_at: Utc::now(),
        }
    }
}

/// Builds the HTTP router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/mcp/info", get(server_info))
        .route("/mcp/{*endpoint}", any(handle_mcp))
        .route("/auth/callback", get(auth_callback))
        .route("/auth/direct", post(direct_auth))
        .route("/health", get(health))
        .with_state(state)
}

/// Binds the listener and serves until the process exits.
pub async fn serve(state: AppState, port: u16) -> ServerResult<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let router = build_router(state);

    info!("MCP server listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}

async fn server_info(State(state): State<AppState>) -> Json<ServerInfo> {
    Json(state.dispatcher.server_info().clone())
}

async fn handle_mcp(
    State(state): State<AppState>,
    Path(endpoint): Path<String>,
    method: Method,
    Query(query): Query<HashMap<String, String>>,
    body: Bytes,
) -> Response {
    let body = (!body.is_empty())
        .then(|| serde_json::from_slice::<Value>(&body).ok())
        .flatten();

    let mut request = ProtocolRequest::new(format!("/{}", endpoint), method.to_string());
    request.parameters = request_parameters(&method, query, body);

    let response = state.dispatcher.process_request(&request).await;
    protocol_response(response)
}

/// GET requests carry parameters in the query string, everything else in
/// the JSON body.
fn request_parameters(
    method: &Method,
    query: HashMap<String, String>,
    body: Option<Value>,
) -> Option<Map<String, Value>> {
    if *method == Method::GET {
        if query.is_empty() {
            return None;
        }
        Some(
            query
                .into_iter()
                .map(|(k, v)| (k, Value::String(v)))
                .collect(),
        )
    } else {
        match body {
            Some(Value::Object(map)) => Some(map),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CallbackQuery {
    code: Option<String>,
}

/// Browser-redirect convenience route for the OAuth consent flow; feeds the
/// code into the protocol's `/auth/callback` operation.
async fn auth_callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> Response {
    let Some(code) = query.code.filter(|code| !code.is_empty()) else {
        let response: ProtocolResponse =
            ProtocolResponse::fail(ProtocolError::bad_request("Authorization code is required"));
        return (StatusCode::BAD_REQUEST, Json(response)).into_response();
    };

    let request = ProtocolRequest::new(paths::AUTH_CALLBACK, "POST")
        .with_parameter("code", Value::String(code));
    let response = state.dispatcher.process_request(&request).await;

    let status = if response.is_success() {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, Json(response)).into_response()
}

#[derive(Debug, Deserialize)]
struct DirectAuthRequest {
    email: Option<String>,
    password: Option<String>,
    cookies: Option<String>,
}

#[derive(Debug, Serialize)]
struct DirectAuthOutcome {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<DirectAuthError>,
}

#[derive(Debug, Serialize)]
struct DirectAuthError {
    message: String,
}

impl DirectAuthOutcome {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(DirectAuthError {
                message: message.into(),
            }),
        }
    }
}

async fn direct_auth(
    State(state): State<AppState>,
    Json(credentials): Json<DirectAuthRequest>,
) -> Response {
    let email = credentials.email.filter(|s| !s.is_empty());
    let cookies = credentials.cookies.filter(|s| !s.is_empty());

    if email.is_none() && cookies.is_none() {
        return (
            StatusCode::BAD_REQUEST,
            Json(DirectAuthOutcome::failed(
                "Email or cookies are required for direct authentication",
            )),
        )
            .into_response();
    }

    let success = if let Some(cookies) = cookies {
        state.direct.authenticate_with_cookies(&cookies).await
    } else if let (Some(email), Some(password)) = (email, credentials.password) {
        state
            .direct
            .authenticate_with_credentials(&email, &password)
            .await
    } else {
        return (
            StatusCode::BAD_REQUEST,
            Json(DirectAuthOutcome::failed("Invalid authentication parameters")),
        )
            .into_response();
    };

    if success {
        (
            StatusCode::OK,
            Json(DirectAuthOutcome::ok("Direct authentication successful")),
        )
            .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(DirectAuthOutcome::failed("Authentication failed")),
        )
            .into_response()
    }
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
        "uptimeSeconds": (Utc::now() - state.started_at).num_seconds().max(0),
        "version": state.dispatcher.server_info().version,
    }))
}

/// Maps a protocol error code to its HTTP status.
fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn protocol_response(response: ProtocolResponse) -> Response {
    let status = match response.as_error() {
        None => StatusCode::OK,
        Some(error) => status_for(error.code),
    };
    (status, Json(response)).into_response()
}
