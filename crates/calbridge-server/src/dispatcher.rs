//! Request dispatch.
//!
//! The dispatcher is the failure containment boundary for every protocol
//! request: it routes by exact endpoint path, enforces the authentication
//! precondition, validates parameters before any upstream call, and maps
//! every collaborator failure into the closed error taxonomy. No raw
//! provider error ever crosses this boundary.
//!
//! Per-request flow: routing, then the auth check (skipped for the two auth
//! endpoints, which must stay reachable while unauthenticated), then
//! handler-specific validation, then exactly one upstream delegation, then
//! wrapping the result into the response envelope.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use calbridge_core::{EventCreationData, EventDeletionData, EventQuery, EventUpdateData};
use calbridge_protocol::{ProtocolError, ProtocolRequest, ProtocolResponse, ServerInfo};
use calbridge_providers::{AuthSelector, CalendarClient, ProviderError};

use crate::config::ServerIdentity;
use crate::registry::{self, paths};

/// Default result count for the upcoming-events aggregation.
const DEFAULT_UPCOMING_RESULTS: usize = 10;

/// Routes protocol requests to their handlers.
///
/// Holds only read-only state: the server-info document (identity plus the
/// endpoint registry, built once at construction) and shared references to
/// the injected collaborators. `process_request` takes `&self`, so the
/// transport layer may invoke it concurrently for independent requests.
pub struct Dispatcher {
    info: ServerInfo,
    selector: Arc<AuthSelector>,
    client: Arc<dyn CalendarClient>,
}

impl Dispatcher {
    /// Creates a dispatcher over the injected collaborators.
    pub fn new(
        identity: ServerIdentity,
        selector: Arc<AuthSelector>,
        client: Arc<dyn CalendarClient>,
    ) -> Self {
        Self {
            info: ServerInfo {
                id: identity.id,
                name: identity.name,
                description: identity.description,
                version: identity.version,
                endpoints: registry::endpoints(),
            },
            selector,
            client,
        }
    }

    /// Returns the server's self-description.
    ///
    /// Always succeeds and never touches authentication; the registry is
    /// immutable, so repeated calls return identical results.
    pub fn server_info(&self) -> &ServerInfo {
        &self.info
    }

    /// Processes one protocol request into a response envelope.
    ///
    /// Never panics and never propagates a collaborator error: every
    /// outcome is a well-formed [`ProtocolResponse`].
    #[tracing::instrument(
        skip_all,
        fields(endpoint = %request.endpoint, method = %request.method)
    )]
    pub async fn process_request(&self, request: &ProtocolRequest) -> ProtocolResponse {
        // Routing: exact string match against the registry path set.
        if !self
            .info
            .endpoints
            .iter()
            .any(|e| e.path == request.endpoint)
        {
            return ProtocolResponse::fail(ProtocolError::not_found(format!(
                "Endpoint {} not found",
                request.endpoint
            )));
        }

        // Auth check. The auth endpoints are how a caller becomes
        // authenticated, so they bypass it.
        if requires_auth(&request.endpoint) && !self.ensure_authenticated().await {
            return ProtocolResponse::fail(ProtocolError::unauthorized(
                "Not authenticated with Google Calendar",
            ));
        }

        let result = match request.endpoint.as_str() {
            paths::AUTH_URL => self.auth_url(),
            paths::AUTH_CALLBACK => self.auth_callback(request).await,
            paths::CALENDARS => self.calendars().await,
            paths::EVENTS => self.events(request).await,
            paths::EVENTS_UPCOMING => self.upcoming(request).await,
            paths::EVENTS_CREATE => self.create(request).await,
            paths::EVENTS_UPDATE => self.update(request).await,
            paths::EVENTS_DELETE => self.delete(request).await,
            paths::EVENTS_DETAIL => self.detail(request).await,
            // The registry and this match share the same path constants, so
            // a registered path without an arm cannot occur.
            other => Err(ProtocolError::not_found(format!(
                "Endpoint {} not found",
                other
            ))),
        };

        match result {
            Ok(data) => ProtocolResponse::ok(data),
            Err(error) => {
                debug!(code = ?error.code, message = %error.message, "request failed");
                ProtocolResponse::fail(error)
            }
        }
    }

    /// Checks authentication, attempting exactly one persisted-credentials
    /// load before the final answer.
    async fn ensure_authenticated(&self) -> bool {
        if self.selector.is_authenticated().await {
            return true;
        }

        debug!("not authenticated in memory, attempting persisted credential load");
        if !self.selector.active().load_persisted().await {
            return false;
        }
        self.selector.is_authenticated().await
    }

    fn auth_url(&self) -> Result<Value, ProtocolError> {
        Ok(Value::String(self.client.authorization_url()))
    }

    async fn auth_callback(&self, request: &ProtocolRequest) -> Result<Value, ProtocolError> {
        let code = require_str(request, "code", "Authorization code is required")?;

        self.client
            .exchange_code(&code)
            .await
            .map_err(|e| upstream_error("Failed to authenticate with Google", e))?;

        Ok(Value::Bool(true))
    }

    async fn calendars(&self) -> Result<Value, ProtocolError> {
        let calendars = self
            .client
            .list_calendars()
            .await
            .map_err(|e| upstream_error("Failed to fetch calendar list", e))?;
        serialize(&calendars)
    }

    async fn events(&self, request: &ProtocolRequest) -> Result<Value, ProtocolError> {
        let calendar_id = require_str(request, "calendarId", "Calendar ID is required")?;

        let mut query = EventQuery::new(calendar_id);
        query.time_min = optional_str(request, "timeMin")?;
        query.time_max = optional_str(request, "timeMax")?;
        query.max_results = optional_count(request, "maxResults")?;

        let events = self
            .client
            .list_events(query)
            .await
            .map_err(|e| upstream_error("Failed to fetch calendar events", e))?;
        serialize(&events)
    }

    async fn upcoming(&self, request: &ProtocolRequest) -> Result<Value, ProtocolError> {
        let max_results = optional_count(request, "maxResults")?
            .map(|n| n as usize)
            .unwrap_or(DEFAULT_UPCOMING_RESULTS);

        let events = self
            .client
            .upcoming_events(max_results)
            .await
            .map_err(|e| upstream_error("Failed to fetch upcoming events", e))?;
        serialize(&events)
    }

    async fn create(&self, request: &ProtocolRequest) -> Result<Value, ProtocolError> {
        let data: EventCreationData = require_payload(request, "eventData")?;
        if data.calendar_id.is_empty() || data.summary.is_empty() {
            return Err(ProtocolError::bad_request(
                "Invalid event data. Calendar ID and summary are required",
            ));
        }
        if !data.start.is_specified() || !data.end.is_specified() {
            return Err(ProtocolError::bad_request(
                "Invalid event data. Valid start and end times are required",
            ));
        }

        let created = self
            .client
            .create_event(data)
            .await
            .map_err(|e| upstream_error("Failed to create calendar event", e))?;
        serialize(&created)
    }

    async fn update(&self, request: &ProtocolRequest) -> Result<Value, ProtocolError> {
        let data: EventUpdateData = require_payload(request, "eventData")?;
        if data.calendar_id.is_empty() || data.event_id.is_empty() {
            return Err(ProtocolError::bad_request(
                "Invalid event data. Calendar ID and event ID are required",
            ));
        }

        let updated = self
            .client
            .update_event(data)
            .await
            .map_err(|e| upstream_error("Failed to update calendar event", e))?;
        serialize(&updated)
    }

    async fn delete(&self, request: &ProtocolRequest) -> Result<Value, ProtocolError> {
        let data: EventDeletionData = require_payload(request, "deleteData")?;
        if data.calendar_id.is_empty() || data.event_id.is_empty() {
            return Err(ProtocolError::bad_request(
                "Invalid delete data. Calendar ID and event ID are required",
            ));
        }

        self.client
            .delete_event(&data.calendar_id, &data.event_id)
            .await
            .map_err(|e| upstream_error("Failed to delete calendar event", e))?;

        Ok(Value::Bool(true))
    }

    async fn detail(&self, request: &ProtocolRequest) -> Result<Value, ProtocolError> {
        let calendar_id = optional_str(request, "calendarId")?.filter(|s| !s.is_empty());
        let event_id = optional_str(request, "eventId")?.filter(|s| !s.is_empty());
        let (Some(calendar_id), Some(event_id)) = (calendar_id, event_id) else {
            return Err(ProtocolError::bad_request(
                "Calendar ID and event ID are required",
            ));
        };

        let event = self
            .client
            .get_event(&calendar_id, &event_id)
            .await
            .map_err(|e| upstream_error("Failed to fetch event details", e))?;
        serialize(&event)
    }
}

/// Returns whether the endpoint requires an authenticated caller.
fn requires_auth(endpoint: &str) -> bool {
    !matches!(endpoint, paths::AUTH_URL | paths::AUTH_CALLBACK)
}

/// Converts a collaborator failure into the single internal-error shape,
/// capturing the original message as detail.
fn upstream_error(message: &str, error: ProviderError) -> ProtocolError {
    warn!(error = %error, "upstream call failed");
    ProtocolError::internal(message).with_details(error.to_string())
}

/// Serializes a successful result into the envelope's data slot.
fn serialize<T: Serialize>(data: &T) -> Result<Value, ProtocolError> {
    serde_json::to_value(data).map_err(|e| {
        ProtocolError::internal("Failed to serialize response").with_details(e.to_string())
    })
}

/// Extracts a required non-empty string parameter.
fn require_str(
    request: &ProtocolRequest,
    name: &str,
    message: &str,
) -> Result<String, ProtocolError> {
    match request.parameter(name) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        Some(Value::String(_)) | None => Err(ProtocolError::bad_request(message)),
        Some(_) => Err(ProtocolError::bad_request(format!(
            "{} must be a string",
            name
        ))),
    }
}

/// Extracts an optional string parameter.
fn optional_str(request: &ProtocolRequest, name: &str) -> Result<Option<String>, ProtocolError> {
    match request.parameter(name) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ProtocolError::bad_request(format!(
            "{} must be a string",
            name
        ))),
    }
}

/// Extracts an optional non-negative count.
///
/// Accepts JSON numbers and numeric strings: a query-string transport
/// delivers every parameter as a string.
fn optional_count(request: &ProtocolRequest, name: &str) -> Result<Option<u32>, ProtocolError> {
    let invalid =
        || ProtocolError::bad_request(format!("{} must be a non-negative integer", name));

    match request.parameter(name) {
        None => Ok(None),
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .map(Some)
            .ok_or_else(invalid),
        Some(Value::String(s)) => s.parse::<u32>().map(Some).map_err(|_| invalid()),
        Some(_) => Err(invalid()),
    }
}

/// Extracts and deserializes a required structured payload.
fn require_payload<T: serde::de::DeserializeOwned>(
    request: &ProtocolRequest,
    name: &str,
) -> Result<T, ProtocolError> {
    let value = request
        .parameter(name)
        .ok_or_else(|| ProtocolError::bad_request(format!("{} is required", name)))?;

    serde_json::from_value(value.clone())
        .map_err(|e| ProtocolError::bad_request(format!("Invalid {}: {}", name, e)))
}
