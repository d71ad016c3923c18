//! Request and response envelope types for the calbridge protocol.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A protocol request, constructed per inbound call by the transport layer.
///
/// Immutable once constructed: the dispatcher only reads from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolRequest {
    /// Endpoint path, e.g. `/events/upcoming`. Matched by exact string
    /// equality against the endpoint registry.
    pub endpoint: String,

    /// HTTP verb the transport received, e.g. `GET`.
    pub method: String,

    /// Named request parameters (query string or JSON body).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Map<String, Value>>,
}

impl ProtocolRequest {
    /// Creates a request with no parameters.
    pub fn new(endpoint: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method: method.into(),
            parameters: None,
        }
    }

    /// Builder: set the parameter map.
    pub fn with_parameters(mut self, parameters: Map<String, Value>) -> Self {
        self.parameters = Some(parameters);
        self
    }

    /// Builder: add a single parameter.
    pub fn with_parameter(mut self, name: impl Into<String>, value: Value) -> Self {
        self.parameters
            .get_or_insert_with(Map::new)
            .insert(name.into(), value);
        self
    }

    /// Returns the named parameter, if present.
    pub fn parameter(&self, name: &str) -> Option<&Value> {
        self.parameters.as_ref().and_then(|p| p.get(name))
    }
}

/// Error codes for protocol errors.
///
/// The taxonomy is closed: these six codes are the complete set a caller
/// can observe, and the transport layer maps them to HTTP status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The caller is not authenticated with the upstream provider.
    Unauthorized,

    /// The caller is authenticated but lacks permission.
    Forbidden,

    /// The requested endpoint or resource does not exist.
    NotFound,

    /// A required parameter is missing or malformed.
    BadRequest,

    /// An unexpected failure inside the server or a collaborator.
    InternalError,

    /// The upstream provider is temporarily unavailable.
    ServiceUnavailable,
}

impl ErrorCode {
    /// Returns a human-readable description of the error code.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Unauthorized => "Authentication required",
            Self::Forbidden => "Access denied",
            Self::NotFound => "Resource not found",
            Self::BadRequest => "Invalid request parameters",
            Self::InternalError => "An internal error occurred",
            Self::ServiceUnavailable => "Service temporarily unavailable",
        }
    }
}

/// Error details carried in a failure envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolError {
    /// Error code from the closed taxonomy.
    pub code: ErrorCode,

    /// Human-readable error message.
    pub message: String,

    /// Optional opaque detail, e.g. the collaborator's original error text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ProtocolError {
    /// Creates a new protocol error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Builder: attach detail text.
    pub fn with_details(mut self, details: impl Into<Value>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Creates an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Creates a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Creates a bad-request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

impl std::error::Error for ProtocolError {}

/// The uniform response envelope returned by every dispatched operation.
///
/// Invariant, enforced by the constructors: `success == true` implies `data`
/// is present and `error` is absent; `success == false` implies the reverse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolResponse<T = Value> {
    /// Whether the operation succeeded.
    pub success: bool,

    /// The operation result, present exactly when `success` is true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// The failure details, present exactly when `success` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ProtocolError>,
}

impl<T> ProtocolResponse<T> {
    /// Creates a success envelope wrapping the given data.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Creates a failure envelope from an error.
    pub fn fail(error: ProtocolError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }

    /// Creates a failure envelope from a code and message.
    pub fn fail_with(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::fail(ProtocolError::new(code, message))
    }

    /// Returns true if this is a success envelope.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Returns the error, if this is a failure envelope.
    pub fn as_error(&self) -> Option<&ProtocolError> {
        self.error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_builder() {
        let request = ProtocolRequest::new("/events", "GET")
            .with_parameter("calendarId", json!("primary"))
            .with_parameter("maxResults", json!(5));

        assert_eq!(request.endpoint, "/events");
        assert_eq!(request.parameter("calendarId"), Some(&json!("primary")));
        assert_eq!(request.parameter("maxResults"), Some(&json!(5)));
        assert!(request.parameter("missing").is_none());
    }

    #[test]
    fn request_serde() {
        let json = r#"{"endpoint":"/events/detail","method":"GET","parameters":{"calendarId":"primary","eventId":"evt-1"}}"#;
        let request: ProtocolRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.endpoint, "/events/detail");
        assert_eq!(request.parameter("eventId"), Some(&json!("evt-1")));

        let out = serde_json::to_string(&request).unwrap();
        let reparsed: ProtocolRequest = serde_json::from_str(&out).unwrap();
        assert_eq!(request, reparsed);
    }

    #[test]
    fn error_code_wire_names() {
        assert_eq!(
            serde_json::to_string(&ErrorCode::Unauthorized).unwrap(),
            r#""UNAUTHORIZED""#
        );
        assert_eq!(
            serde_json::to_string(&ErrorCode::NotFound).unwrap(),
            r#""NOT_FOUND""#
        );
        assert_eq!(
            serde_json::to_string(&ErrorCode::BadRequest).unwrap(),
            r#""BAD_REQUEST""#
        );
        assert_eq!(
            serde_json::to_string(&ErrorCode::InternalError).unwrap(),
            r#""INTERNAL_ERROR""#
        );
        assert_eq!(
            serde_json::to_string(&ErrorCode::ServiceUnavailable).unwrap(),
            r#""SERVICE_UNAVAILABLE""#
        );
        assert_eq!(
            serde_json::to_string(&ErrorCode::Forbidden).unwrap(),
            r#""FORBIDDEN""#
        );
    }

    #[test]
    fn error_code_description() {
        assert!(!ErrorCode::Unauthorized.description().is_empty());
        assert!(!ErrorCode::InternalError.description().is_empty());
    }

    #[test]
    fn success_envelope_invariant() {
        let response: ProtocolResponse = ProtocolResponse::ok(json!({"items": []}));
        assert!(response.is_success());
        assert!(response.data.is_some());
        assert!(response.error.is_none());
    }

    #[test]
    fn failure_envelope_invariant() {
        let response: ProtocolResponse =
            ProtocolResponse::fail_with(ErrorCode::NotFound, "Endpoint /nope not found");
        assert!(!response.is_success());
        assert!(response.data.is_none());
        let error = response.as_error().unwrap();
        assert_eq!(error.code, ErrorCode::NotFound);
        assert!(error.message.contains("/nope"));
    }

    #[test]
    fn failure_envelope_serde() {
        let response: ProtocolResponse = ProtocolResponse::fail(
            ProtocolError::internal("Failed to fetch calendar events")
                .with_details("connection refused"),
        );
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""success":false"#));
        assert!(json.contains("INTERNAL_ERROR"));
        assert!(json.contains("connection refused"));
        // success envelopes omit error, failure envelopes omit data
        assert!(!json.contains(r#""data""#));
    }

    #[test]
    fn error_display() {
        let error = ProtocolError::bad_request("Calendar ID is required");
        let display = format!("{}", error);
        assert!(display.contains("Invalid request"));
        assert!(display.contains("Calendar ID is required"));
    }
}
