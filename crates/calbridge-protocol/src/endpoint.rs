//! Endpoint metadata types.
//!
//! An [`EndpointDescriptor`] describes one supported operation: its path,
//! verb, parameters and return shape. The server declares its full set of
//! descriptors once, at startup, and exposes them through [`ServerInfo`].

use serde::{Deserialize, Serialize};

/// Metadata for one parameter of an endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointParameter {
    /// Parameter name as it appears in the request.
    pub name: String,

    /// Type description, e.g. "string" or "EventCreationData".
    #[serde(rename = "type")]
    pub param_type: String,

    /// Human-readable description.
    pub description: String,

    /// Whether the parameter must be present.
    pub required: bool,
}

impl EndpointParameter {
    /// Creates a required parameter.
    pub fn required(
        name: impl Into<String>,
        param_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            param_type: param_type.into(),
            description: description.into(),
            required: true,
        }
    }

    /// Creates an optional parameter.
    pub fn optional(
        name: impl Into<String>,
        param_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            param_type: param_type.into(),
            description: description.into(),
            required: false,
        }
    }
}

/// Metadata for an endpoint's return value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointReturns {
    /// Type description, e.g. "CalendarList".
    #[serde(rename = "type")]
    pub return_type: String,

    /// Human-readable description.
    pub description: String,
}

impl EndpointReturns {
    /// Creates a return descriptor.
    pub fn new(return_type: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            return_type: return_type.into(),
            description: description.into(),
        }
    }
}

/// Metadata for one supported protocol operation.
///
/// Descriptors are created once at process start and never mutated; the
/// dispatcher relies on `path` values being unique for exact-match routing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointDescriptor {
    /// Literal endpoint path, e.g. `/events/upcoming`.
    pub path: String,

    /// HTTP verb for this operation.
    pub method: String,

    /// Human-readable description.
    pub description: String,

    /// Parameter metadata, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<EndpointParameter>,

    /// Return-value metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returns: Option<EndpointReturns>,
}

impl EndpointDescriptor {
    /// Creates a descriptor with no parameters and no return metadata.
    pub fn new(
        path: impl Into<String>,
        method: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            method: method.into(),
            description: description.into(),
            parameters: Vec::new(),
            returns: None,
        }
    }

    /// Builder: add a parameter.
    pub fn with_parameter(mut self, parameter: EndpointParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Builder: set the return metadata.
    pub fn with_returns(mut self, returns: EndpointReturns) -> Self {
        self.returns = Some(returns);
        self
    }
}

/// Self-description of the server: identity fields plus the full endpoint
/// registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    /// Stable server identifier.
    pub id: String,

    /// Human-readable server name.
    pub name: String,

    /// Human-readable server description.
    pub description: String,

    /// Server version string.
    pub version: String,

    /// All supported endpoints.
    pub endpoints: Vec<EndpointDescriptor>,
}
