//! Request/response envelope and endpoint metadata for the calbridge MCP
//! protocol.
//!
//! Every dispatched operation returns a [`ProtocolResponse`]: a uniform
//! `{success, data | error}` envelope with a closed, enumerable error
//! taxonomy ([`ErrorCode`]). Endpoint metadata ([`EndpointDescriptor`]) is
//! declared once by the server's registry and exposed to callers through
//! [`ServerInfo`] so the server is self-describing.
//!
//! # Example
//!
//! ```rust
//! use calbridge_protocol::{ErrorCode, ProtocolRequest, ProtocolResponse};
//!
//! let request = ProtocolRequest::new("/calendars", "GET");
//! let response: ProtocolResponse = ProtocolResponse::fail_with(
//!     ErrorCode::Unauthorized,
//!     "Not authenticated with Google Calendar",
//! );
//! assert!(!response.is_success());
//! ```

mod endpoint;
mod types;

pub use endpoint::{EndpointDescriptor, EndpointParameter, EndpointReturns, ServerInfo};
pub use types::{ErrorCode, ProtocolError, ProtocolRequest, ProtocolResponse};
