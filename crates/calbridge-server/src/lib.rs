//! Server: endpoint registry, request dispatcher and HTTP transport.
//!
//! This crate holds the protocol core and its thin HTTP binding:
//! - [`registry`] - the declarative list of supported endpoints
//! - [`Dispatcher`] - routes protocol requests, enforces authentication
//!   preconditions, validates parameters and contains upstream failures
//! - [`http`] - the axum transport that builds
//!   [`ProtocolRequest`](calbridge_protocol::ProtocolRequest)s and maps
//!   error codes to HTTP status codes
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use calbridge_providers::{
//!     AuthSelector, CalendarClient, DirectStrategy, GoogleCalendarService, GoogleConfig,
//!     OAuthStrategy,
//! };
//! use calbridge_server::{Dispatcher, ServerConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env();
//! let client: Arc<dyn CalendarClient> = Arc::new(GoogleCalendarService::new(
//!     GoogleConfig::new(config.credentials.clone()),
//! )?);
//! let selector = Arc::new(AuthSelector::new(
//!     config.auth_method,
//!     Arc::new(OAuthStrategy::new(client.clone())),
//!     Arc::new(DirectStrategy::new()),
//!     config.credentials.is_complete(),
//! ));
//! let dispatcher = Dispatcher::new(config.identity.clone(), selector, client);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod http;
pub mod registry;

pub use config::{ServerConfig, ServerIdentity};
pub use dispatcher::Dispatcher;
pub use error::{ServerError, ServerResult};
pub use http::{AppState, build_router};
pub use registry::endpoints;
