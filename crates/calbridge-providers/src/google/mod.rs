//! Google Calendar provider: configuration, OAuth flow, token persistence,
//! REST client and the [`GoogleCalendarService`] facade.

pub mod client;
pub mod config;
pub mod oauth;
pub mod service;
pub mod tokens;

pub use config::{GoogleConfig, OAuthCredentials};
pub use oauth::OAuthClient;
pub use service::GoogleCalendarService;
pub use tokens::{TokenInfo, TokenStorage};
