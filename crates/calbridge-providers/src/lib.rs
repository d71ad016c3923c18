//! Upstream calendar client and authentication strategies.
//!
//! This crate provides the two collaborator layers the dispatcher depends on:
//!
//! - [`CalendarClient`] - The narrow interface over the upstream calendar
//!   provider (list/get/create/update/delete plus the OAuth operations)
//! - [`GoogleCalendarService`] - The Google Calendar API v3 implementation
//! - [`AuthStrategy`] - The capability interface for interchangeable
//!   authentication backends, with OAuth and direct implementations
//! - [`AuthSelector`] - Chooses the active strategy from configuration
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────┐      ┌──────────────────────┐
//! │   OAuthStrategy    │      │    DirectStrategy    │
//! └─────────┬──────────┘      └──────────┬───────────┘
//!           │        AuthStrategy        │
//!           └──────────────┬─────────────┘
//!                          │
//!                   ┌──────▼───────┐
//!                   │ AuthSelector │
//!                   └──────────────┘
//!
//! ┌───────────────────────┐
//! │ GoogleCalendarService │──── CalendarClient ────▶ dispatcher
//! └───┬───────┬───────┬───┘
//!     │       │       │
//!  OAuth   Token   REST client (Calendar API v3)
//!  client  storage
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod google;

// Re-export main types at crate root
pub use auth::{AuthMethod, AuthSelector, AuthStrategy, DirectStrategy, OAuthStrategy};
pub use client::{BoxFuture, CalendarClient, upcoming_across_all};
pub use error::{ProviderError, ProviderErrorCode, ProviderResult};
pub use google::{GoogleCalendarService, GoogleConfig, OAuthCredentials, TokenInfo, TokenStorage};
