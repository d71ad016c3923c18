//! Google Calendar service facade.
//!
//! Ties the OAuth client, token storage and REST client together behind the
//! [`CalendarClient`] interface the dispatcher consumes. Constructed once at
//! startup and shared via `Arc` (dependency injection, no global state).

use tracing::info;

use calbridge_core::{
    CalendarEvent, CalendarEventsList, CalendarList, EventCreationData, EventQuery,
    EventUpdateData,
};

use crate::client::{BoxFuture, CalendarClient, upcoming_across_all};
use crate::error::{ProviderError, ProviderResult};

use super::client::GoogleCalendarClient;
use super::config::GoogleConfig;
use super::oauth::OAuthClient;
use super::tokens::TokenStorage;

/// Google Calendar implementation of [`CalendarClient`].
pub struct GoogleCalendarService {
    config: GoogleConfig,
    oauth: OAuthClient,
    tokens: TokenStorage,
    api: GoogleCalendarClient,
}

impl GoogleCalendarService {
    /// Creates the service and attempts to load persisted tokens.
    ///
    /// A missing or unreadable token file is not an error here: the
    /// dispatcher retries the load lazily before failing a request with an
    /// authentication error.
    pub fn new(config: GoogleConfig) -> ProviderResult<Self> {
        config.validate().map_err(ProviderError::configuration)?;

        let oauth = OAuthClient::new(config.credentials.clone(), config.timeout)?;
        let tokens = TokenStorage::new(&config.token_path);
        let _ = tokens.load();
        let api = GoogleCalendarClient::new(config.timeout)?;

        Ok(Self {
            config,
            oauth,
            tokens,
            api,
        })
    }

    /// Returns the configuration this service was built with.
    pub fn config(&self) -> &GoogleConfig {
        &self.config
    }

    /// Returns the current access token or an authentication error.
    fn bearer(&self) -> ProviderResult<String> {
        self.tokens
            .get()
            .filter(|t| t.has_access_token())
            .map(|t| t.access_token)
            .ok_or_else(|| ProviderError::authentication("not authenticated with Google Calendar"))
    }
}

impl CalendarClient for GoogleCalendarService {
    fn authorization_url(&self) -> String {
        self.oauth.authorization_url(&self.config.scopes)
    }

    fn exchange_code(&self, code: &str) -> BoxFuture<'_, ProviderResult<()>> {
        let code = code.to_string();
        Box::pin(async move {
            let tokens = self.oauth.exchange_code(&code).await?;
            self.tokens.set(tokens)?;
            info!("authentication successful, tokens persisted");
            Ok(())
        })
    }

    fn is_authorized(&self) -> bool {
        self.tokens.has_access_token()
    }

    fn load_persisted_credentials(&self) -> BoxFuture<'_, ProviderResult<bool>> {
        Box::pin(async move {
            let loaded = self.tokens.load()?;
            Ok(loaded && self.tokens.has_access_token())
        })
    }

    fn list_calendars(&self) -> BoxFuture<'_, ProviderResult<CalendarList>> {
        Box::pin(async move {
            let token = self.bearer()?;
            self.api.list_calendars(&token).await
        })
    }

    fn list_events(&self, query: EventQuery) -> BoxFuture<'_, ProviderResult<CalendarEventsList>> {
        Box::pin(async move {
            let token = self.bearer()?;
            self.api.list_events(&token, &query).await
        })
    }

    fn get_event(
        &self,
        calendar_id: &str,
        event_id: &str,
    ) -> BoxFuture<'_, ProviderResult<CalendarEvent>> {
        let calendar_id = calendar_id.to_string();
        let event_id = event_id.to_string();
        Box::pin(async move {
            let token = self.bearer()?;
            self.api.get_event(&token, &calendar_id, &event_id).await
        })
    }

    fn create_event(
        &self,
        data: EventCreationData,
    ) -> BoxFuture<'_, ProviderResult<CalendarEvent>> {
        Box::pin(async move {
            let token = self.bearer()?;
            self.api.insert_event(&token, &data).await
        })
    }

    fn update_event(&self, data: EventUpdateData) -> BoxFuture<'_, ProviderResult<CalendarEvent>> {
        Box::pin(async move {
            let token = self.bearer()?;
            self.api.update_event(&token, &data).await
        })
    }

    fn delete_event(
        &self,
        calendar_id: &str,
        event_id: &str,
    ) -> BoxFuture<'_, ProviderResult<()>> {
        let calendar_id = calendar_id.to_string();
        let event_id = event_id.to_string();
        Box::pin(async move {
            let token = self.bearer()?;
            self.api.delete_event(&token, &calendar_id, &event_id).await
        })
    }

    fn upcoming_events(
        &self,
        max_results: usize,
    ) -> BoxFuture<'_, ProviderResult<Vec<CalendarEvent>>> {
        Box::pin(async move { upcoming_across_all(self, max_results).await })
    }
}
