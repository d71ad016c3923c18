//! OAuth authentication strategy.

use std::sync::Arc;

use tracing::warn;

use crate::client::{BoxFuture, CalendarClient};

use super::strategy::AuthStrategy;

/// Authentication strategy backed by the calendar client's OAuth tokens.
///
/// Delegates to the shared [`CalendarClient`]: the in-memory token check is
/// O(1), and loading persisted credentials re-reads the token file the
/// client's storage points at.
pub struct OAuthStrategy {
    client: Arc<dyn CalendarClient>,
}

impl OAuthStrategy {
    /// Creates the strategy over the shared calendar client.
    pub fn new(client: Arc<dyn CalendarClient>) -> Self {
        Self { client }
    }
}

impl AuthStrategy for OAuthStrategy {
    fn name(&self) -> &str {
        "google_cloud"
    }

    fn is_authorized(&self) -> BoxFuture<'_, bool> {
        let authorized = self.client.is_authorized();
        Box::pin(async move { authorized })
    }

    fn load_persisted(&self) -> BoxFuture<'_, bool> {
        Box::pin(async move {
            match self.client.load_persisted_credentials().await {
                Ok(found) => found,
                Err(error) => {
                    warn!(error = %error, "failed to load persisted OAuth credentials");
                    false
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ProviderError, ProviderResult};
    use calbridge_core::{
        CalendarEvent, CalendarEventsList, CalendarList, EventCreationData, EventQuery,
        EventUpdateData,
    };

    struct FixedClient {
        authorized: bool,
        load_result: Result<bool, ()>,
    }

    impl CalendarClient for FixedClient {
        fn authorization_url(&self) -> String {
            String::new()
        }
        fn exchange_code(&self, _code: &str) -> BoxFuture<'_, ProviderResult<()>> {
            Box::pin(async { Ok(()) })
        }
        fn is_authorized(&self) -> bool {
            self.authorized
        }
        fn load_persisted_credentials(&self) -> BoxFuture<'_, ProviderResult<bool>> {
            let result = self
                .load_result
                .map_err(|_| ProviderError::configuration("token file corrupt"));
            Box::pin(async move { result })
        }
        fn list_calendars(&self) -> BoxFuture<'_, ProviderResult<CalendarList>> {
            Box::pin(async { Ok(CalendarList { items: Vec::new() }) })
        }
        fn list_events(
            &self,
            _query: EventQuery,
        ) -> BoxFuture<'_, ProviderResult<CalendarEventsList>> {
            Box::pin(async { Ok(CalendarEventsList::default()) })
        }
        fn get_event(
            &self,
            _calendar_id: &str,
            _event_id: &str,
        ) -> BoxFuture<'_, ProviderResult<CalendarEvent>> {
            Box::pin(async { Err(ProviderError::not_found("no such event")) })
        }
        fn create_event(
            &self,
            _data: EventCreationData,
        ) -> BoxFuture<'_, ProviderResult<CalendarEvent>> {
            Box::pin(async { Err(ProviderError::internal("not implemented")) })
        }
        fn update_event(
            &self,
            _data: EventUpdateData,
        ) -> BoxFuture<'_, ProviderResult<CalendarEvent>> {
            Box::pin(async { Err(ProviderError::internal("not implemented")) })
        }
        fn delete_event(
            &self,
            _calendar_id: &str,
            _event_id: &str,
        ) -> BoxFuture<'_, ProviderResult<()>> {
            Box::pin(async { Ok(()) })
        }
        fn upcoming_events(
            &self,
            _max_results: usize,
        ) -> BoxFuture<'_, ProviderResult<Vec<CalendarEvent>>> {
            Box::pin(async { Ok(Vec::new()) })
        }
    }

    #[tokio::test]
    async fn delegates_authorization_check() {
        let strategy = OAuthStrategy::new(Arc::new(FixedClient {
            authorized: true,
            load_result: Ok(true),
        }));
        assert_eq!(strategy.name(), "google_cloud");
        assert!(strategy.is_authorized().await);
    }

    #[tokio::test]
    async fn load_errors_report_as_not_found() {
        let strategy = OAuthStrategy::new(Arc::new(FixedClient {
            authorized: false,
            load_result: Err(()),
        }));
        assert!(!strategy.load_persisted().await);
    }
}
