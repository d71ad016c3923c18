//! CalendarClient trait definition and the upcoming-events aggregation.
//!
//! [`CalendarClient`] is the narrow interface the dispatcher consumes: the
//! calendar read/write operations plus the OAuth operations the protocol
//! exposes. [`GoogleCalendarService`](crate::google::GoogleCalendarService)
//! is the production implementation; tests substitute stubs.

use std::future::Future;
use std::pin::Pin;

use futures_util::future::join_all;
use tracing::warn;

use calbridge_core::{
    CalendarEvent, CalendarEventsList, CalendarList, EventCreationData, EventQuery,
    EventUpdateData,
};

use crate::error::ProviderResult;

/// A boxed future for async trait methods.
///
/// Boxed futures keep the trait object-safe so the dispatcher can hold a
/// `dyn CalendarClient` behind an `Arc`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The narrow interface over the upstream calendar provider.
///
/// Implementations must be `Send + Sync`; the dispatcher invokes them
/// concurrently for independent requests. Methods taking borrowed string
/// arguments clone them before entering the returned future.
pub trait CalendarClient: Send + Sync {
    /// Returns the OAuth consent URL for the configured credentials.
    ///
    /// Pure and deterministic given the configuration.
    fn authorization_url(&self) -> String;

    /// Exchanges an authorization code for credentials and persists them.
    fn exchange_code(&self, code: &str) -> BoxFuture<'_, ProviderResult<()>>;

    /// Returns whether a usable access token is currently held in memory.
    fn is_authorized(&self) -> bool;

    /// Loads persisted credentials from durable storage.
    ///
    /// Returns whether a usable credential set was found.
    fn load_persisted_credentials(&self) -> BoxFuture<'_, ProviderResult<bool>>;

    /// Lists the calendars the user has access to.
    fn list_calendars(&self) -> BoxFuture<'_, ProviderResult<CalendarList>>;

    /// Lists events from one calendar.
    fn list_events(&self, query: EventQuery) -> BoxFuture<'_, ProviderResult<CalendarEventsList>>;

    /// Fetches a single event.
    fn get_event(
        &self,
        calendar_id: &str,
        event_id: &str,
    ) -> BoxFuture<'_, ProviderResult<CalendarEvent>>;

    /// Creates an event.
    fn create_event(&self, data: EventCreationData)
    -> BoxFuture<'_, ProviderResult<CalendarEvent>>;

    /// Updates an existing event.
    fn update_event(&self, data: EventUpdateData) -> BoxFuture<'_, ProviderResult<CalendarEvent>>;

    /// Deletes an event.
    fn delete_event(&self, calendar_id: &str, event_id: &str)
    -> BoxFuture<'_, ProviderResult<()>>;

    /// Returns upcoming events across all calendars, sorted by start instant.
    fn upcoming_events(
        &self,
        max_results: usize,
    ) -> BoxFuture<'_, ProviderResult<Vec<CalendarEvent>>>;
}

/// Aggregates upcoming events across every calendar the client can see.
///
/// Fetches each calendar's events concurrently. A calendar whose fetch fails
/// contributes an empty sequence (logged, never surfaced to the caller); the
/// whole operation only fails if the calendar list itself cannot be fetched.
///
/// Results are sorted ascending by [`CalendarEvent::effective_start`] with a
/// stable sort, so events with equal start instants retain their fetch
/// order, then truncated to `max_results`.
pub async fn upcoming_across_all(
    client: &dyn CalendarClient,
    max_results: usize,
) -> ProviderResult<Vec<CalendarEvent>> {
    let calendars = client.list_calendars().await?;
    let now = chrono::Utc::now().to_rfc3339();

    let fetches = calendars.items.iter().map(|calendar| {
        let query = EventQuery::new(&calendar.id)
            .with_time_min(now.as_str())
            .with_max_results(max_results as u32)
            .with_single_events(true)
            .with_order_by("startTime");
        async move {
            match client.list_events(query).await {
                Ok(list) => list.items,
                Err(error) => {
                    warn!(
                        calendar_id = %calendar.id,
                        error = %error,
                        "failed to fetch events for calendar, skipping"
                    );
                    Vec::new()
                }
            }
        }
    });

    let mut events: Vec<CalendarEvent> = join_all(fetches).await.into_iter().flatten().collect();
    events.sort_by(|a, b| a.effective_start().cmp(b.effective_start()));
    events.truncate(max_results);
    Ok(events)
}
