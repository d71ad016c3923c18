//! Google Calendar API v3 REST client.
//!
//! Low-level HTTP layer: request building, status-code mapping and response
//! parsing. Authentication state lives in
//! [`TokenStorage`](super::tokens::TokenStorage); callers pass the current
//! access token per call.

use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use calbridge_core::{
    CalendarEvent, CalendarEventsList, CalendarList, ConferenceData, EventAttendee,
    EventCreationData, EventDateTime, EventQuery, EventReminders, EventUpdateData,
};

use crate::error::{ProviderError, ProviderResult};

/// Base URL for Google Calendar API v3.
const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// Google Calendar API client.
#[derive(Debug)]
pub struct GoogleCalendarClient {
    http_client: reqwest::Client,
}

impl GoogleCalendarClient {
    /// Creates a new Google Calendar client.
    pub fn new(timeout: Duration) -> ProviderResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                ProviderError::internal(format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self { http_client })
    }

    /// Lists the calendars on the user's calendar list.
    pub async fn list_calendars(&self, access_token: &str) -> ProviderResult<CalendarList> {
        let url = format!("{}/users/me/calendarList", CALENDAR_API_BASE);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(map_send_error)?;

        let list: CalendarList = parse_response(response).await?;
        debug!(calendar_count = list.items.len(), "fetched calendar list");
        Ok(list)
    }

    /// Lists events from one calendar.
    ///
    /// Defaults mirror the upstream contract: 10 results, recurring events
    /// expanded, ordered by start time.
    pub async fn list_events(
        &self,
        access_token: &str,
        query: &EventQuery,
    ) -> ProviderResult<CalendarEventsList> {
        let url = format!(
            "{}/calendars/{}/events",
            CALENDAR_API_BASE,
            urlencoding::encode(&query.calendar_id)
        );

        let max_results = query.max_results.unwrap_or(10);
        let single_events = query.single_events.unwrap_or(true);
        let order_by = query.order_by.as_deref().unwrap_or("startTime");

        let mut request = self
            .http_client
            .get(&url)
            .bearer_auth(access_token)
            .query(&[
                ("maxResults", max_results.to_string()),
                ("singleEvents", single_events.to_string()),
                ("orderBy", order_by.to_string()),
            ]);

        if let Some(ref time_min) = query.time_min {
            request = request.query(&[("timeMin", time_min)]);
        }
        if let Some(ref time_max) = query.time_max {
            request = request.query(&[("timeMax", time_max)]);
        }
        if let Some(ref page_token) = query.page_token {
            request = request.query(&[("pageToken", page_token)]);
        }
        if let Some(ref q) = query.q {
            request = request.query(&[("q", q)]);
        }

        let response = request.send().await.map_err(map_send_error)?;

        let list: CalendarEventsList = parse_response(response).await?;
        debug!(
            calendar_id = %query.calendar_id,
            event_count = list.items.len(),
            "fetched events"
        );
        Ok(list)
    }

    /// Fetches a single event by id.
    pub async fn get_event(
        &self,
        access_token: &str,
        calendar_id: &str,
        event_id: &str,
    ) -> ProviderResult<CalendarEvent> {
        let url = format!(
            "{}/calendars/{}/events/{}",
            CALENDAR_API_BASE,
            urlencoding::encode(calendar_id),
            urlencoding::encode(event_id)
        );

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(map_send_error)?;

        parse_response(response).await
    }

    /// Creates an event in the given calendar.
    pub async fn insert_event(
        &self,
        access_token: &str,
        data: &EventCreationData,
    ) -> ProviderResult<CalendarEvent> {
        let url = format!(
            "{}/calendars/{}/events",
            CALENDAR_API_BASE,
            urlencoding::encode(&data.calendar_id)
        );

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(access_token)
            .json(&EventBody::from_creation(data))
            .send()
            .await
            .map_err(map_send_error)?;

        parse_response(response).await
    }

    /// Replaces an existing event.
    pub async fn update_event(
        &self,
        access_token: &str,
        data: &EventUpdateData,
    ) -> ProviderResult<CalendarEvent> {
        let url = format!(
            "{}/calendars/{}/events/{}",
            CALENDAR_API_BASE,
            urlencoding::encode(&data.calendar_id),
            urlencoding::encode(&data.event_id)
        );

        let response = self
            .http_client
            .put(&url)
            .bearer_auth(access_token)
            .json(&EventBody::from_update(data))
            .send()
            .await
            .map_err(map_send_error)?;

        parse_response(response).await
    }

    /// Deletes an event.
    pub async fn delete_event(
        &self,
        access_token: &str,
        calendar_id: &str,
        event_id: &str,
    ) -> ProviderResult<()> {
        let url = format!(
            "{}/calendars/{}/events/{}",
            CALENDAR_API_BASE,
            urlencoding::encode(calendar_id),
            urlencoding::encode(event_id)
        );

        let response = self
            .http_client
            .delete(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(map_status_error(status, &body))
        }
    }
}

/// Request body for event insert/update: the event fields without the
/// routing identifiers (calendar id, event id), which travel in the URL.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EventBody<'a> {
    summary: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<&'a str>,
    start: &'a EventDateTime,
    end: &'a EventDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    attendees: Option<&'a Vec<EventAttendee>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    recurrence: Option<&'a Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reminders: Option<&'a EventReminders>,
    #[serde(skip_serializing_if = "Option::is_none")]
    conference_data: Option<&'a ConferenceData>,
}

impl<'a> EventBody<'a> {
    fn from_creation(data: &'a EventCreationData) -> Self {
        Self {
            summary: &data.summary,
            description: data.description.as_deref(),
            location: data.location.as_deref(),
            start: &data.start,
            end: &data.end,
            attendees: data.attendees.as_ref(),
            recurrence: data.recurrence.as_ref(),
            reminders: data.reminders.as_ref(),
            conference_data: data.conference_data.as_ref(),
        }
    }

    fn from_update(data: &'a EventUpdateData) -> Self {
        Self {
            summary: &data.summary,
            description: data.description.as_deref(),
            location: data.location.as_deref(),
            start: &data.start,
            end: &data.end,
            attendees: data.attendees.as_ref(),
            recurrence: data.recurrence.as_ref(),
            reminders: data.reminders.as_ref(),
            conference_data: data.conference_data.as_ref(),
        }
    }
}

/// Maps a reqwest send error to a provider error.
fn map_send_error(error: reqwest::Error) -> ProviderError {
    if error.is_timeout() {
        ProviderError::network("request timeout")
    } else if error.is_connect() {
        ProviderError::network(format!("connection failed: {}", error))
    } else {
        ProviderError::network(format!("request failed: {}", error))
    }
}

/// Maps a non-success API status to a provider error.
fn map_status_error(status: reqwest::StatusCode, body: &str) -> ProviderError {
    match status {
        reqwest::StatusCode::UNAUTHORIZED => {
            ProviderError::authentication("access token expired or invalid")
        }
        reqwest::StatusCode::FORBIDDEN => ProviderError::authorization("access denied to calendar"),
        reqwest::StatusCode::NOT_FOUND => ProviderError::not_found("calendar or event not found"),
        reqwest::StatusCode::TOO_MANY_REQUESTS => {
            ProviderError::rate_limited("rate limit exceeded")
        }
        reqwest::StatusCode::BAD_REQUEST => {
            ProviderError::bad_request(format!("API rejected request: {}", body))
        }
        _ => ProviderError::server(format!("API error ({}): {}", status, body)),
    }
}

/// Reads and parses a JSON response, mapping error statuses first.
async fn parse_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> ProviderResult<T> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ProviderError::network(format!("failed to read response: {}", e)))?;

    if !status.is_success() {
        return Err(map_status_error(status, &body));
    }

    serde_json::from_str(&body)
        .map_err(|e| ProviderError::invalid_response(format!("failed to parse response: {}", e)))
}
