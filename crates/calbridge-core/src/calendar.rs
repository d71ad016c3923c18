//! Calendar data model shared between the upstream client and the protocol
//! layer.
//!
//! These types mirror the Google Calendar API v3 wire shapes (camelCase
//! field names) and pass through the server unmodified: the server proxies
//! the provider's payloads rather than re-normalizing them.

use serde::{Deserialize, Serialize};

/// A calendar from the user's calendar list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calendar {
    /// Unique calendar identifier (e.g. "primary" or an email address).
    pub id: String,

    /// Human-readable calendar name.
    #[serde(default)]
    pub summary: String,

    /// Calendar description, if set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// IANA timezone of the calendar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,

    /// Color identifier for UI display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_id: Option<String>,

    /// Background color for UI display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,

    /// Foreground color for UI display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground_color: Option<String>,

    /// Whether the calendar is selected in the user's UI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<bool>,

    /// Whether this is the user's primary calendar.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub primary: bool,

    /// The user's access role for this calendar (e.g. "owner", "reader").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_role: Option<String>,
}

impl Calendar {
    /// Creates a calendar with the given id and summary.
    pub fn new(id: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            summary: summary.into(),
            description: None,
            time_zone: None,
            color_id: None,
            background_color: None,
            foreground_color: None,
            selected: None,
            primary: false,
            access_role: None,
        }
    }

    /// Builder: mark as the primary calendar.
    pub fn with_primary(mut self, primary: bool) -> Self {
        self.primary = primary;
        self
    }
}

/// The user's calendar list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarList {
    /// The calendars.
    pub items: Vec<Calendar>,
}

/// Start or end of an event: either a timed instant or an all-day date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDateTime {
    /// RFC 3339 timestamp for timed events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,

    /// "YYYY-MM-DD" date for all-day events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// IANA timezone the timestamp is expressed in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl EventDateTime {
    /// Creates a timed event boundary.
    pub fn timed(date_time: impl Into<String>) -> Self {
        Self {
            date_time: Some(date_time.into()),
            date: None,
            time_zone: None,
        }
    }

    /// Creates an all-day event boundary.
    pub fn all_day(date: impl Into<String>) -> Self {
        Self {
            date_time: None,
            date: Some(date.into()),
            time_zone: None,
        }
    }

    /// Returns true if either a timed instant or an all-day date is present.
    pub fn is_specified(&self) -> bool {
        self.date_time.is_some() || self.date.is_some()
    }
}

/// An event attendee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventAttendee {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// "accepted", "declined", "tentative" or "needsAction".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_guests: Option<u32>,
}

/// The creator or organizer of an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPerson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "self")]
    pub is_self: Option<bool>,
}

/// Reminder configuration for an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventReminders {
    pub use_default: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<Vec<EventReminder>>,
}

/// A single reminder override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventReminder {
    /// Delivery method, e.g. "email" or "popup".
    pub method: String,
    /// Minutes before the event start.
    pub minutes: u32,
}

/// Conference (video call) information attached to an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConferenceData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conference_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conference_solution: Option<ConferenceSolution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_points: Option<Vec<EntryPoint>>,
}

/// The conferencing product backing a conference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConferenceSolution {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_uri: Option<String>,
}

/// A way to join a conference (video link, phone number, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPoint {
    pub entry_point_type: String,
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_code: Option<String>,
}

/// A calendar event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    /// Provider event identifier.
    pub id: String,

    /// Event title.
    #[serde(default)]
    pub summary: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Event start (timed or all-day).
    #[serde(default)]
    pub start: EventDateTime,

    /// Event end (timed or all-day).
    #[serde(default)]
    pub end: EventDateTime,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendees: Option<Vec<EventAttendee>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<EventPerson>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer: Option<EventPerson>,

    /// Event status, e.g. "confirmed" or "cancelled".
    #[serde(default)]
    pub status: String,

    /// RRULE lines for recurring events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Vec<String>>,

    /// For recurring instances, the id of the parent event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_event_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminders: Option<EventReminders>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conference_data: Option<ConferenceData>,
}

impl CalendarEvent {
    /// Returns the effective start instant as an ISO-8601 string: the timed
    /// start when present, else the all-day date, else the empty string.
    ///
    /// Both representations are zero-padded ISO forms, so lexicographic
    /// comparison of the returned strings orders events chronologically.
    /// This is the sort key for the upcoming-events aggregation.
    pub fn effective_start(&self) -> &str {
        self.start
            .date_time
            .as_deref()
            .or(self.start.date.as_deref())
            .unwrap_or("")
    }
}

/// A page of events from one calendar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEventsList {
    pub items: Vec<CalendarEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

/// Query parameters for listing events from one calendar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventQuery {
    /// The calendar to fetch events from.
    pub calendar_id: String,

    /// Lower bound for event start time (RFC 3339).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_min: Option<String>,

    /// Upper bound for event start time (RFC 3339).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_max: Option<String>,

    /// Maximum number of events to return.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,

    /// Whether to expand recurring events into instances.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub single_events: Option<bool>,

    /// Sort order, e.g. "startTime".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,

    /// Pagination token from a previous page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,

    /// Free-text search query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
}

impl EventQuery {
    /// Creates a query for the given calendar.
    pub fn new(calendar_id: impl Into<String>) -> Self {
        Self {
            calendar_id: calendar_id.into(),
            ..Default::default()
        }
    }

    /// Builder: set the lower time bound.
    pub fn with_time_min(mut self, time_min: impl Into<String>) -> Self {
        self.time_min = Some(time_min.into());
        self
    }

    /// Builder: set the upper time bound.
    pub fn with_time_max(mut self, time_max: impl Into<String>) -> Self {
        self.time_max = Some(time_max.into());
        self
    }

    /// Builder: set the maximum result count.
    pub fn with_max_results(mut self, max: u32) -> Self {
        self.max_results = Some(max);
        self
    }

    /// Builder: set recurring-event expansion.
    pub fn with_single_events(mut self, single: bool) -> Self {
        self.single_events = Some(single);
        self
    }

    /// Builder: set the sort order.
    pub fn with_order_by(mut self, order: impl Into<String>) -> Self {
        self.order_by = Some(order.into());
        self
    }
}

/// Payload for creating an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventCreationData {
    pub calendar_id: String,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub start: EventDateTime,
    #[serde(default)]
    pub end: EventDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendees: Option<Vec<EventAttendee>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminders: Option<EventReminders>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conference_data: Option<ConferenceData>,
}

/// Payload for updating an event: the creation fields plus the event id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventUpdateData {
    pub calendar_id: String,
    pub event_id: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub start: EventDateTime,
    #[serde(default)]
    pub end: EventDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendees: Option<Vec<EventAttendee>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminders: Option<EventReminders>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conference_data: Option<ConferenceData>,
}

/// Payload for deleting an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDeletionData {
    pub calendar_id: String,
    pub event_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calendar_serde_camel_case() {
        let calendar = Calendar::new("primary", "My Calendar").with_primary(true);
        let json = serde_json::to_string(&calendar).unwrap();
        assert!(json.contains(r#""id":"primary""#));
        assert!(json.contains(r#""primary":true"#));

        let parsed: Calendar = serde_json::from_str(
            r#"{"id":"work@example.com","summary":"Work","timeZone":"Europe/Paris","accessRole":"owner"}"#,
        )
        .unwrap();
        assert_eq!(parsed.time_zone, Some("Europe/Paris".to_string()));
        assert_eq!(parsed.access_role, Some("owner".to_string()));
        assert!(!parsed.primary);
    }

    #[test]
    fn event_date_time_specified() {
        assert!(EventDateTime::timed("2024-03-15T10:00:00Z").is_specified());
        assert!(EventDateTime::all_day("2024-03-15").is_specified());
        assert!(!EventDateTime::default().is_specified());
    }

    #[test]
    fn effective_start_prefers_timed() {
        let event = CalendarEvent {
            id: "evt-1".to_string(),
            start: EventDateTime {
                date_time: Some("2024-03-15T10:00:00Z".to_string()),
                date: Some("2024-03-15".to_string()),
                time_zone: None,
            },
            ..Default::default()
        };
        assert_eq!(event.effective_start(), "2024-03-15T10:00:00Z");
    }

    #[test]
    fn effective_start_all_day_fallback() {
        let event = CalendarEvent {
            id: "evt-1".to_string(),
            start: EventDateTime::all_day("2024-03-15"),
            ..Default::default()
        };
        assert_eq!(event.effective_start(), "2024-03-15");
    }

    #[test]
    fn effective_start_missing_is_empty() {
        let event = CalendarEvent {
            id: "evt-1".to_string(),
            ..Default::default()
        };
        assert_eq!(event.effective_start(), "");
    }

    #[test]
    fn event_serde_camel_case() {
        let json = r#"{
            "id": "evt-1",
            "summary": "Standup",
            "start": {"dateTime": "2024-03-15T10:00:00Z"},
            "end": {"dateTime": "2024-03-15T10:15:00Z"},
            "status": "confirmed",
            "recurringEventId": "evt-parent",
            "conferenceData": {
                "conferenceSolution": {"name": "Meet"},
                "entryPoints": [{"entryPointType": "video", "uri": "https://meet.example/abc"}]
            }
        }"#;

        let event: CalendarEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.recurring_event_id, Some("evt-parent".to_string()));
        let cd = event.conference_data.as_ref().unwrap();
        assert_eq!(cd.conference_solution.as_ref().unwrap().name, "Meet");

        let out = serde_json::to_string(&event).unwrap();
        assert!(out.contains("recurringEventId"));
        assert!(out.contains("entryPointType"));
    }

    #[test]
    fn event_query_builder() {
        let query = EventQuery::new("primary")
            .with_time_min("2024-01-01T00:00:00Z")
            .with_max_results(25)
            .with_single_events(true)
            .with_order_by("startTime");

        assert_eq!(query.calendar_id, "primary");
        assert_eq!(query.time_min, Some("2024-01-01T00:00:00Z".to_string()));
        assert_eq!(query.max_results, Some(25));
        assert_eq!(query.single_events, Some(true));
        assert_eq!(query.order_by, Some("startTime".to_string()));
        assert!(query.time_max.is_none());
    }

    #[test]
    fn creation_data_from_request_json() {
        let json = r#"{
            "calendarId": "primary",
            "summary": "Planning",
            "start": {"dateTime": "2024-04-01T09:00:00Z"},
            "end": {"dateTime": "2024-04-01T10:00:00Z"},
            "attendees": [{"email": "a@example.com"}]
        }"#;

        let data: EventCreationData = serde_json::from_str(json).unwrap();
        assert_eq!(data.calendar_id, "primary");
        assert_eq!(data.summary, "Planning");
        assert!(data.start.is_specified());
        assert_eq!(data.attendees.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn events_list_page_token() {
        let json = r#"{"items": [], "nextPageToken": "page-2"}"#;
        let list: CalendarEventsList = serde_json::from_str(json).unwrap();
        assert_eq!(list.next_page_token, Some("page-2".to_string()));

        let empty: CalendarEventsList = serde_json::from_str(r#"{"items": []}"#).unwrap();
        assert!(empty.next_page_token.is_none());
    }
}
