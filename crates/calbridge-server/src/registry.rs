//! The endpoint registry.
//!
//! A declarative, immutable list of every supported protocol operation.
//! The same path constants back the dispatcher's routing match, so the
//! registry and the router cannot drift apart; a test asserts the paths are
//! unique, which is what exact-match routing relies on.

use calbridge_protocol::{EndpointDescriptor, EndpointParameter, EndpointReturns};

/// Literal endpoint paths. Matched by exact string equality; no patterns,
/// no wildcards.
pub mod paths {
    /// OAuth consent URL.
    pub const AUTH_URL: &str = "/auth/url";
    /// OAuth callback with the authorization code.
    pub const AUTH_CALLBACK: &str = "/auth/callback";
    /// Calendar list.
    pub const CALENDARS: &str = "/calendars";
    /// Events from one calendar.
    pub const EVENTS: &str = "/events";
    /// Upcoming events across all calendars.
    pub const EVENTS_UPCOMING: &str = "/events/upcoming";
    /// Event creation.
    pub const EVENTS_CREATE: &str = "/events/create";
    /// Event update.
    pub const EVENTS_UPDATE: &str = "/events/update";
    /// Event deletion.
    pub const EVENTS_DELETE: &str = "/events/delete";
    /// Single event detail.
    pub const EVENTS_DETAIL: &str = "/events/detail";
}

/// Returns the full set of supported endpoints.
///
/// Pure and deterministic: the descriptors are built from constants only,
/// so repeated calls return structurally identical results.
pub fn endpoints() -> Vec<EndpointDescriptor> {
    vec![
        EndpointDescriptor::new(paths::AUTH_URL, "GET", "Get Google OAuth2 authorization URL")
            .with_returns(EndpointReturns::new(
                "string",
                "Authorization URL to redirect the user",
            )),
        EndpointDescriptor::new(
            paths::AUTH_CALLBACK,
            "POST",
            "Handle OAuth2 callback after authorization",
        )
        .with_parameter(EndpointParameter::required(
            "code",
            "string",
            "Authorization code from Google",
        ))
        .with_returns(EndpointReturns::new(
            "boolean",
            "Whether authentication was successful",
        )),
        EndpointDescriptor::new(paths::CALENDARS, "GET", "Get list of available calendars")
            .with_returns(EndpointReturns::new(
                "CalendarList",
                "List of available calendars",
            )),
        EndpointDescriptor::new(paths::EVENTS, "GET", "Get events from a specific calendar")
            .with_parameter(EndpointParameter::required(
                "calendarId",
                "string",
                "ID of the calendar to fetch events from",
            ))
            .with_parameter(EndpointParameter::optional(
                "timeMin",
                "string",
                "Start time in ISO format",
            ))
            .with_parameter(EndpointParameter::optional(
                "timeMax",
                "string",
                "End time in ISO format",
            ))
            .with_parameter(EndpointParameter::optional(
                "maxResults",
                "number",
                "Maximum number of events to return",
            ))
            .with_returns(EndpointReturns::new(
                "CalendarEventsList",
                "List of calendar events",
            )),
        EndpointDescriptor::new(
            paths::EVENTS_UPCOMING,
            "GET",
            "Get upcoming events across all calendars",
        )
        .with_parameter(EndpointParameter::optional(
            "maxResults",
            "number",
            "Maximum number of events to return",
        ))
        .with_returns(EndpointReturns::new(
            "CalendarEvent[]",
            "List of upcoming events sorted by start time",
        )),
        EndpointDescriptor::new(paths::EVENTS_CREATE, "POST", "Create a new calendar event")
            .with_parameter(EndpointParameter::required(
                "eventData",
                "EventCreationData",
                "Event data to create",
            ))
            .with_returns(EndpointReturns::new("CalendarEvent", "Created event details")),
        EndpointDescriptor::new(
            paths::EVENTS_UPDATE,
            "PUT",
            "Update an existing calendar event",
        )
        .with_parameter(EndpointParameter::required(
            "eventData",
            "EventUpdateData",
            "Event data to update",
        ))
        .with_returns(EndpointReturns::new("CalendarEvent", "Updated event details")),
        EndpointDescriptor::new(paths::EVENTS_DELETE, "DELETE", "Delete a calendar event")
            .with_parameter(EndpointParameter::required(
                "deleteData",
                "EventDeletionData",
                "Event data to delete",
            ))
            .with_returns(EndpointReturns::new(
                "boolean",
                "Whether deletion was successful",
            )),
        EndpointDescriptor::new(paths::EVENTS_DETAIL, "GET", "Get details of a specific event")
            .with_parameter(EndpointParameter::required(
                "calendarId",
                "string",
                "ID of the calendar",
            ))
            .with_parameter(EndpointParameter::required(
                "eventId",
                "string",
                "ID of the event",
            ))
            .with_returns(EndpointReturns::new(
                "CalendarEvent",
                "Detailed event information",
            )),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn paths_are_unique() {
        let endpoints = endpoints();
        let paths: HashSet<&str> = endpoints.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths.len(), endpoints.len());
    }

    #[test]
    fn registry_is_deterministic() {
        assert_eq!(endpoints(), endpoints());
    }

    #[test]
    fn registry_covers_expected_paths() {
        let endpoints = endpoints();
        assert_eq!(endpoints.len(), 9);
        for path in [
            paths::AUTH_URL,
            paths::AUTH_CALLBACK,
            paths::CALENDARS,
            paths::EVENTS,
            paths::EVENTS_UPCOMING,
            paths::EVENTS_CREATE,
            paths::EVENTS_UPDATE,
            paths::EVENTS_DELETE,
            paths::EVENTS_DETAIL,
        ] {
            assert!(
                endpoints.iter().any(|e| e.path == path),
                "missing descriptor for {}",
                path
            );
        }
    }

    #[test]
    fn required_parameters_are_declared() {
        let endpoints = endpoints();
        let events = endpoints
            .iter()
            .find(|e| e.path == paths::EVENTS)
            .unwrap();
        let calendar_id = events
            .parameters
            .iter()
            .find(|p| p.name == "calendarId")
            .unwrap();
        assert!(calendar_id.required);

        let upcoming = endpoints
            .iter()
            .find(|e| e.path == paths::EVENTS_UPCOMING)
            .unwrap();
        assert!(upcoming.parameters.iter().all(|p| !p.required));
    }
}
