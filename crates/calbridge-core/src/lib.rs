//! Core types: calendar data model, tracing setup

pub mod calendar;
pub mod tracing;

pub use calendar::{
    Calendar, CalendarEvent, CalendarEventsList, CalendarList, ConferenceData, ConferenceSolution,
    EntryPoint, EventAttendee, EventCreationData, EventDateTime, EventDeletionData, EventPerson,
    EventQuery, EventReminder, EventReminders, EventUpdateData,
};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
