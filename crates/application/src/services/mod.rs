//! Application services - Use case implementations

mod birthday_calendar_service;

pub use birthday_calendar_service::{
    BirthdayCalendarService, DEFAULT_HORIZON_DAYS, select_next_event, sort_events,
};
