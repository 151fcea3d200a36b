//! Domain entities

mod birthday_event;
mod contact_record;

pub use birthday_event::BirthdayEvent;
pub use contact_record::{ContactRecord, UNKNOWN_NAME};
