//! Birthday event entity
//!
//! One all-day calendar occurrence of a contact's birthday. Built fresh for
//! each query and never mutated afterwards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An all-day birthday occurrence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthdayEvent {
    /// First day of the event
    pub start: NaiveDate,
    /// Day after the event (exclusive end)
    pub end: NaiveDate,
    /// Title, e.g. "Jane Doe's Birthday (38)"
    pub summary: String,
    /// Description, e.g. "Happy 38th Birthday!"
    pub description: String,
    /// Location (always empty)
    pub location: String,
    /// Age reached on this day, when the birth year is known
    pub age: Option<u32>,
}

impl BirthdayEvent {
    /// Build the event for `name` on `date`
    ///
    /// `age` is only shown when it is positive. Returns `None` when the day
    /// after `date` cannot be represented.
    #[must_use]
    pub fn on_date(name: &str, date: NaiveDate, age: Option<u32>) -> Option<Self> {
        let age = age.filter(|age| *age > 0);
        let end = date.succ_opt()?;

        let (summary, description) = match age {
            Some(age) => (
                format!("{name}'s Birthday ({age})"),
                format!("Happy {age}th Birthday!"),
            ),
            None => (format!("{name}'s Birthday"), "Happy Birthday!".to_string()),
        };

        Some(Self {
            start: date,
            end,
            summary,
            description,
            location: String::new(),
            age,
        })
    }
}
