//! Birthday calendar settings.

use domain::{DomainError, Timezone};
use serde::{Deserialize, Serialize};

/// Birthday calendar configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// Calendar display name
    #[serde(default = "default_name")]
    pub name: String,

    /// Horizon in days for the next birthday (default: 30)
    #[serde(default = "default_days")]
    pub days: u32,

    /// IANA timezone the calendar days are interpreted in (default: UTC)
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

pub(super) fn default_name() -> String {
    "Birthdays".to_string()
}

pub(super) const fn default_days() -> u32 {
    30
}

pub(super) fn default_timezone() -> String {
    "UTC".to_string()
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            days: default_days(),
            timezone: default_timezone(),
        }
    }
}

impl CalendarConfig {
    /// The configured timezone, validated
    pub fn timezone(&self) -> Result<Timezone, DomainError> {
        Timezone::parse(&self.timezone)
    }
}
