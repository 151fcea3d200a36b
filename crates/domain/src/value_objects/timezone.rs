//! Timezone value object

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A validated IANA timezone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timezone(Tz);

impl Timezone {
    /// Parse an IANA timezone name (e.g. "Europe/Berlin")
    pub fn parse(name: &str) -> Result<Self, DomainError> {
        name.trim()
            .parse::<Tz>()
            .map(Self)
            .map_err(|_| DomainError::InvalidTimezone(name.to_string()))
    }

    /// UTC timezone
    #[must_use]
    pub const fn utc() -> Self {
        Self(Tz::UTC)
    }

    /// The underlying `chrono-tz` zone
    #[must_use]
    pub const fn tz(&self) -> Tz {
        self.0
    }

    /// IANA name
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    /// Current instant in this zone
    #[must_use]
    pub fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.0)
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self::utc()
    }
}

impl fmt::Display for Timezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Timezone {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Timezone {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Timezone> for String {
    fn from(tz: Timezone) -> Self {
        tz.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iana_name() {
        let tz = Timezone::parse("Europe/Berlin").unwrap();
        assert_eq!(tz.name(), "Europe/Berlin");
        assert_eq!(tz.tz(), chrono_tz::Europe::Berlin);
    }

    #[test]
    fn rejects_unknown_name() {
        let err = Timezone::parse("Mars/Olympus").unwrap_err();
        assert!(matches!(err, DomainError::InvalidTimezone(name) if name == "Mars/Olympus"));
    }

    #[test]
    fn default_is_utc() {
        assert_eq!(Timezone::default().name(), "UTC");
        assert_eq!(Timezone::default().tz(), Tz::UTC);
    }

    #[test]
    fn display_uses_name() {
        let tz: Timezone = "Europe/London".parse().unwrap();
        assert_eq!(format!("{tz}"), "Europe/London");
    }

    #[test]
    fn serde_uses_string_form() {
        let tz = Timezone::parse("Asia/Tokyo").unwrap();
        let json = serde_json::to_string(&tz).unwrap();
        assert_eq!(json, "\"Asia/Tokyo\"");
        let back: Timezone = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tz);
        assert!(serde_json::from_str::<Timezone>("\"Nowhere/Land\"").is_err());
    }
}
