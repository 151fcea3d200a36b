//! Contact record entity
//!
//! The subset of an address-book entry needed to place a birthday on a
//! calendar. Every field is optional; lenient parsers fill in what they find.

use serde::{Deserialize, Serialize};

use crate::value_objects::{PartialDate, StructuredName};

/// Name used when a contact has neither a display name nor a structured name
pub const UNKNOWN_NAME: &str = "Unknown";

/// A contact from an address book
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    /// vCard UID
    pub uid: Option<String>,
    /// Display name (FN property)
    pub display_name: Option<String>,
    /// Structured name (N property)
    pub structured_name: Option<StructuredName>,
    /// Birthday (BDAY property), `None` when missing or unparseable
    pub birth_date: Option<PartialDate>,
}

impl ContactRecord {
    /// Create an empty record
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the UID
    #[must_use]
    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(uid.into());
        self
    }

    /// Set the display name
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Set the structured name
    #[must_use]
    pub fn with_structured_name(mut self, name: StructuredName) -> Self {
        self.structured_name = Some(name);
        self
    }

    /// Set the birthday
    #[must_use]
    pub const fn with_birth_date(mut self, birth_date: PartialDate) -> Self {
        self.birth_date = Some(birth_date);
        self
    }

    /// Name to show on calendar entries
    ///
    /// Prefers the display name, then the rendered structured name, then
    /// [`UNKNOWN_NAME`]. Blank values count as missing.
    #[must_use]
    pub fn resolved_name(&self) -> String {
        if let Some(name) = self
            .display_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
        {
            return name.to_string();
        }
        self.structured_name
            .as_ref()
            .filter(|name| !name.is_blank())
            .map_or_else(|| UNKNOWN_NAME.to_string(), ToString::to_string)
    }
}
