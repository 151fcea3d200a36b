//! Structured name value object (vCard `N` property)

use std::fmt;

use serde::{Deserialize, Serialize};

/// The five components of a vCard structured name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredName {
    /// Family name(s)
    pub family: String,
    /// Given name(s)
    pub given: String,
    /// Additional (middle) names
    pub additional: String,
    /// Honorific prefixes
    pub prefixes: String,
    /// Honorific suffixes
    pub suffixes: String,
}

impl StructuredName {
    /// Build from components in vCard order: family, given, additional,
    /// prefixes, suffixes. Missing trailing components are empty.
    #[must_use]
    pub fn from_components<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut parts = components.into_iter().map(Into::into);
        Self {
            family: parts.next().unwrap_or_default(),
            given: parts.next().unwrap_or_default(),
            additional: parts.next().unwrap_or_default(),
            prefixes: parts.next().unwrap_or_default(),
            suffixes: parts.next().unwrap_or_default(),
        }
    }

    /// Whether every component is blank
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.to_string().is_empty()
    }
}

/// Renders as "prefixes given additional family suffixes", skipping blanks.
impl fmt::Display for StructuredName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = [
            &self.prefixes,
            &self.given,
            &self.additional,
            &self.family,
            &self.suffixes,
        ]
        .into_iter()
        .flat_map(|component| component.split(','))
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
        f.write_str(&rendered)
    }
}
