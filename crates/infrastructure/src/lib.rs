//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer.
//! Contains the CardDAV address book adapter, configuration loading and
//! validation, and logging setup.

pub mod adapters;
pub mod config;
pub mod telemetry;
pub mod validation;

pub use adapters::*;
pub use config::{AppConfig, CalendarConfig, CardDavAppConfig, LogFormat, LoggingConfig};
pub use telemetry::{TelemetryError, init_logging};
pub use validation::{ConfigValidator, ConfigWarning, WarningSeverity};
