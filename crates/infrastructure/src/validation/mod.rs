//! Configuration validation module
//!
//! Provides startup checks for application configuration.

pub mod config_validator;

pub use config_validator::{ConfigValidator, ConfigWarning, WarningSeverity};
