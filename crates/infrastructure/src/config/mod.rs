//! Application configuration
//!
//! Split into focused sub-modules:
//! - `calendar`: calendar name, horizon and timezone
//! - `carddav`: address book URL, credentials and transport settings
//! - `logging`: log filter and output format
//!
//! Values are layered: built-in defaults, then a config file, then
//! environment variables prefixed with `BIRTHDAY_CALENDAR` (nested keys
//! separated by `__`, e.g. `BIRTHDAY_CALENDAR__CARDDAV__PASSWORD`).

mod calendar;
mod carddav;
mod logging;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use calendar::CalendarConfig;
pub use carddav::CardDavAppConfig;
pub use config::ConfigError;
pub use logging::{LogFormat, LoggingConfig};

/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "BIRTHDAY_CALENDAR";

/// Separator between nested keys in environment variable overrides
pub const ENV_SEPARATOR: &str = "__";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Calendar configuration
    #[serde(default)]
    pub calendar: CalendarConfig,

    /// CardDAV address book configuration
    #[serde(default)]
    pub carddav: CardDavAppConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from defaults, a config file and the environment
    ///
    /// Without an explicit `path`, an optional file named `config` (any
    /// supported extension) in the working directory is used. An explicit
    /// path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("config").required(false),
        };

        let builder = config::Config::builder()
            // Start with defaults
            .set_default("calendar.name", calendar::default_name())?
            .set_default("calendar.days", calendar::default_days())?
            .set_default("calendar.timezone", calendar::default_timezone())?
            .set_default("carddav.url", "")?
            .set_default("carddav.username", "")?
            .set_default("carddav.password", "")?
            .set_default("carddav.verify_certs", true)?
            .set_default("carddav.timeout_secs", carddav::default_timeout())?
            .set_default("logging.filter", logging::default_filter())?
            .set_default("logging.format", LogFormat::default().to_string())?
            .add_source(file)
            // Override with environment variables (e.g., BIRTHDAY_CALENDAR__CALENDAR__DAYS)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
