//! Validation of application configuration
//!
//! Checks configuration for problems and reports them at startup.
//! Critical issues prevent the CLI from running.

use std::fmt;

use reqwest::Url;

use crate::config::AppConfig;

/// Severity level for configuration warnings
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WarningSeverity {
    /// Informational - no action required
    Info,
    /// Warning - should be addressed but not fatal
    Warning,
    /// Critical - the configuration cannot work
    Critical,
}

impl fmt::Display for WarningSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARNING"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// A configuration warning with severity and description
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// Severity level of the warning
    pub severity: WarningSeverity,
    /// Short code identifying the warning type
    pub code: String,
    /// Human-readable description of the issue
    pub message: String,
    /// Recommended action to resolve the issue
    pub recommendation: String,
}

impl ConfigWarning {
    /// Create a new configuration warning
    #[must_use]
    pub fn new(
        severity: WarningSeverity,
        code: impl Into<String>,
        message: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            code: code.into(),
            message: message.into(),
            recommendation: recommendation.into(),
        }
    }

    /// Create a critical warning
    #[must_use]
    pub fn critical(
        code: impl Into<String>,
        message: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Self::new(WarningSeverity::Critical, code, message, recommendation)
    }

    /// Create a warning-level issue
    #[must_use]
    pub fn warning(
        code: impl Into<String>,
        message: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Self::new(WarningSeverity::Warning, code, message, recommendation)
    }

    /// Create an informational notice
    #[must_use]
    pub fn info(
        code: impl Into<String>,
        message: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Self::new(WarningSeverity::Info, code, message, recommendation)
    }

    /// Check if this warning is critical
    #[must_use]
    pub const fn is_critical(&self) -> bool {
        matches!(self.severity, WarningSeverity::Critical)
    }
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {} - {}",
            self.severity, self.code, self.message, self.recommendation
        )
    }
}

/// Validates application configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate configuration and return all warnings
    ///
    /// Returns a list of warnings sorted by severity (critical first).
    #[must_use]
    pub fn validate(config: &AppConfig) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        Self::check_carddav_url(config, &mut warnings);
        Self::check_tls_verification(config, &mut warnings);
        Self::check_timeout(config, &mut warnings);
        Self::check_credentials(config, &mut warnings);
        Self::check_calendar(config, &mut warnings);

        warnings.sort_by(|a, b| b.severity.cmp(&a.severity));

        warnings
    }

    /// Check if startup should be blocked
    #[must_use]
    pub fn should_block_startup(warnings: &[ConfigWarning]) -> bool {
        warnings.iter().any(ConfigWarning::is_critical)
    }

    /// Log all warnings using tracing
    pub fn log_warnings(warnings: &[ConfigWarning]) {
        for warning in warnings {
            match warning.severity {
                WarningSeverity::Critical => {
                    tracing::error!(
                        code = %warning.code,
                        message = %warning.message,
                        recommendation = %warning.recommendation,
                        "Configuration error"
                    );
                },
                WarningSeverity::Warning => {
                    tracing::warn!(
                        code = %warning.code,
                        message = %warning.message,
                        recommendation = %warning.recommendation,
                        "Configuration warning"
                    );
                },
                WarningSeverity::Info => {
                    tracing::info!(
                        code = %warning.code,
                        message = %warning.message,
                        recommendation = %warning.recommendation,
                        "Configuration notice"
                    );
                },
            }
        }
    }

    fn check_carddav_url(config: &AppConfig, warnings: &mut Vec<ConfigWarning>) {
        let raw = config.carddav.url.trim();
        if raw.is_empty() {
            warnings.push(ConfigWarning::critical(
                "CARDDAV_URL_MISSING",
                "No CardDAV address book URL is configured",
                "Set carddav.url or BIRTHDAY_CALENDAR__CARDDAV__URL",
            ));
            return;
        }

        match Url::parse(raw) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {
                if url.scheme() == "http" && config.carddav.has_credentials() {
                    warnings.push(ConfigWarning::warning(
                        "CARDDAV_PLAINTEXT_CREDENTIALS",
                        "Credentials are sent to the address book over plain HTTP",
                        "Use an https:// URL",
                    ));
                }
            },
            Ok(url) => warnings.push(ConfigWarning::critical(
                "CARDDAV_URL_SCHEME",
                format!("Unsupported CardDAV URL scheme: {}", url.scheme()),
                "Use an http:// or https:// URL",
            )),
            Err(e) => warnings.push(ConfigWarning::critical(
                "CARDDAV_URL_INVALID",
                format!("Invalid CardDAV URL: {e}"),
                "Use a full address book URL such as https://dav.example.com/addressbooks/user/default/",
            )),
        }
    }

    fn check_tls_verification(config: &AppConfig, warnings: &mut Vec<ConfigWarning>) {
        if !config.carddav.verify_certs {
            warnings.push(ConfigWarning::warning(
                "TLS_VERIFY_DISABLED",
                "TLS certificate verification is disabled for CardDAV",
                "Set carddav.verify_certs = true unless the server uses a self-signed certificate",
            ));
        }
    }

    fn check_timeout(config: &AppConfig, warnings: &mut Vec<ConfigWarning>) {
        if config.carddav.timeout_secs == 0 {
            warnings.push(ConfigWarning::critical(
                "CARDDAV_TIMEOUT_ZERO",
                "CardDAV request timeout is zero seconds",
                "Set carddav.timeout_secs to at least 1",
            ));
        }
    }

    fn check_credentials(config: &AppConfig, warnings: &mut Vec<ConfigWarning>) {
        if !config.carddav.has_credentials() {
            warnings.push(ConfigWarning::info(
                "CARDDAV_NO_CREDENTIALS",
                "No CardDAV username or password configured",
                "Set carddav.username and carddav.password if the server requires authentication",
            ));
        }
    }

    fn check_calendar(config: &AppConfig, warnings: &mut Vec<ConfigWarning>) {
        if config.calendar.days == 0 {
            warnings.push(ConfigWarning::critical(
                "CALENDAR_HORIZON_ZERO",
                "Calendar horizon is zero days",
                "Set calendar.days to at least 1",
            ));
        }

        if let Err(e) = config.calendar.timezone() {
            warnings.push(ConfigWarning::critical(
                "CALENDAR_TIMEZONE_INVALID",
                e.to_string(),
                "Use an IANA timezone name such as Europe/Berlin",
            ));
        }
    }
}
