//! CardDAV address book settings.

use integration_carddav::CardDavConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::default_true;

/// CardDAV address book configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct CardDavAppConfig {
    /// Address book URL (e.g., <https://dav.example.com/addressbooks/user/default/>)
    #[serde(default)]
    pub url: String,

    /// Username for authentication
    #[serde(default)]
    pub username: String,

    /// Password for authentication (sensitive - uses `SecretString`)
    #[serde(skip_serializing, default = "empty_secret")]
    pub password: SecretString,

    /// Verify TLS certificates (default: true)
    #[serde(default = "default_true")]
    pub verify_certs: bool,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for CardDavAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardDavAppConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("verify_certs", &self.verify_certs)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn empty_secret() -> SecretString {
    SecretString::from("")
}

pub(super) const fn default_timeout() -> u64 {
    30
}

impl Default for CardDavAppConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            username: String::new(),
            password: empty_secret(),
            verify_certs: true,
            timeout_secs: default_timeout(),
        }
    }
}

impl CardDavAppConfig {
    /// Convert to `integration_carddav`'s `CardDavConfig`
    #[must_use]
    pub fn to_carddav_config(&self) -> CardDavConfig {
        CardDavConfig {
            server_url: self.url.clone(),
            username: self.username.clone(),
            password: self.password.expose_secret().to_string(),
            verify_certs: self.verify_certs,
            timeout_secs: self.timeout_secs,
        }
    }

    /// Whether a username or password is configured
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() || !self.password.expose_secret().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CardDavAppConfig {
        CardDavAppConfig {
            url: "https://dav.example.com/addressbooks/user/default/".to_string(),
            username: "user".to_string(),
            password: SecretString::from("hunter2"),
            verify_certs: true,
            timeout_secs: 10,
        }
    }

    #[test]
    fn debug_redacts_password() {
        let debug = format!("{:?}", sample());
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn serialization_skips_password() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(!json.contains("hunter2"));
        assert!(json.contains("dav.example.com"));
    }

    #[test]
    fn converts_to_client_config() {
        let config = sample().to_carddav_config();
        assert_eq!(
            config.server_url,
            "https://dav.example.com/addressbooks/user/default/"
        );
        assert_eq!(config.username, "user");
        assert_eq!(config.password, "hunter2");
        assert!(config.verify_certs);
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn default_has_no_credentials() {
        let config = CardDavAppConfig::default();
        assert!(!config.has_credentials());
        assert!(config.verify_certs);
        assert_eq!(config.timeout_secs, 30);
        assert!(sample().has_credentials());
    }

    #[test]
    fn deserialization_defaults() {
        let json = r#"{"url":"https://dav.example.com"}"#;
        let config: CardDavAppConfig = serde_json::from_str(json).unwrap();
        assert!(config.verify_certs);
        assert_eq!(config.timeout_secs, 30);
        assert!(config.password.expose_secret().is_empty());
    }
}
