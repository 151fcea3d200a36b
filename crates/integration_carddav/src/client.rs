//! CardDAV client
//!
//! Fetches the address data of a CardDAV address book with a single
//! `PROPFIND` request (depth 1) and hands back the raw multistatus body.
//! Turning that body into contacts is the job of [`crate::extractor`].

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

/// PROPFIND body requesting etags and address data of every address object
pub const PROPFIND_BODY: &str = r#"<d:propfind xmlns:d="DAV:" xmlns:c="urn:ietf:params:xml:ns:carddav">
    <d:prop>
        <d:getetag />
        <c:address-data />
    </d:prop>
</d:propfind>"#;

/// CardDAV client errors
#[derive(Debug, Error)]
pub enum CardDavError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Unexpected status: {0}")]
    UnexpectedStatus(u16),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Request timed out")]
    Timeout,
}

/// CardDAV server configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct CardDavConfig {
    /// Address book URL (e.g., <https://dav.example.com/addressbooks/user/default/>)
    pub server_url: String,
    /// Username
    pub username: String,
    /// Password (excluded from serialization to prevent leaks)
    #[serde(skip_serializing, default)]
    pub password: String,
    /// Verify TLS certificates (default: true)
    #[serde(default = "default_true")]
    pub verify_certs: bool,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for CardDavConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardDavConfig")
            .field("server_url", &self.server_url)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("verify_certs", &self.verify_certs)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

const fn default_true() -> bool {
    true
}

const fn default_timeout() -> u64 {
    30
}

/// CardDAV client trait
#[async_trait]
pub trait CardDavClient: Send + Sync {
    /// Fetch the raw multistatus body containing every contact's address data
    async fn fetch_address_data(&self) -> Result<String, CardDavError>;

    /// Check that the server accepts the configured URL and credentials
    async fn verify_connection(&self) -> Result<(), CardDavError>;
}

/// HTTP-based CardDAV client implementation
#[derive(Debug)]
pub struct HttpCardDavClient {
    client: Client,
    config: CardDavConfig,
}

impl HttpCardDavClient {
    /// Create a new CardDAV client
    pub fn new(config: CardDavConfig) -> Result<Self, CardDavError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(!config.verify_certs)
            .build()
            .map_err(|e| CardDavError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Configured address book URL
    pub fn server_url(&self) -> &str {
        &self.config.server_url
    }

    /// Send the address-data PROPFIND and check the response status
    async fn propfind(&self) -> Result<reqwest::Response, CardDavError> {
        let method = Method::from_bytes(b"PROPFIND")
            .map_err(|e| CardDavError::RequestFailed(e.to_string()))?;

        let response = self
            .client
            .request(method, &self.config.server_url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .header("Depth", "1")
            .header("Content-Type", "application/xml; charset=utf-8")
            .body(PROPFIND_BODY)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    return CardDavError::Timeout;
                }
                CardDavError::ConnectionFailed(e.to_string())
            })?;

        check_status(response.status())?;
        Ok(response)
    }
}

/// Only `200 OK` and `207 Multi-Status` carry address data
fn check_status(status: StatusCode) -> Result<(), CardDavError> {
    match status {
        StatusCode::OK | StatusCode::MULTI_STATUS => Ok(()),
        StatusCode::UNAUTHORIZED => Err(CardDavError::AuthenticationFailed),
        other => Err(CardDavError::UnexpectedStatus(other.as_u16())),
    }
}

#[async_trait]
impl CardDavClient for HttpCardDavClient {
    #[instrument(skip(self), fields(server = %self.config.server_url))]
    async fn fetch_address_data(&self) -> Result<String, CardDavError> {
        let response = self.propfind().await?;

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                return CardDavError::Timeout;
            }
            CardDavError::RequestFailed(e.to_string())
        })?;

        debug!(body_length = body.len(), "Received address data response");
        Ok(body)
    }

    #[instrument(skip(self), fields(server = %self.config.server_url))]
    async fn verify_connection(&self) -> Result<(), CardDavError> {
        self.propfind().await?;
        debug!("CardDAV server accepted credentials");
        Ok(())
    }
}
