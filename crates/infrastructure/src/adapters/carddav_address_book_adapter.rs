//! CardDAV address book adapter: implements `AddressBookPort` using `integration_carddav`

use application::ports::{AddressBookError, AddressBookPort};
use async_trait::async_trait;
use domain::ContactRecord;
use integration_carddav::{
    CardDavClient, CardDavConfig, CardDavError, HttpCardDavClient, extract_records,
};
use tracing::{debug, instrument};

/// Adapter for CardDAV address books (e.g., Baikal, Radicale, Nextcloud).
///
/// Wraps an [`HttpCardDavClient`] and implements [`AddressBookPort`] from the
/// application layer. Contacts are extracted from the raw multistatus body;
/// malformed entries are skipped by the extractor.
#[derive(Debug)]
pub struct CardDavAddressBookAdapter {
    client: HttpCardDavClient,
}

impl CardDavAddressBookAdapter {
    /// Create a new adapter from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AddressBookError`] when the underlying HTTP client cannot be
    /// constructed.
    pub fn new(config: CardDavConfig) -> Result<Self, AddressBookError> {
        let client = HttpCardDavClient::new(config).map_err(Self::map_error)?;
        Ok(Self { client })
    }

    /// Map [`CardDavError`] to [`AddressBookError`].
    fn map_error(error: CardDavError) -> AddressBookError {
        match error {
            CardDavError::AuthenticationFailed => AddressBookError::AuthenticationFailed,
            CardDavError::ConnectionFailed(msg) => AddressBookError::ServiceUnavailable(msg),
            CardDavError::Timeout => AddressBookError::ServiceUnavailable(error.to_string()),
            CardDavError::UnexpectedStatus(_) | CardDavError::ParseError(_) => {
                AddressBookError::OperationFailed(error.to_string())
            },
            CardDavError::RequestFailed(msg) => {
                AddressBookError::OperationFailed(format!("Request failed: {msg}"))
            },
        }
    }
}

#[async_trait]
impl AddressBookPort for CardDavAddressBookAdapter {
    #[instrument(skip(self), fields(server = %self.client.server_url()))]
    async fn fetch_records(&self) -> Result<Vec<ContactRecord>, AddressBookError> {
        let body = self
            .client
            .fetch_address_data()
            .await
            .map_err(Self::map_error)?;

        let records = extract_records(&body);
        debug!(count = records.len(), "Extracted contact records");
        Ok(records)
    }

    #[instrument(skip(self), fields(server = %self.client.server_url()))]
    async fn check_connection(&self) -> Result<(), AddressBookError> {
        self.client
            .verify_connection()
            .await
            .map_err(Self::map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CardDavConfig {
        CardDavConfig {
            server_url: "https://dav.example.com/addressbooks/user/default/".to_string(),
            username: "user".to_string(),
            password: "secret".to_string(),
            verify_certs: true,
            timeout_secs: 30,
        }
    }

    #[test]
    fn map_error_auth() {
        let err = CardDavAddressBookAdapter::map_error(CardDavError::AuthenticationFailed);
        assert!(matches!(err, AddressBookError::AuthenticationFailed));
    }

    #[test]
    fn map_error_connection() {
        let err = CardDavAddressBookAdapter::map_error(CardDavError::ConnectionFailed(
            "refused".to_string(),
        ));
        assert!(matches!(err, AddressBookError::ServiceUnavailable(ref msg) if msg == "refused"));
    }

    #[test]
    fn map_error_timeout() {
        let err = CardDavAddressBookAdapter::map_error(CardDavError::Timeout);
        assert!(matches!(err, AddressBookError::ServiceUnavailable(_)));
    }

    #[test]
    fn map_error_unexpected_status() {
        let err = CardDavAddressBookAdapter::map_error(CardDavError::UnexpectedStatus(500));
        let AddressBookError::OperationFailed(msg) = err else {
            unreachable!()
        };
        assert!(msg.contains("500"));
    }

    #[test]
    fn map_error_parse() {
        let err =
            CardDavAddressBookAdapter::map_error(CardDavError::ParseError("bad".to_string()));
        assert!(matches!(err, AddressBookError::OperationFailed(_)));
    }

    #[test]
    fn map_error_request_failed() {
        let err =
            CardDavAddressBookAdapter::map_error(CardDavError::RequestFailed("body".to_string()));
        let AddressBookError::OperationFailed(msg) = err else {
            unreachable!()
        };
        assert!(msg.contains("Request failed"));
    }

    #[test]
    fn adapter_debug_format() {
        let adapter = CardDavAddressBookAdapter::new(config()).unwrap();
        let dbg = format!("{adapter:?}");
        assert!(dbg.contains("CardDavAddressBookAdapter"));
        assert!(!dbg.contains("secret"));
    }
}
