//! Address book port
//!
//! Source of contact records for the birthday calendar. Implemented by the
//! CardDAV adapter in the infrastructure layer.

use async_trait::async_trait;
use domain::ContactRecord;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

/// Address book port errors
#[derive(Debug, Error)]
pub enum AddressBookError {
    /// The address book service could not be reached
    #[error("Address book unavailable: {0}")]
    ServiceUnavailable(String),

    /// Authentication with the address book failed
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// The request reached the server but did not succeed
    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

/// Port for reading contacts from an address book
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AddressBookPort: Send + Sync {
    /// Fetch every well-formed contact record of the address book
    async fn fetch_records(&self) -> Result<Vec<ContactRecord>, AddressBookError>;

    /// Probe the address book with the configured credentials
    async fn check_connection(&self) -> Result<(), AddressBookError>;
}
