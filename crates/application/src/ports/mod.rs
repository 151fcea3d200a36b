//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod address_book_port;

#[cfg(test)]
pub use address_book_port::MockAddressBookPort;
pub use address_book_port::{AddressBookError, AddressBookPort};
