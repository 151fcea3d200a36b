//! Application layer - Use cases and orchestration
//!
//! Defines the address book port and the birthday calendar service that
//! turns fetched contacts into birthday events. Adapters in the
//! infrastructure layer implement the ports.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
