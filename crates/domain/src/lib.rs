//! Domain layer for the birthday calendar
//!
//! Contains the contact and birthday model, the projection of birthdays onto
//! query windows, and domain errors. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod projection;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use projection::{project, project_all};
pub use value_objects::*;
