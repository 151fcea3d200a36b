//! Value Objects - Immutable, identity-less domain primitives

mod partial_date;
mod structured_name;
mod timezone;

pub use partial_date::{PartialDate, UNKNOWN_YEAR_SENTINEL};
pub use structured_name::StructuredName;
pub use timezone::Timezone;
