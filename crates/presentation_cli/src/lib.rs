//! Birthday calendar CLI
//!
//! Argument parsing, command execution and output rendering for the
//! `birthday-calendar` binary.

mod app;
pub mod cli;
pub mod output;

pub use app::{check_config, run};
pub use cli::{Cli, Commands, log_filter_override};
