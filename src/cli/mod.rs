pub mod commands;
pub mod core;
pub mod help;
pub mod io;
pub mod output;
pub mod registry;
mod shell;
pub mod views;

pub use self::core::{CliError, CliMode};
pub use shell::run_cli;
