pub mod args;
pub mod export;

pub use args::{Cli, CliCommand, ExportCliArgs};
pub use export::handle_export_command;
