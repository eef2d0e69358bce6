//! Command-line interface for TextTale.

mod commands;
mod maintenance;
mod serve;

pub use commands::{Cli, Commands};
pub use maintenance::{print_options, purge_audio};
pub use serve::run_server;
