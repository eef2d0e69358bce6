//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// TextTale - story generation with narrated scenes and ambient audio
#[derive(Parser, Debug)]
#[command(name = "texttale")]
#[command(about = "Story generation API with narrated scenes and ambient audio", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute (defaults to `serve`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Extra configuration file layered over the defaults
    #[arg(short, long, global = true, env = "TEXTTALE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server
    Serve,

    /// Delete every audio file in the artifact directory, including pre-existing ones
    Purge {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Print the available styles, lengths, voices and background themes as JSON
    Options,
}
