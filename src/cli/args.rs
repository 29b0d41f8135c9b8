//! CLI argument definitions using clap
//!
//! Commands:
//! - junkboard serve [--config <path>] [--port <n>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// junkboard - shareable journal boards behind capability links
#[derive(Parser, Debug)]
#[command(name = "junkboard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP API server
    Serve {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Port to listen on, overriding the file and environment
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
