//! CLI module for Gatehouse
//!
//! Provides command-line interface parsing and handling for the gatehouse-server binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

/// `init` command: config and secret scaffolding.
pub mod init;
/// Colored terminal output.
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Gatehouse - a minimal authentication service
///
/// Registers users with Argon2id-hashed credentials and issues short-lived
/// bearer tokens.
#[derive(Parser, Debug)]
#[command(
    name = "gatehouse-server",
    version,
    about = "Gatehouse - a minimal authentication service",
    long_about = "Gatehouse - a minimal authentication service.\n\n\
                  Registers users with Argon2id-hashed credentials and issues short-lived\n\
                  HS256 bearer tokens after verifying them.\n\n\
                  Run without arguments to start the server, or use 'init' to scaffold a new deployment.",
    after_help = "EXAMPLES:\n    \
                  gatehouse-server init                   # Write gatehouse.toml and a .env with a fresh secret\n    \
                  gatehouse-server                        # Start the server (requires gatehouse.toml)\n    \
                  gatehouse-server --config prod.toml     # Use a custom config file"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "gatehouse.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the server (the default when no subcommand is given)
    Serve,

    /// Initialize a new deployment with a config file and a signing secret
    ///
    /// Creates gatehouse.toml, a .env holding a freshly generated JWT_SECRET,
    /// and a .gitignore that keeps .env out of version control.
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite existing files
        #[arg(short, long)]
        force: bool,

        /// Host address for the server
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port for the server
        #[arg(long, default_value = "3000")]
        port: u16,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
