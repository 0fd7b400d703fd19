//! CLI definitions for the `chatrelay` binary.

pub mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Relay chat messages from HTTP clients to hosted assistants.
#[derive(Parser)]
#[command(name = "chatrelay", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a TOML config file (defaults to ./chatrelay.toml when present).
    #[arg(long, global = true, env = "CHATRELAY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Also export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true, env = "CHATRELAY_OTEL")]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server.
    Serve {
        /// Port to listen on.
        #[arg(long, default_value_t = 8000, env = "CHATRELAY_PORT")]
        port: u16,

        /// Host address to bind to.
        #[arg(long, default_value = "0.0.0.0", env = "CHATRELAY_HOST")]
        host: String,

        /// Directory holding index.html and other static assets.
        #[arg(long, default_value = "static", env = "CHATRELAY_STATIC_DIR")]
        static_dir: PathBuf,
    },

    /// Show the resolved configuration (secrets shown as set/unset).
    Config,
}
