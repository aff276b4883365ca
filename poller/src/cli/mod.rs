//! CLI module for service-poller
//!
//! Provides the command-line interface for the server and database setup.

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

/// Service poller - registers service URLs and records their reachability
#[derive(Parser, Debug)]
#[command(name = "service-poller")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    POLLER_HOST              Bind address (default: 0.0.0.0)
    POLLER_PORT              Listen port (default: 8080)
    POLLER_DATABASE_URL      Database URL (default: sqlite://poller.db)
    POLLER_INTERVAL_SECS     Poll cycle period in seconds (default: 3600)
    POLLER_PROBE_TIMEOUT_MS  Per-probe timeout in milliseconds (default: 3000)
    POLLER_LOG_LEVEL         Log level (default: info)
    POLLER_LOG_DIR           Directory for daily-rotated log files (optional)
"#)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the API server and the poll scheduler
    Serve(serve::ServeArgs),
    /// Create the database and service table, then exit
    Migrate(migrate::MigrateArgs),
}
