//! CLI module for PDF Shelf
//!
//! Provides command-line interface for:
//! - serve: Run the HTTP server
//! - upload: Store a local file
//! - list: Print the stored files
//! - fetch: Read a stored file back

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command, StoreArgs};
pub use commands::{fetch, list, run, run_command, serve, upload};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default log filter, overridable through `RUST_LOG`
const DEFAULT_LOG_FILTER: &str = "pdfshelf=info,tower_http=info";

/// Install the global tracing subscriber. Logs go to stderr.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // A subscriber may already be installed (tests, embedding); keep it.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
