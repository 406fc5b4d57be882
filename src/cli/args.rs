//! CLI argument definitions using clap
//!
//! Commands:
//! - pdfshelf serve [--port <port>]
//! - pdfshelf upload <path>
//! - pdfshelf list
//! - pdfshelf fetch <name> [--output <path>]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// PDF Shelf - upload, list and serve PDF documents
#[derive(Parser, Debug)]
#[command(name = "pdfshelf")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command
#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// Path to configuration file (optional; defaults apply when absent)
    #[arg(long, default_value = "./pdfshelf.json")]
    pub config: PathBuf,

    /// Store directory, overriding the configuration file
    #[arg(long)]
    pub upload_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        #[command(flatten)]
        store: StoreArgs,

        /// Port to listen on, overriding the configuration file
        #[arg(long)]
        port: Option<u16>,
    },

    /// Store a local file as if it had been uploaded
    Upload {
        #[command(flatten)]
        store: StoreArgs,

        /// File to upload
        path: PathBuf,

        /// Declared media type
        #[arg(long, default_value = "application/pdf")]
        media_type: String,

        /// Declared filename (defaults to the file's own name)
        #[arg(long)]
        name: Option<String>,
    },

    /// List stored files, newest first
    List {
        #[command(flatten)]
        store: StoreArgs,
    },

    /// Write a stored file to disk or stdout
    Fetch {
        #[command(flatten)]
        store: StoreArgs,

        /// Stored name, as printed by `list`
        name: String,

        /// Destination file (stdout when omitted)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_with_overrides() {
        let cli = Cli::try_parse_from([
            "pdfshelf",
            "serve",
            "--port",
            "8080",
            "--upload-dir",
            "/tmp/shelf",
        ])
        .unwrap();

        match cli.command {
            Command::Serve { store, port } => {
                assert_eq!(port, Some(8080));
                assert_eq!(store.upload_dir, Some(PathBuf::from("/tmp/shelf")));
                assert_eq!(store.config, PathBuf::from("./pdfshelf.json"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_upload_defaults() {
        let cli = Cli::try_parse_from(["pdfshelf", "upload", "report.pdf"]).unwrap();

        match cli.command {
            Command::Upload {
                path,
                media_type,
                name,
                ..
            } => {
                assert_eq!(path, PathBuf::from("report.pdf"));
                assert_eq!(media_type, "application/pdf");
                assert!(name.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
