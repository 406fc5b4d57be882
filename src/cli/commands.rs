//! CLI command implementations
//!
//! Every command resolves its configuration once and hands the store path to
//! the components it builds. `upload`, `list` and `fetch` drive the storage
//! components directly, without going through HTTP.

use std::fs;
use std::path::Path;

use crate::file_storage::{Catalog, Ingestor, Retriever, Store, UploadRequest};
use crate::http_server::upload_routes::{FileEntry, FilesListResponse, UploadResponse};
use crate::http_server::HttpServer;

use super::args::{Command, StoreArgs};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{write_bytes, write_json};

/// Parse arguments, set up logging and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    super::init_tracing();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { store, port } => serve(&store, port),
        Command::Upload {
            store,
            path,
            media_type,
            name,
        } => upload(&store, &path, &media_type, name.as_deref()),
        Command::List { store } => list(&store),
        Command::Fetch {
            store,
            name,
            output,
        } => fetch(&store, &name, output.as_deref()),
    }
}

fn load_config(args: &StoreArgs, port: Option<u16>) -> CliResult<Config> {
    Ok(Config::load(&args.config)?.with_overrides(args.upload_dir.clone(), port))
}

/// Start the HTTP server and serve until it fails
pub fn serve(args: &StoreArgs, port: Option<u16>) -> CliResult<()> {
    let config = load_config(args, port)?;
    let store = Store::from_config(&config.store);
    tracing::info!(store = %store.root().display(), "serving store");

    let server = HttpServer::new(config.server, store);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Store a local file
pub fn upload(
    args: &StoreArgs,
    path: &Path,
    media_type: &str,
    declared_name: Option<&str>,
) -> CliResult<()> {
    let config = load_config(args, None)?;
    let ingestor = Ingestor::new(Store::from_config(&config.store));

    let data = fs::read(path)
        .map_err(|e| CliError::io_error(format!("Failed to read {}: {}", path.display(), e)))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = declared_name.unwrap_or(&file_name);

    let stored = ingestor.store(UploadRequest::new(&data, media_type, name))?;
    write_json(&UploadResponse::from(stored))
}

/// Print the listing as JSON
pub fn list(args: &StoreArgs) -> CliResult<()> {
    let config = load_config(args, None)?;
    let catalog = Catalog::new(Store::from_config(&config.store));

    let files = catalog.list()?;
    write_json(&FilesListResponse {
        files: files.iter().map(FileEntry::from).collect(),
    })
}

/// Write a stored file to `output`, or stdout
pub fn fetch(args: &StoreArgs, name: &str, output: Option<&Path>) -> CliResult<()> {
    let config = load_config(args, None)?;
    let retriever = Retriever::new(Store::from_config(&config.store));

    let file = retriever.fetch(name)?;
    match output {
        Some(path) => fs::write(path, &file.data).map_err(|e| {
            CliError::io_error(format!("Failed to write {}: {}", path.display(), e))
        }),
        None => write_bytes(&file.data),
    }
}
