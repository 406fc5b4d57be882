//! Output handling for CLI
//!
//! Results are written to stdout as one JSON object per line. Logs go to
//! stderr so stdout stays machine-readable.

use std::io::{self, Write};

use serde::Serialize;

use super::errors::CliResult;

/// Write a serializable value as a JSON line to stdout
pub fn write_json<T: Serialize>(value: &T) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

/// Write raw bytes to stdout
pub fn write_bytes(data: &[u8]) -> CliResult<()> {
    let mut stdout = io::stdout();
    stdout.write_all(data)?;
    stdout.flush()?;

    Ok(())
}
