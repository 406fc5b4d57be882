//! PDF Shelf CLI entry point
//!
//! Minimal entrypoint: parse and dispatch through `cli::run`, print fatal
//! errors to stderr and exit non-zero.

use pdfshelf::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
