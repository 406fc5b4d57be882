//! pdfshelf - a small, strict PDF upload and retrieval service
//!
//! Uploaded documents live in one flat store directory. The
//! [`file_storage`] module writes, lists and reads that directory;
//! [`http_server`] exposes it over HTTP and [`cli`] wires everything up.

pub mod cli;
pub mod file_storage;
pub mod http_server;
