//! # PDF Shelf HTTP Server Module
//!
//! Axum front end over the file storage module.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/upload` - Upload a PDF
//! - `/api/uploaded-pdfs` - List stored PDFs
//! - `/api/uploaded-pdfs/:filename` - Serve one stored PDF

pub mod config;
pub mod server;
pub mod observability_routes;
pub mod upload_routes;

pub use config::HttpServerConfig;
pub use server::HttpServer;
