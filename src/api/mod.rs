//! API Module
//!
//! HTTP handlers and routing for the log server REST API.
//!
//! # Endpoints
//! - `GET /logs` - Newest matching lines of a log file, paginated
//! - `GET /logs/files` - Log files available for querying
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
