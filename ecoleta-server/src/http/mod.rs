//! HTTP server layer
//!
//! Axum server with:
//! - CORS (permissive by default, clients run on other origins)
//! - Request tracing and timeouts
//! - Static serving of uploaded images
//! - Graceful shutdown
//! - JSON error responses

pub mod server;
pub mod error;
pub mod extractors;
pub mod uploads;
pub mod routes;

pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
pub use error::ApiError;
pub use uploads::{UploadError, UploadStore};
