//! ecoleta-server: HTTP API for waste collection points
//!
//! Serves the recyclable item catalog and the collection point registry
//! backed by PostgreSQL, plus the uploaded point images.

pub mod db;
pub mod http;
pub mod models;

pub use db::create_pool;
pub use http::{run_server, ServerConfig};
