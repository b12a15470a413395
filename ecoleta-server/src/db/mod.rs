//! Database layer - connection pool, schema and repositories
//!
//! - Connection pool (max 5 connections) - no Arc<Mutex<Connection>>
//! - Point listing and detail use JOINs - no N+1 queries
//! - Point creation runs in a single transaction

pub mod pool;
pub mod migrations;
pub mod repos;

pub use pool::{create_pool, create_pool_with_options};
pub use repos::*;
