//! Repository implementations for database access
//!
//! - Point listing joins point_items once (no N+1)
//! - Point creation inserts the point and its items in one transaction

pub mod items;
pub mod points;

pub use items::{Item, ItemRepo};
pub use points::{Point, PointFilter, PointRepo};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}
