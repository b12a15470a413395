//! Domain models
//!
//! Request input is turned into these types before it reaches the
//! database. Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod item_ids;
pub mod public_url;
pub mod point;

pub use validation::ValidationError;
pub use item_ids::ItemIds;
pub use public_url::PublicUrl;
pub use point::{NewPoint, NewPointFields};
