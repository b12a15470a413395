//! Comma-separated item id lists
//!
//! Both `GET /points?items=1,2` and the `items` form field of
//! `POST /points` carry item ids this way.

use serde::{Deserialize, Deserializer};

/// Ordered, de-duplicated set of item ids.
///
/// Segments that are blank or not integers are dropped, so malformed
/// input yields fewer ids instead of an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemIds(Vec<i32>);

impl ItemIds {
    /// Parse a comma-separated list such as `"1, 2,3"`.
    ///
    /// # Example
    /// ```
    /// use ecoleta_server::models::ItemIds;
    ///
    /// assert_eq!(ItemIds::parse("3, 1,3").as_slice(), &[3, 1]);
    /// assert!(ItemIds::parse("").is_empty());
    /// ```
    pub fn parse(raw: &str) -> Self {
        let mut ids = Vec::new();
        for id in raw.split(',').filter_map(|s| s.trim().parse::<i32>().ok()) {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        Self(ids)
    }

    /// Parse an optional field; absent means no ids.
    pub fn from_optional(raw: Option<&str>) -> Self {
        raw.map(Self::parse).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.0.iter().copied()
    }
}

impl<'de> Deserialize<'de> for ItemIds {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}
