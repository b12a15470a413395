//! Item repository
//!
//! The item catalog is seeded by migrations and only read here.

use sqlx::{FromRow, PgPool};

use super::DbError;

/// Recyclable item category
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Item {
    pub id: i32,
    pub title: String,
    pub image: String,
}

/// Item repository
pub struct ItemRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ItemRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the whole catalog ordered by id.
    pub async fn list(&self) -> Result<Vec<Item>, DbError> {
        let items = sqlx::query_as::<_, Item>("SELECT id, title, image FROM items ORDER BY id")
            .fetch_all(self.pool)
            .await?;
        Ok(items)
    }

    /// Get a single item by id.
    pub async fn get(&self, id: i32) -> Result<Item, DbError> {
        sqlx::query_as::<_, Item>("SELECT id, title, image FROM items WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: "Item",
                id: id.to_string(),
            })
    }

    /// Items accepted at a point, through point_items.
    pub async fn list_for_point(&self, point_id: i32) -> Result<Vec<Item>, DbError> {
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT items.id, items.title, items.image
            FROM items
            JOIN point_items ON items.id = point_items.item_id
            WHERE point_items.point_id = $1
            ORDER BY items.id
            "#,
        )
        .bind(point_id)
        .fetch_all(self.pool)
        .await?;
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::{self, SEED_ITEMS};

    // Integration tests - run with DATABASE_URL set
    // cargo test -p ecoleta-server -- --ignored

    async fn pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = crate::db::create_pool(&url).await.unwrap();
        migrations::run(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn lists_seeded_catalog() {
        let pool = pool().await;
        let items = ItemRepo::new(&pool).list().await.unwrap();

        for (title, image) in SEED_ITEMS {
            assert!(items.iter().any(|i| i.title == title && i.image == image));
        }
        assert!(items.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn missing_item_is_not_found() {
        let pool = pool().await;
        let err = ItemRepo::new(&pool).get(-1).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "Item", .. }));
    }
}
