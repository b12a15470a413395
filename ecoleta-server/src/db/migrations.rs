//! Schema migrations and item catalog seed

use sqlx::PgPool;

/// Recyclable item categories seeded on first run: (title, image file).
pub const SEED_ITEMS: [(&str, &str); 6] = [
    ("Lâmpadas", "lampadas.svg"),
    ("Pilhas e Baterias", "baterias.svg"),
    ("Papéis e Papelão", "papeis-papelao.svg"),
    ("Resíduos Eletrônicos", "eletronicos.svg"),
    ("Resíduos Orgânicos", "organicos.svg"),
    ("Óleo de Cozinha", "oleo.svg"),
];

/// Create tables if missing and seed the item catalog.
///
/// Safe to run on every startup.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS items (
            id SERIAL PRIMARY KEY,
            title TEXT NOT NULL UNIQUE,
            image TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS points (
            id SERIAL PRIMARY KEY,
            image TEXT NOT NULL,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            whatsapp TEXT NOT NULL,
            latitude DOUBLE PRECISION NOT NULL,
            longitude DOUBLE PRECISION NOT NULL,
            city TEXT NOT NULL,
            uf TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS point_items (
            point_id INTEGER NOT NULL REFERENCES points(id) ON DELETE CASCADE,
            item_id INTEGER NOT NULL REFERENCES items(id),
            PRIMARY KEY (point_id, item_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_point_items_item ON point_items(item_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_points_uf_city ON points(uf, city)")
        .execute(pool)
        .await?;

    let seeded = seed_items(pool).await?;
    tracing::info!(seeded, "Migrations complete");

    Ok(())
}

/// Insert catalog items that are not present yet. Returns rows inserted.
async fn seed_items(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let mut inserted = 0;
    for (title, image) in SEED_ITEMS {
        inserted += sqlx::query(
            "INSERT INTO items (title, image) VALUES ($1, $2) ON CONFLICT (title) DO NOTHING",
        )
        .bind(title)
        .bind(image)
        .execute(pool)
        .await?
        .rows_affected();
    }
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn seed_titles_and_images_are_unique() {
        let titles: HashSet<_> = SEED_ITEMS.iter().map(|(t, _)| t).collect();
        let images: HashSet<_> = SEED_ITEMS.iter().map(|(_, i)| i).collect();
        assert_eq!(titles.len(), SEED_ITEMS.len());
        assert_eq!(images.len(), SEED_ITEMS.len());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn migrations_are_idempotent() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = crate::db::create_pool(&url).await.unwrap();

        run(&pool).await.unwrap();
        run(&pool).await.unwrap();

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM items")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert!(count >= SEED_ITEMS.len() as i64);
    }
}
