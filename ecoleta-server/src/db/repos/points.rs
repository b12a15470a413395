//! Point repository
//!
//! - list: filter by item ids (required), city and uf through one JOIN
//! - create: point + point_items in a single transaction

use serde::Deserialize;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use crate::models::{ItemIds, NewPoint};
use super::DbError;

const POINT_COLUMNS: &str = "points.id, points.image, points.name, points.email, \
    points.whatsapp, points.latitude, points.longitude, points.city, points.uf";

/// Collection point record from database
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Point {
    pub id: i32,
    pub image: String,
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub uf: String,
}

/// Filter for `GET /points?uf=&city=&items=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PointFilter {
    pub city: Option<String>,
    pub uf: Option<String>,
    #[serde(default)]
    pub items: ItemIds,
}

impl PointFilter {
    fn city(&self) -> Option<&str> {
        non_blank(self.city.as_deref())
    }

    fn uf(&self) -> Option<&str> {
        non_blank(self.uf.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Build the listing query for a filter with at least one item id.
fn list_query(filter: &PointFilter) -> QueryBuilder<'_, Postgres> {
    let mut qb = QueryBuilder::new("SELECT DISTINCT ");
    qb.push(POINT_COLUMNS);
    qb.push(
        " FROM points JOIN point_items ON points.id = point_items.point_id \
         WHERE point_items.item_id = ANY(",
    );
    qb.push_bind(filter.items.as_slice().to_vec());
    qb.push(")");

    if let Some(city) = filter.city() {
        qb.push(" AND points.city = ").push_bind(city);
    }
    if let Some(uf) = filter.uf() {
        qb.push(" AND points.uf = ").push_bind(uf);
    }

    qb.push(" ORDER BY points.id");
    qb
}

/// Point repository
pub struct PointRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PointRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List distinct points accepting at least one of the filter's items.
    ///
    /// An empty item list matches nothing, so no query is issued.
    pub async fn list(&self, filter: &PointFilter) -> Result<Vec<Point>, DbError> {
        if filter.items.is_empty() {
            tracing::debug!("point listing without items, returning no points");
            return Ok(Vec::new());
        }

        let points = list_query(filter)
            .build_query_as::<Point>()
            .fetch_all(self.pool)
            .await?;
        Ok(points)
    }

    /// Get a single point by id.
    pub async fn get(&self, id: i32) -> Result<Point, DbError> {
        let sql = format!("SELECT {POINT_COLUMNS} FROM points WHERE points.id = $1");
        sqlx::query_as::<_, Point>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: "Point",
                id: id.to_string(),
            })
    }

    /// Insert a point and one point_items row per item id (atomic).
    ///
    /// Returns the new point id. If any statement fails the transaction is
    /// dropped without commit and neither the point nor its items persist.
    pub async fn create(&self, point: &NewPoint) -> Result<i32, DbError> {
        let mut tx = self.pool.begin().await?;

        let (point_id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO points (image, name, email, whatsapp, latitude, longitude, city, uf)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(&point.image)
        .bind(&point.name)
        .bind(&point.email)
        .bind(&point.whatsapp)
        .bind(point.latitude)
        .bind(point.longitude)
        .bind(&point.city)
        .bind(&point.uf)
        .fetch_one(&mut *tx)
        .await?;

        if !point.items.is_empty() {
            let mut qb: QueryBuilder<Postgres> =
                QueryBuilder::new("INSERT INTO point_items (point_id, item_id) ");
            qb.push_values(point.items.iter(), |mut row, item_id| {
                row.push_bind(point_id).push_bind(item_id);
            });
            qb.build().execute(&mut *tx).await?;
        }

        tx.commit().await?;
        Ok(point_id)
    }
}
