//! Collection point endpoints

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{multipart::MultipartError, Multipart, Query, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::db::repos::{ItemRepo, Point, PointFilter, PointRepo};
use crate::http::error::ApiError;
use crate::http::extractors::ValidId;
use crate::http::routes::items::ItemResponse;
use crate::http::server::AppState;
use crate::http::uploads::stored_name;
use crate::models::{NewPoint, NewPointFields, PublicUrl, ValidationError};

/// Point response with its public image URL
#[derive(Debug, Serialize)]
pub struct PointResponse {
    pub id: i32,
    pub image: String,
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub uf: String,
    pub image_url: String,
}

impl PointResponse {
    pub fn new(point: Point, public_url: &PublicUrl) -> Self {
        Self {
            image_url: public_url.image_url(&point.image),
            id: point.id,
            image: point.image,
            name: point.name,
            email: point.email,
            whatsapp: point.whatsapp,
            latitude: point.latitude,
            longitude: point.longitude,
            city: point.city,
            uf: point.uf,
        }
    }
}

/// Point detail: the point and the items it accepts
#[derive(Debug, Serialize)]
pub struct PointDetailResponse {
    pub point: PointResponse,
    pub items: Vec<ItemResponse>,
}

/// Point creation acknowledgement
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub id: i32,
}

/// GET /points?uf=&city=&items= - list points accepting any of the items
async fn list_points(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<PointFilter>,
) -> Result<Json<Vec<PointResponse>>, ApiError> {
    tracing::debug!(
        city = ?filter.city,
        uf = ?filter.uf,
        items = ?filter.items.as_slice(),
        "listing points"
    );
    let points = PointRepo::new(&state.pool).list(&filter).await?;

    Ok(Json(
        points
            .into_iter()
            .map(|point| PointResponse::new(point, &state.public_url))
            .collect(),
    ))
}

/// GET /points/{id} - a point with its items
async fn get_point(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<PointDetailResponse>, ApiError> {
    let point = PointRepo::new(&state.pool).get(id).await?;
    let items = ItemRepo::new(&state.pool).list_for_point(id).await?;

    Ok(Json(PointDetailResponse {
        point: PointResponse::new(point, &state.public_url),
        items: items
            .into_iter()
            .map(|item| ItemResponse::new(item, &state.public_url))
            .collect(),
    }))
}

/// Uploaded image held in memory until the form is known to be valid
struct ImagePart {
    file_name: Option<String>,
    data: Bytes,
}

fn malformed(e: MultipartError) -> ApiError {
    ApiError::Validation(ValidationError::Malformed {
        reason: e.body_text(),
    })
}

/// POST /points - register a point from a multipart form
///
/// Fields: image (file), name, email, whatsapp, latitude, longitude,
/// city, uf, items (comma-separated ids).
async fn create_point(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<CreatedResponse>, ApiError> {
    let mut fields = NewPointFields::default();
    let mut image: Option<ImagePart> = None;

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        if name == "image" {
            let file_name = field.file_name().map(str::to_owned);
            let data = field.bytes().await.map_err(malformed)?;
            image = Some(ImagePart { file_name, data });
        } else {
            let value = field.text().await.map_err(malformed)?;
            if !fields.set(&name, value) {
                tracing::debug!(field = %name, "ignoring unknown form field");
            }
        }
    }

    NewPoint::check(&fields)?;
    let image = image
        .filter(|part| !part.data.is_empty())
        .ok_or(ValidationError::Missing { field: "image" })?;

    let point = NewPoint::new(fields, stored_name(image.file_name.as_deref()))?;
    state.uploads.save(&point.image, &image.data).await?;

    match PointRepo::new(&state.pool).create(&point).await {
        Ok(id) => {
            tracing::info!(
                point_id = id,
                items = point.items.len(),
                city = %point.city,
                uf = %point.uf,
                "point created"
            );
            Ok(Json(CreatedResponse { success: true, id }))
        }
        Err(e) => {
            if let Err(cleanup) = state.uploads.remove(&point.image).await {
                tracing::warn!("{}", cleanup);
            }
            Err(e.into())
        }
    }
}

/// Point routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/points", get(list_points).post(create_point))
        .route("/points/{id}", get(get_point))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point() -> Point {
        Point {
            id: 3,
            image: "9f2c1a7b3e4d-mercado.jpg".into(),
            name: "Mercado do Bairro".into(),
            email: "contato@mercado.com".into(),
            whatsapp: "5547988887777".into(),
            latitude: -26.9194,
            longitude: -49.0661,
            city: "Blumenau".into(),
            uf: "SC".into(),
        }
    }

    #[test]
    fn point_response_shape() {
        let response = PointResponse::new(point(), &PublicUrl::new("http://localhost:3333"));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["id"], 3);
        assert_eq!(json["uf"], "SC");
        assert_eq!(json["latitude"], -26.9194);
        assert_eq!(
            json["image_url"],
            "http://localhost:3333/uploads/9f2c1a7b3e4d-mercado.jpg"
        );
    }

    #[test]
    fn detail_nests_point_and_items() {
        let base = PublicUrl::default();
        let detail = PointDetailResponse {
            point: PointResponse::new(point(), &base),
            items: Vec::new(),
        };
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["point"]["name"], "Mercado do Bairro");
        assert_eq!(json["items"], serde_json::json!([]));
    }

    #[test]
    fn created_response_shape() {
        let json = serde_json::to_value(CreatedResponse { success: true, id: 1 }).unwrap();
        assert_eq!(json["success"], true);
    }
}
