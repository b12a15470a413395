//! Item catalog endpoints

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::db::repos::{Item, ItemRepo};
use crate::http::error::ApiError;
use crate::http::extractors::ValidId;
use crate::http::server::AppState;
use crate::models::PublicUrl;

/// Item response with its public image URL
#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub id: i32,
    pub title: String,
    pub image: String,
    pub image_url: String,
}

impl ItemResponse {
    pub fn new(item: Item, public_url: &PublicUrl) -> Self {
        Self {
            image_url: public_url.image_url(&item.image),
            id: item.id,
            title: item.title,
            image: item.image,
        }
    }
}

/// GET /items - list the whole catalog
async fn list_items(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ItemResponse>>, ApiError> {
    let items = ItemRepo::new(&state.pool).list().await?;

    Ok(Json(
        items
            .into_iter()
            .map(|item| ItemResponse::new(item, &state.public_url))
            .collect(),
    ))
}

/// GET /items/{id} - get a single item
async fn get_item(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<ItemResponse>, ApiError> {
    let item = ItemRepo::new(&state.pool).get(id).await?;
    Ok(Json(ItemResponse::new(item, &state.public_url)))
}

/// Item routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/items", get(list_items))
        .route("/items/{id}", get(get_item))
}
