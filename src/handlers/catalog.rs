// Classes and equipment endpoints

use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::models::requests::parse_body;
use crate::stores::json_list::JsonListStore;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};
use std::sync::Arc;

/// GET /classes
pub async fn list_classes_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    list_items(&state.classes).await
}

/// POST /classes
pub async fn save_class_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    save_item(&state.classes, &body).await
}

/// GET /equipment
pub async fn list_equipment_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    list_items(&state.equipment).await
}

/// POST /equipment
pub async fn save_equipment_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    save_item(&state.equipment, &body).await
}

/// Stored array, served verbatim
async fn list_items(store: &JsonListStore) -> Result<Response, ApiError> {
    let raw = store.list_raw().await?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        raw,
    )
        .into_response())
}

/// Body must be a JSON object
async fn save_item(store: &JsonListStore, body: &[u8]) -> Result<Response, ApiError> {
    let item: Map<String, Value> = parse_body(body)?;
    store.append(item).await?;
    Ok((StatusCode::OK, "Saved").into_response())
}
