// ============================
// crates/backend-lib/src/handlers/items.rs
// ============================
//! Item CRUD handlers.
//!
//! Every route here requires a bearer token whose embedded user id
//! matches the path's user id; knowing a user id alone is not enough
//! to read or mutate that user's items.
use axum::{
    extract::{Json, Path, State},
    http::{header, HeaderMap},
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::AppError;
use crate::handlers::users::MessageResponse;
use crate::items::ItemFields;
use crate::models::Item;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ItemRequest {
    pub name: String,
    pub description: String,
    pub status: String,
}

impl From<ItemRequest> for ItemFields {
    fn from(req: ItemRequest) -> Self {
        ItemFields {
            name: req.name,
            description: req.description,
            status: req.status,
        }
    }
}

/// Extract the bearer token and check it proves a session for
/// `user_id`.
async fn authorize(
    state: &AppState,
    headers: &HeaderMap,
    user_id: Uuid,
) -> Result<(), AppError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::InvalidToken)?;
    let token = value.strip_prefix("Bearer ").ok_or(AppError::InvalidToken)?;

    state.auth.authenticate(token, user_id).await
}

/// `POST /users/{userId}/add-item`
pub async fn add_item(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
    headers: HeaderMap,
    Json(req): Json<ItemRequest>,
) -> Result<Json<Vec<Item>>, AppError> {
    authorize(&state, &headers, user_id).await?;
    let items = state.items.add_item(user_id, req.into()).await?;
    Ok(Json(items))
}

/// `POST /users/{userId}/items-list`
pub async fn list_items(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Json<Vec<Item>>, AppError> {
    authorize(&state, &headers, user_id).await?;
    let items = state.items.list_items(user_id).await?;
    Ok(Json(items))
}

/// `POST /users/{userId}/items/{itemId}`
pub async fn get_item(
    State(state): State<Arc<AppState>>,
    Path((user_id, item_id)): Path<(Uuid, Uuid)>,
    headers: HeaderMap,
) -> Result<Json<Item>, AppError> {
    authorize(&state, &headers, user_id).await?;
    let item = state.items.get_item(user_id, item_id).await?;
    Ok(Json(item))
}

/// `PATCH /users/{userId}/update-item/{itemId}`
///
/// Despite the verb, this is a full-field overwrite.
pub async fn update_item(
    State(state): State<Arc<AppState>>,
    Path((user_id, item_id)): Path<(Uuid, Uuid)>,
    headers: HeaderMap,
    Json(req): Json<ItemRequest>,
) -> Result<Json<Item>, AppError> {
    authorize(&state, &headers, user_id).await?;
    let item = state.items.update_item(user_id, item_id, req.into()).await?;
    Ok(Json(item))
}

/// `DELETE /users/{userId}/delete-item/{itemId}`
pub async fn delete_item(
    State(state): State<Arc<AppState>>,
    Path((user_id, item_id)): Path<(Uuid, Uuid)>,
    headers: HeaderMap,
) -> Result<Json<MessageResponse>, AppError> {
    authorize(&state, &headers, user_id).await?;
    state.items.delete_item(user_id, item_id).await?;
    Ok(Json(MessageResponse {
        message: "Item deleted".to_string(),
    }))
}
