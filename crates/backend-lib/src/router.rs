// ============================
// crates/backend-lib/src/router.rs
// ============================
//! HTTP router assembly.
use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{items, users};
use crate::AppState;

/// Build the application router.
///
/// All cross-origin requests are permitted.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(liveness))
        .route("/users/register", post(users::register))
        .route("/users/login", post(users::login))
        .route("/users/logout", post(users::logout))
        .route("/users/{user_id}/add-item", post(items::add_item))
        .route("/users/{user_id}/items-list", post(items::list_items))
        .route("/users/{user_id}/items/{item_id}", post(items::get_item))
        .route(
            "/users/{user_id}/update-item/{item_id}",
            patch(items::update_item),
        )
        .route(
            "/users/{user_id}/delete-item/{item_id}",
            delete(items::delete_item),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn liveness() -> &'static str {
    "welcome to the item tracker"
}
