// ============================
// crates/backend-lib/src/handlers/users.rs
// ============================
//! Registration, login and logout handlers.
use axum::{
    extract::{Json, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LogoutRequest {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user_id: Uuid,
}

/// `POST /users/register`
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    state
        .auth
        .register(&req.username, &req.email, &req.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "user registered".to_string(),
        }),
    ))
}

/// `POST /users/login`
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let outcome = state.auth.login(&req.email, &req.password).await?;

    Ok(Json(LoginResponse {
        token: outcome.token,
        user_id: outcome.user_id,
    }))
}

/// `POST /users/logout`
///
/// Plain-text response; also clears the `token` cookie.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LogoutRequest>,
) -> Result<Response, AppError> {
    state.auth.logout(&req.token).await?;

    let mut response = "user logged out".into_response();
    response.headers_mut().insert(
        header::SET_COOKIE,
        HeaderValue::from_static("token=; Max-Age=0; Path=/"),
    );
    Ok(response)
}
