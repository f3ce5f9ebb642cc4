use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub user_id: Uuid,
}

#[async_trait]
pub trait AuthService: Send + Sync {
    async fn register(&self, username: &str, email: &str, password: &str)
        -> Result<Uuid, AppError>;
    async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AppError>;
    async fn logout(&self, token: &str) -> Result<(), AppError>;
    /// Check that `token` verifies, belongs to `user_id`, and is still
    /// an active session on that user's record.
    async fn authenticate(&self, token: &str, user_id: Uuid) -> Result<(), AppError>;
}
