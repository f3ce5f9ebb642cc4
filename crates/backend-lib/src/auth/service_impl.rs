// ============================
// crates/backend-lib/src/auth/service_impl.rs
// ============================
//! Default authentication service over a [`UserStore`].
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::{password, AuthService, LoginOutcome, TokenIssuer};
use crate::error::AppError;
use crate::models::{NewUser, SessionToken};
use crate::store::UserStore;

pub struct DefaultAuth {
    store: Arc<dyn UserStore>,
    tokens: Arc<TokenIssuer>,
}

impl DefaultAuth {
    pub fn new(store: Arc<dyn UserStore>, tokens: Arc<TokenIssuer>) -> Self {
        Self { store, tokens }
    }
}

#[async_trait]
impl AuthService for DefaultAuth {
    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Uuid, AppError> {
        let username = username.trim().to_string();
        let email = email.trim().to_string();

        // scrypt is deliberately slow; keep it off the async executor
        let mut plain = password.to_string();
        let password_hash =
            tokio::task::spawn_blocking(move || password::hash_password_secure(&mut plain))
                .await
                .map_err(|e| AppError::Internal(e.to_string()))?
                .map_err(|e| AppError::Internal(e.to_string()))?;

        let user = self
            .store
            .insert_user(NewUser {
                username,
                email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, "user registered");
        Ok(user.id)
    }

    async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AppError> {
        // Unknown email and wrong password collapse into the same
        // error so callers cannot enumerate accounts.
        let user = self
            .store
            .find_by_email(email.trim())
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let hash = user.password_hash.clone();
        let plain = password.to_string();
        let password_ok = tokio::task::spawn_blocking(move || password::verify_password(&hash, &plain))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;
        if !password_ok {
            return Err(AppError::InvalidCredentials);
        }

        let token = self.tokens.issue(user.id)?;

        // Replace, not append: any token from a prior login is
        // discarded, leaving a single active session.
        self.store
            .replace_tokens(user.id, vec![SessionToken::new(token.clone())])
            .await?;

        tracing::info!(user_id = %user.id, "user logged in");
        Ok(LoginOutcome {
            token,
            user_id: user.id,
        })
    }

    async fn logout(&self, token: &str) -> Result<(), AppError> {
        // Pull by value; a token nobody holds is a successful no-op.
        self.store.pull_token(token).await
    }

    async fn authenticate(&self, token: &str, user_id: Uuid) -> Result<(), AppError> {
        let sub = self.tokens.verify(token)?;
        if sub != user_id {
            return Err(AppError::InvalidToken);
        }

        // The signature alone is not enough: logout or a newer login
        // must invalidate the session, so the token has to still be on
        // the user's record.
        let user = self
            .store
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::InvalidToken)?;
        if !user.tokens.iter().any(|t| t.token == token) {
            return Err(AppError::InvalidToken);
        }

        Ok(())
    }
}
