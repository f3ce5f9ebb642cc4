// ============================
// crates/backend-lib/src/store.rs
// ============================
//! Document store abstraction with an in-memory implementation.
use async_trait::async_trait;
use chrono::Utc;
use std::{collections::HashMap, sync::Arc, time::Duration};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{NewUser, SessionToken, User};

/// Trait for user document stores.
///
/// The store is treated as an opaque key-indexed collection with
/// unique constraints on username and email. Writes to the same user
/// are serialised at the storage layer; callers performing
/// read-modify-write get last-write-wins semantics.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user, enforcing the unique username/email
    /// constraints.
    async fn insert_user(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Fetch a user by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    /// Fetch a user by email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Replace a user's token list wholesale.
    async fn replace_tokens(&self, id: Uuid, tokens: Vec<SessionToken>) -> Result<(), AppError>;

    /// Remove a token by value from whichever user holds it.
    /// Removing a token nobody holds is a successful no-op.
    async fn pull_token(&self, token: &str) -> Result<(), AppError>;

    /// Write back a whole user document (last write wins).
    async fn update_user(&self, user: User) -> Result<(), AppError>;
}

/// In-memory implementation of the [`UserStore`] trait.
#[derive(Clone)]
pub struct MemoryStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MemoryStore {
    /// Create a new store and spawn the token expiry sweep.
    ///
    /// `token_ttl` mirrors the 24h time-based expiry of stored
    /// tokens: the sweep drops any token older than the TTL.
    pub fn new(token_ttl: Duration) -> Self {
        let store = MemoryStore {
            users: Arc::new(RwLock::new(HashMap::new())),
        };

        let store_clone = store.clone();
        tokio::spawn(async move {
            store_clone.cleanup_task(token_ttl).await;
        });

        store
    }

    /// Create a store without the background sweep, for tests.
    pub fn new_unswept() -> Self {
        MemoryStore {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Drop tokens older than the TTL across all users.
    pub async fn purge_expired_tokens(&self, token_ttl: Duration) -> usize {
        let ttl = chrono::Duration::from_std(token_ttl).unwrap_or(chrono::Duration::hours(24));
        let now = Utc::now();

        let mut users = self.users.write().await;
        let mut removed = 0;
        for user in users.values_mut() {
            let before = user.tokens.len();
            user.tokens.retain(|t| t.created_at + ttl > now);
            removed += before - user.tokens.len();
        }
        removed
    }

    /// Cleanup task that runs periodically to remove expired tokens
    async fn cleanup_task(&self, token_ttl: Duration) {
        let cleanup_interval = Duration::from_secs(60 * 60); // 1 hour

        loop {
            tokio::time::sleep(cleanup_interval).await;

            let removed = self.purge_expired_tokens(token_ttl).await;
            if removed > 0 {
                tracing::info!(removed, "purged expired session tokens");
            }
        }
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.write().await;

        let collision = users
            .values()
            .any(|u| u.username == new_user.username || u.email == new_user.email);
        if collision {
            return Err(AppError::DuplicateUser);
        }

        let user = User {
            id: Uuid::new_v4(),
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            tokens: Vec::new(),
            items: Vec::new(),
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn replace_tokens(&self, id: Uuid, tokens: Vec<SessionToken>) -> Result<(), AppError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(&id).ok_or(AppError::UserNotFound)?;
        user.tokens = tokens;
        Ok(())
    }

    async fn pull_token(&self, token: &str) -> Result<(), AppError> {
        let mut users = self.users.write().await;
        for user in users.values_mut() {
            user.tokens.retain(|t| t.token != token);
        }
        Ok(())
    }

    async fn update_user(&self, user: User) -> Result<(), AppError> {
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(AppError::UserNotFound);
        }
        users.insert(user.id, user);
        Ok(())
    }
}
