// ============================
// crates/backend-lib/src/models.rs
// ============================
//! Domain records persisted in the document store.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A unit of tracked work, embedded in its owning [`User`].
///
/// Item ids are assigned on insertion and are only meaningful within
/// the scope of the user that owns them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Free-form status string ("open", "done", ...); no enumeration
    /// constraint is enforced.
    pub status: String,
}

/// A session credential stored on the user record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionToken {
    pub token: String,
    pub created_at: DateTime<Utc>,
}

impl SessionToken {
    pub fn new(token: String) -> Self {
        Self {
            token,
            created_at: Utc::now(),
        }
    }
}

/// Identity record. Username and email are unique across all users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    /// Active session tokens. Replaced wholesale on login, so at most
    /// one valid token exists per user at a time.
    pub tokens: Vec<SessionToken>,
    /// Ordered, id-keyed collection of items owned by this user.
    pub items: Vec<Item>,
}

impl User {
    /// Look up an embedded item by id.
    pub fn item(&self, item_id: Uuid) -> Option<&Item> {
        self.items.iter().find(|i| i.id == item_id)
    }

    /// Mutable lookup of an embedded item by id.
    pub fn item_mut(&mut self, item_id: Uuid) -> Option<&mut Item> {
        self.items.iter_mut().find(|i| i.id == item_id)
    }
}

/// Fields required to create a new user record.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}
