// ============================
// crates/backend-lib/src/lib.rs
// ============================
//! Core backend-lib functionality for the tracklist item tracker.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod items;
pub mod models;
pub mod router;
pub mod store;

use std::sync::Arc;
use std::time::Duration;

use crate::auth::{AuthService, DefaultAuth, TokenIssuer};
use crate::config::Settings;
use crate::items::ItemService;
use crate::store::{MemoryStore, UserStore};

/// Application state shared across all handlers
///
/// Handlers reach the token issuer through the authentication
/// service; it is not exposed here directly.
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth: Arc<dyn AuthService>,
    /// Item service
    pub items: ItemService,
}

impl AppState {
    /// Create a new application state over an existing store
    pub fn new(store: Arc<dyn UserStore>, settings: Settings) -> Self {
        let tokens = Arc::new(TokenIssuer::new(
            settings.token_secret.clone(),
            settings.token_ttl_secs,
        ));
        let auth = Arc::new(DefaultAuth::new(store.clone(), tokens));
        let items = ItemService::new(store);

        Self { auth, items }
    }

    /// Create a new application state backed by the in-memory store
    pub fn new_in_memory(settings: Settings) -> Self {
        let store = Arc::new(MemoryStore::new(Duration::from_secs(
            settings.token_ttl_secs,
        )));
        Self::new(store, settings)
    }
}
