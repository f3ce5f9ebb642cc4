// ============================
// crates/backend-lib/src/items.rs
// ============================
//! CRUD over the item list embedded in a user record.
use std::sync::Arc;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::Item;
use crate::store::UserStore;

/// Fields supplied when creating or overwriting an item.
#[derive(Debug, Clone)]
pub struct ItemFields {
    pub name: String,
    pub description: String,
    pub status: String,
}

/// Item service scoped by user id.
///
/// Operations follow read-modify-write on the whole user document;
/// concurrent writers to the same user are last-write-wins at the
/// store.
#[derive(Clone)]
pub struct ItemService {
    store: Arc<dyn UserStore>,
}

impl ItemService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Add an item and return the full updated list.
    pub async fn add_item(&self, user_id: Uuid, fields: ItemFields) -> Result<Vec<Item>, AppError> {
        let mut user = self
            .store
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::UserNotFound)?;

        user.items.push(Item {
            id: Uuid::new_v4(),
            name: fields.name,
            description: fields.description,
            status: fields.status,
        });
        self.store.update_user(user.clone()).await?;

        Ok(user.items)
    }

    /// List all items for a user.
    pub async fn list_items(&self, user_id: Uuid) -> Result<Vec<Item>, AppError> {
        let user = self
            .store
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::UserNotFound)?;
        Ok(user.items)
    }

    /// Fetch a single item by id.
    pub async fn get_item(&self, user_id: Uuid, item_id: Uuid) -> Result<Item, AppError> {
        let user = self
            .store
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::UserNotFound)?;
        user.item(item_id).cloned().ok_or(AppError::ItemNotFound)
    }

    /// Overwrite all of an item's fields and return the updated item.
    pub async fn update_item(
        &self,
        user_id: Uuid,
        item_id: Uuid,
        fields: ItemFields,
    ) -> Result<Item, AppError> {
        let mut user = self
            .store
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::UserNotFound)?;

        let item = user.item_mut(item_id).ok_or(AppError::ItemNotFound)?;
        item.name = fields.name;
        item.description = fields.description;
        item.status = fields.status;
        let updated = item.clone();

        self.store.update_user(user).await?;
        Ok(updated)
    }

    /// Delete an item by id. A second delete of the same id fails
    /// with `ItemNotFound`.
    pub async fn delete_item(&self, user_id: Uuid, item_id: Uuid) -> Result<(), AppError> {
        let mut user = self
            .store
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::UserNotFound)?;

        let position = user
            .items
            .iter()
            .position(|i| i.id == item_id)
            .ok_or(AppError::ItemNotFound)?;
        user.items.remove(position);

        self.store.update_user(user).await
    }
}
