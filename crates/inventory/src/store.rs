//! Inventory store: upsert/remove over an explicit state value, persisted
//! through an injected [`BlobStore`].

use std::collections::HashSet;

use chrono::Utc;

use stockroom_core::{Entity, ProductId};

use crate::config::{DEFAULT_STORAGE_KEY, StoreConfig};
use crate::error::StoreError;
use crate::product::{ProductInput, ProductRecord};
use crate::storage::BlobStore;
use crate::views::{self, InventorySummary};

/// Ordered product records; insertion order is display order.
pub type InventoryState = Vec<ProductRecord>;

/// Owns the persistence port, never the inventory itself. Callers hold the
/// state and pass it in; every mutation returns the new state after it has
/// been written.
#[derive(Debug)]
pub struct InventoryStore<B> {
    blobs: B,
    key: String,
}

impl<B: BlobStore> InventoryStore<B> {
    pub fn new(blobs: B) -> Self {
        Self::with_key(blobs, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(blobs: B, key: impl Into<String>) -> Self {
        Self {
            blobs,
            key: key.into(),
        }
    }

    pub fn from_config(blobs: B, config: &StoreConfig) -> Self {
        Self::with_key(blobs, config.storage_key.clone())
    }

    /// Read the persisted inventory. Nothing stored yet means empty.
    pub fn load(&self) -> Result<InventoryState, StoreError> {
        let Some(raw) = self.blobs.get(&self.key)? else {
            tracing::debug!(key = %self.key, "no stored inventory; starting empty");
            return Ok(Vec::new());
        };

        let mut state: InventoryState = serde_json::from_str(&raw).map_err(|e| {
            tracing::error!(key = %self.key, error = %e, "stored inventory is corrupt");
            StoreError::CorruptState(e.to_string())
        })?;

        // Two clients minting ids in the same millisecond can leave duplicates
        // behind; the earliest record wins.
        let mut seen = HashSet::new();
        state.retain(|item| {
            let first = seen.insert(item.id().clone());
            if !first {
                tracing::warn!(key = %self.key, product_id = %item.id(), "dropping record with duplicate id");
            }
            first
        });

        tracing::debug!(key = %self.key, count = state.len(), "loaded inventory");
        Ok(state)
    }

    /// Create (no id) or update (matching id) a product, then persist.
    ///
    /// An id that matches nothing is a no-op: the state comes back unchanged
    /// and nothing is written.
    pub fn upsert(
        &self,
        state: &[ProductRecord],
        input: ProductInput,
    ) -> Result<InventoryState, StoreError> {
        let mut next = state.to_vec();

        match input.id {
            Some(id) => {
                let Some(existing) = next.iter_mut().find(|item| item.has_id(&id)) else {
                    tracing::warn!(product_id = %id, "edit target no longer exists; ignoring");
                    return Ok(next);
                };
                existing.apply_details(input.details);
                tracing::info!(product_id = %id, "product updated");
            }
            None => {
                let record = ProductRecord::new(ProductId::new(), input.details, Utc::now());
                tracing::info!(product_id = %record.id(), name = %record.name(), "product created");
                next.push(record);
            }
        }

        self.persist(&next)?;
        Ok(next)
    }

    /// Delete a product, then persist. Unknown ids are a no-op.
    pub fn remove(
        &self,
        state: &[ProductRecord],
        id: &ProductId,
    ) -> Result<InventoryState, StoreError> {
        let next: InventoryState = state.iter().filter(|item| !item.has_id(id)).cloned().collect();

        if next.len() == state.len() {
            tracing::warn!(product_id = %id, "delete target not found; ignoring");
            return Ok(next);
        }

        self.persist(&next)?;
        tracing::info!(product_id = %id, "product deleted");
        Ok(next)
    }

    /// Copy whatever is stored under the key to a fresh backup key, so a blob
    /// that could not be loaded survives the next write. Returns the backup
    /// key, or `None` when nothing was stored.
    pub fn back_up_raw(&self) -> Result<Option<String>, StoreError> {
        let Some(raw) = self.blobs.get(&self.key)? else {
            return Ok(None);
        };

        let backup_key = format!(
            "{}_unreadable_{}",
            self.key,
            Utc::now().timestamp_nanos_opt().unwrap_or_default()
        );
        self.blobs.set(&backup_key, &raw)?;
        tracing::warn!(key = %self.key, backup_key = %backup_key, "backed up unreadable inventory");
        Ok(Some(backup_key))
    }

    pub fn summary(&self, state: &[ProductRecord]) -> InventorySummary {
        views::summary(state)
    }

    pub fn search(&self, state: &[ProductRecord], term: &str) -> InventoryState {
        views::search(state, term)
    }

    fn persist(&self, state: &[ProductRecord]) -> Result<(), StoreError> {
        let payload =
            serde_json::to_string(state).map_err(|e| StoreError::Serialize(e.to_string()))?;
        self.blobs.set(&self.key, &payload)?;
        tracing::debug!(key = %self.key, count = state.len(), bytes = payload.len(), "inventory persisted");
        Ok(())
    }
}
