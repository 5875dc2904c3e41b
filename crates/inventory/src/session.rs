//! Application-side owner of the single inventory state instance.

use stockroom_core::ProductId;

use crate::error::StoreError;
use crate::product::{ProductForm, ProductInput, ProductRecord};
use crate::storage::BlobStore;
use crate::store::{InventoryState, InventoryStore};
use crate::views::{self, InventorySummary, ProductRow};

/// Holds the current inventory and threads it through the store.
///
/// Opening never fails: an unreadable blob is logged, kept in `load_error`
/// for the UI to report, and the session starts empty. Before the first write
/// replaces it, the raw blob is copied to a backup key (see `backup_key`).
#[derive(Debug)]
pub struct InventorySession<B> {
    store: InventoryStore<B>,
    products: InventoryState,
    load_error: Option<StoreError>,
    backup_pending: bool,
    backup_key: Option<String>,
}

impl<B: BlobStore> InventorySession<B> {
    pub fn open(store: InventoryStore<B>) -> Self {
        match store.load() {
            Ok(products) => Self {
                store,
                products,
                load_error: None,
                backup_pending: false,
                backup_key: None,
            },
            Err(err) => {
                tracing::error!(error = %err, "failed to load inventory; starting empty");
                Self {
                    store,
                    products: Vec::new(),
                    load_error: Some(err),
                    backup_pending: true,
                    backup_key: None,
                }
            }
        }
    }

    pub fn load_error(&self) -> Option<&StoreError> {
        self.load_error.as_ref()
    }

    /// Where the unreadable blob was copied, once a write has happened.
    pub fn backup_key(&self) -> Option<&str> {
        self.backup_key.as_deref()
    }

    pub fn products(&self) -> &[ProductRecord] {
        &self.products
    }

    pub fn product(&self, id: &ProductId) -> Option<&ProductRecord> {
        views::find(&self.products, id)
    }

    /// Prefilled form for editing `id`, if it still exists.
    pub fn edit_form(&self, id: &ProductId) -> Option<ProductForm> {
        self.product(id).map(ProductForm::from_record)
    }

    pub fn save_product(&mut self, input: ProductInput) -> Result<(), StoreError> {
        self.back_up_unreadable()?;
        self.products = self.store.upsert(&self.products, input)?;
        Ok(())
    }

    /// Callers confirm with the user before calling this.
    pub fn delete_product(&mut self, id: &ProductId) -> Result<(), StoreError> {
        self.back_up_unreadable()?;
        self.products = self.store.remove(&self.products, id)?;
        Ok(())
    }

    fn back_up_unreadable(&mut self) -> Result<(), StoreError> {
        if self.backup_pending {
            self.backup_key = self.store.back_up_raw()?;
            self.backup_pending = false;
        }
        Ok(())
    }

    pub fn summary(&self) -> InventorySummary {
        self.store.summary(&self.products)
    }

    pub fn search(&self, term: &str) -> InventoryState {
        self.store.search(&self.products, term)
    }

    /// Table rows for `term` (blank shows everything).
    pub fn rows(&self, term: &str) -> Vec<ProductRow> {
        views::rows(&self.search(term))
    }
}
