//! Inventory tracking: product records, their persisted state, and the
//! dashboard/search views derived from it.
//!
//! The store holds no state of its own. Callers own an [`InventoryState`]
//! value and pass it through [`InventoryStore`] operations, which persist via
//! an injected [`BlobStore`] before returning. [`InventorySession`] is the thin
//! application-side wrapper that keeps the one live instance.

pub mod config;
pub mod error;
pub mod money;
pub mod product;
pub mod session;
pub mod storage;
pub mod store;
pub mod views;

pub use config::{DEFAULT_STORAGE_KEY, StoreConfig};
pub use error::StoreError;
pub use money::Money;
pub use product::{
    LOW_STOCK_THRESHOLD, ProductDetails, ProductForm, ProductInput, ProductRecord, StockStatus,
};
pub use session::InventorySession;
pub use storage::{BlobStore, FileBlobStore, InMemoryBlobStore, StorageError};
pub use store::{InventoryState, InventoryStore};
pub use views::{
    EMPTY_INVENTORY_MESSAGE, InventorySummary, ProductRow, SummaryDisplay, find, rows, search,
    summary,
};
