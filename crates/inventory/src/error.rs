use thiserror::Error;

use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A blob exists but is not a valid inventory.
    #[error("stored inventory is corrupt: {0}")]
    CorruptState(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("failed to serialize inventory: {0}")]
    Serialize(String),
}
