use thiserror::Error;

/// Errors that can occur when persisting or reading analysis records
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage backend rejected or failed the operation
    #[error("storage backend error: {0}")]
    Backend(String),
}
