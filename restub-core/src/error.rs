//! Error types for response-store operations.

use thiserror::Error;

/// Error type for response-store operations.
///
/// Store failures never surface to stub callers as response errors; the
/// cache stage degrades them to a miss. They are still typed so store
/// implementations can report what went wrong.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Internal store error, state or computation error.
    #[error(transparent)]
    Internal(Box<dyn std::error::Error + Send + Sync>),

    /// The entry alone is larger than the store's byte quota.
    #[error("entry of {size} bytes exceeds store quota of {quota} bytes")]
    QuotaExceeded {
        /// Weight of the rejected entry.
        size: usize,
        /// The store's configured quota.
        quota: usize,
    },
}
