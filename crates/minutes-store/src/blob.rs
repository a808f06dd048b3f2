//! Blob-store contract.
//!
//! Objects are addressed by `(namespace, key)`. `put` is fallible in the
//! usual way; `remove` instead reports its outcome as data, because the
//! deletion path treats removal failures as warnings rather than errors
//! and must aggregate them without aborting.

use async_trait::async_trait;
use minutes_core::{ArtifactPayload, BlobLocator};
use std::time::Duration;
use thiserror::Error;

/// Failure of a blob-store operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlobError {
    /// The backend rejected or failed the operation.
    #[error("blob {operation} failed: {message}")]
    Backend {
        /// Name of the failed operation, e.g. `put`
        operation: &'static str,
        /// Backend-supplied failure description
        message: String,
    },

    /// The operation did not complete within the configured bound.
    #[error("blob {operation} timed out after {timeout:?}")]
    Timeout {
        /// Name of the timed-out operation
        operation: &'static str,
        /// The bound that was exceeded
        timeout: Duration,
    },
}

impl BlobError {
    /// Create a backend failure for the named operation.
    pub fn backend(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Backend {
            operation,
            message: message.into(),
        }
    }

    /// Create a timeout for the named operation.
    pub fn timeout(operation: &'static str, timeout: Duration) -> Self {
        Self::Timeout { operation, timeout }
    }
}

/// Outcome of a removal request, reported as data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The object existed and was removed
    Removed,
    /// No object was stored under the key
    NotFound,
    /// The backend failed the removal
    Failed(BlobError),
}

impl RemoveOutcome {
    /// Whether the object is confirmed gone from the store.
    pub fn is_removed(&self) -> bool {
        matches!(self, Self::Removed)
    }
}

/// Object storage addressed by namespace and key.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store the payload under `(namespace, key)`, returning its locator.
    async fn put(
        &self,
        namespace: &str,
        key: &str,
        payload: ArtifactPayload,
    ) -> Result<BlobLocator, BlobError>;

    /// Request removal of `(namespace, key)`.
    ///
    /// Never fails at the Rust level; the outcome (including backend
    /// failure) is returned as a [`RemoveOutcome`].
    async fn remove(&self, namespace: &str, key: &str) -> RemoveOutcome;
}
