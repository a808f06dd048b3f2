//! Service error taxonomy.
//!
//! The service returns typed outcomes and never decides HTTP status codes.
//! Malformed-input validation belongs to the excluded transport layer and
//! has no variant here.

use minutes_core::SessionId;
use minutes_store::{BlobError, MetadataError};
use thiserror::Error;

/// Errors surfaced by the lifecycle manager and reconciler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The session does not exist.
    #[error("session {0} not found")]
    NotFound(SessionId),

    /// The requestor is not the session owner. No state was mutated.
    #[error("requestor is not the session owner")]
    Forbidden,

    /// A blob-store operation failed.
    ///
    /// Fatal during creation and attach. Removal failures during deletion
    /// never surface here; they are reported as
    /// [`BlobRemovalWarning`](crate::BlobRemovalWarning)s on the success
    /// value instead.
    #[error(transparent)]
    Storage(#[from] BlobError),

    /// A metadata-store operation failed. Always fatal.
    #[error(transparent)]
    Metadata(#[from] MetadataError),
}
