//! Relational metadata-store contract.
//!
//! Sessions and access grants live in a relational backend with a
//! uniqueness constraint on `(session_id, user_id)`. No multi-row
//! transactions are assumed; every method is a single-row or single-set
//! operation, and the service layer is responsible for tolerating partial
//! completion across calls.

use async_trait::async_trait;
use minutes_core::{AccessGrant, ArtifactKind, BlobLocator, Session, SessionId, UserId};
use thiserror::Error;

/// Failure of a metadata-store operation.
///
/// Always fatal to the caller; the service layer never swallows these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("metadata store failure during {operation}: {message}")]
pub struct MetadataError {
    /// Name of the failed operation, e.g. `create_session`
    pub operation: &'static str,
    /// Backend-supplied failure description
    pub message: String,
}

impl MetadataError {
    /// Create an error for the named operation.
    pub fn new(operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }
}

/// CRUD surface for sessions and access grants.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Persist a new session row.
    async fn create_session(&self, session: &Session) -> Result<(), MetadataError>;

    /// Fetch a session by id, if present.
    async fn get_session(&self, session_id: SessionId) -> Result<Option<Session>, MetadataError>;

    /// Replace the title of an existing session.
    async fn update_title(
        &self,
        session_id: SessionId,
        title: &str,
    ) -> Result<(), MetadataError>;

    /// Set (or overwrite) the artifact ref of the given kind.
    async fn update_artifact_ref(
        &self,
        session_id: SessionId,
        kind: ArtifactKind,
        locator: &BlobLocator,
    ) -> Result<(), MetadataError>;

    /// Delete the session row. Deleting an absent row is a no-op.
    async fn delete_session(&self, session_id: SessionId) -> Result<(), MetadataError>;

    /// All grants for a session, in insertion order.
    async fn list_grants(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<AccessGrant>, MetadataError>;

    /// Insert a grant unless the `(session, user)` pair already exists.
    ///
    /// Inserting an already-present pair is a no-op, not an error.
    async fn insert_grant_if_absent(
        &self,
        session_id: SessionId,
        user_id: UserId,
    ) -> Result<(), MetadataError>;

    /// Delete one grant. Deleting an absent pair is a no-op.
    async fn delete_grant(
        &self,
        session_id: SessionId,
        user_id: UserId,
    ) -> Result<(), MetadataError>;

    /// Delete every grant for a session.
    async fn delete_all_grants(&self, session_id: SessionId) -> Result<(), MetadataError>;

    /// Sessions the user holds a grant on, in grant-insertion order.
    async fn sessions_for_user(&self, user_id: UserId) -> Result<Vec<Session>, MetadataError>;
}
