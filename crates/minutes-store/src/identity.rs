//! Identity directory contract.
//!
//! Maps human-facing handles (emails) to internal user ids and exposes
//! read-only profiles. The directory lives in the same relational backend
//! as session metadata, so backend failures surface as [`MetadataError`].
//!
//! An absent handle is not an error: callers that fan out over many
//! handles (the access reconciler) drop unresolvable ones silently.

use crate::metadata::MetadataError;
use async_trait::async_trait;
use minutes_core::{UserId, UserProfile};

/// Read-only identity lookups.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Resolve a handle (email) to a user id, if the user exists.
    async fn resolve_by_handle(&self, handle: &str) -> Result<Option<UserId>, MetadataError>;

    /// Fetch a user's profile by id, if the user exists.
    async fn get_by_id(&self, user_id: UserId) -> Result<Option<UserProfile>, MetadataError>;
}
