//! Session lifecycle orchestration across the metadata and blob stores.
//!
//! Ordering and partial-failure policy:
//!
//! - **create**: blob put first, then session row, then owner grant. A
//!   failed or timed-out put is fatal and leaves no metadata behind. If
//!   the put succeeds and metadata creation then fails, the uploaded blob
//!   is orphaned; this is an accepted inconsistency window, logged rather
//!   than hidden.
//! - **attach**: put then ref update. Re-attaching a kind overwrites the
//!   ref; the previously referenced blob is left in place (documented
//!   trade-off).
//! - **delete**: blob removals for every present ref are issued
//!   concurrently and their outcomes collected as warnings; they never
//!   abort the deletion. The grant cascade and session-row delete that
//!   follow are metadata operations and fatal on failure — a stuck blob
//!   must never prevent an owner from reclaiming metadata state, but a
//!   dangling session row is exceptional.

use crate::config::ServiceConfig;
use crate::error::ServiceError;
use crate::guard;
use crate::reconciler::AccessReconciler;
use futures::future;
use minutes_core::{
    AccessEntry, ArtifactKind, ArtifactPayload, BlobLocator, DerivedArtifactKind, Session,
    SessionDetails, SessionId, UserId,
};
use minutes_store::{BlobError, BlobStore, IdentityResolver, MetadataStore, RemoveOutcome};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result of a successful session creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedSession {
    /// Identifier of the new session
    pub session_id: SessionId,
    /// Locator of the uploaded recording
    pub recording: BlobLocator,
}

/// One blob removal that did not confirm cleanup during deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobRemovalWarning {
    /// Which artifact the blob held
    pub kind: ArtifactKind,
    /// Where the blob was (or still is) stored
    pub locator: BlobLocator,
    /// What the store reported
    pub outcome: RemoveOutcome,
}

/// Result of a successful deletion.
///
/// An empty warnings list means every referenced blob was confirmed
/// removed; a non-empty list means the metadata cascade completed but
/// storage cleanup was partial. Callers can distinguish "failed" from
/// "succeeded with caveats" by the error/ok split alone.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeletionReport {
    /// Removals that returned not-found, failed, or timed out
    pub warnings: Vec<BlobRemovalWarning>,
}

/// Orchestrates session creation, artifact attachment, reads, and deletion.
pub struct SessionService {
    config: ServiceConfig,
    metadata: Arc<dyn MetadataStore>,
    blobs: Arc<dyn BlobStore>,
    directory: Arc<dyn IdentityResolver>,
    reconciler: AccessReconciler,
}

impl SessionService {
    /// Create a service over the given collaborators.
    pub fn new(
        config: ServiceConfig,
        metadata: Arc<dyn MetadataStore>,
        blobs: Arc<dyn BlobStore>,
        directory: Arc<dyn IdentityResolver>,
    ) -> Self {
        let reconciler = AccessReconciler::new(metadata.clone(), directory.clone());
        Self {
            config,
            metadata,
            blobs,
            directory,
            reconciler,
        }
    }

    /// The configuration this service was constructed with.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Upload the primary recording and create the session around it.
    ///
    /// All-or-nothing with respect to metadata: a failed upload creates no
    /// session row and no grants. The new session's grant set is exactly
    /// the owner.
    pub async fn create_session(
        &self,
        owner: UserId,
        title: impl Into<String>,
        payload: ArtifactPayload,
    ) -> Result<CreatedSession, ServiceError> {
        let title = title.into();
        let session_id = SessionId::generate();
        let key = session_key(session_id, &payload.file_name);

        let recording = self
            .put_bounded(ArtifactKind::Recording, &key, payload)
            .await?;

        let session = Session::new(session_id, title, owner, recording.clone());
        if let Err(err) = self.metadata.create_session(&session).await {
            warn!(
                session = %session_id,
                blob = %recording.url(&self.config.public_base_url),
                "session row creation failed after upload; recording blob is orphaned"
            );
            return Err(err.into());
        }
        if let Err(err) = self.metadata.insert_grant_if_absent(session_id, owner).await {
            warn!(
                session = %session_id,
                blob = %recording.url(&self.config.public_base_url),
                "owner grant creation failed; session row exists, recording blob is orphaned"
            );
            return Err(err.into());
        }

        info!(session = %session_id, owner = %owner, "session created");
        Ok(CreatedSession {
            session_id,
            recording,
        })
    }

    /// Upload a derived artifact and point the session's ref at it.
    ///
    /// Overwrites any prior ref for the kind; the previously referenced
    /// blob is not deleted.
    pub async fn attach_artifact(
        &self,
        session_id: SessionId,
        kind: DerivedArtifactKind,
        payload: ArtifactPayload,
    ) -> Result<BlobLocator, ServiceError> {
        let session = self.require_session(session_id).await?;
        let kind = ArtifactKind::from(kind);

        let key = session_key(session_id, &payload.file_name);
        let locator = self.put_bounded(kind, &key, payload).await?;

        if let Some(prior) = session.artifact_ref(kind) {
            debug!(
                session = %session_id,
                kind = %kind,
                prior = %prior,
                "overwriting artifact ref; prior blob left in place"
            );
        }
        self.metadata
            .update_artifact_ref(session_id, kind, &locator)
            .await?;

        info!(session = %session_id, kind = %kind, locator = %locator, "artifact attached");
        Ok(locator)
    }

    /// Replace the session title. Owner-only.
    pub async fn update_title(
        &self,
        session_id: SessionId,
        requestor: UserId,
        title: &str,
    ) -> Result<(), ServiceError> {
        let session = self.require_session(session_id).await?;
        guard::ensure_owner(&session, requestor)?;
        self.metadata.update_title(session_id, title).await?;
        Ok(())
    }

    /// The session record plus its resolved, insertion-ordered access list.
    ///
    /// Not gated on the access list; see [`crate::guard`].
    pub async fn session_details(
        &self,
        session_id: SessionId,
    ) -> Result<SessionDetails, ServiceError> {
        let session = self.require_session(session_id).await?;

        let mut access_list = Vec::new();
        for grant in self.metadata.list_grants(session_id).await? {
            match self.directory.get_by_id(grant.user_id).await? {
                Some(profile) => access_list.push(AccessEntry {
                    username: profile.username,
                    email: profile.email,
                }),
                None => {
                    debug!(
                        session = %session_id,
                        user = %grant.user_id,
                        "grant references a user absent from the directory; omitting"
                    );
                }
            }
        }

        Ok(SessionDetails {
            session,
            access_list,
        })
    }

    /// Sessions the handle's user holds a grant on, optionally filtered by
    /// a case-insensitive title substring. An unknown handle yields an
    /// empty list.
    pub async fn list_sessions(
        &self,
        handle: &str,
        title_filter: Option<&str>,
    ) -> Result<Vec<Session>, ServiceError> {
        let Some(user_id) = self.directory.resolve_by_handle(handle).await? else {
            return Ok(Vec::new());
        };
        let sessions = self.metadata.sessions_for_user(user_id).await?;
        Ok(match title_filter {
            Some(filter) => {
                let needle = filter.to_lowercase();
                sessions
                    .into_iter()
                    .filter(|session| session.title.to_lowercase().contains(&needle))
                    .collect()
            }
            None => sessions,
        })
    }

    /// Reconcile the session's access list toward the given handles.
    /// Owner-only. See [`AccessReconciler::reconcile`].
    pub async fn reconcile_access(
        &self,
        session_id: SessionId,
        requestor: UserId,
        desired_handles: &[String],
    ) -> Result<Vec<UserId>, ServiceError> {
        self.reconciler
            .reconcile(session_id, requestor, desired_handles)
            .await
    }

    /// Delete the session: best-effort blob cleanup, then the grant
    /// cascade and session row. Owner-only.
    pub async fn delete_session(
        &self,
        session_id: SessionId,
        requestor: UserId,
    ) -> Result<DeletionReport, ServiceError> {
        let session = self.require_session(session_id).await?;
        guard::ensure_owner(&session, requestor)?;

        let removals = session.present_refs().into_iter().map(|(kind, locator)| {
            let blobs = self.blobs.clone();
            let timeout = self.config.blob_op_timeout;
            async move {
                let outcome = match tokio::time::timeout(
                    timeout,
                    blobs.remove(&locator.namespace, &locator.key),
                )
                .await
                {
                    Ok(outcome) => outcome,
                    Err(_) => RemoveOutcome::Failed(BlobError::timeout("remove", timeout)),
                };
                (kind, locator, outcome)
            }
        });

        let mut warnings = Vec::new();
        for (kind, locator, outcome) in future::join_all(removals).await {
            if !outcome.is_removed() {
                warn!(
                    session = %session_id,
                    kind = %kind,
                    locator = %locator,
                    outcome = ?outcome,
                    "blob cleanup did not confirm removal; continuing with deletion"
                );
                warnings.push(BlobRemovalWarning {
                    kind,
                    locator,
                    outcome,
                });
            }
        }

        self.metadata.delete_all_grants(session_id).await?;
        self.metadata.delete_session(session_id).await?;

        info!(
            session = %session_id,
            warnings = warnings.len(),
            "session deleted"
        );
        Ok(DeletionReport { warnings })
    }

    async fn require_session(&self, session_id: SessionId) -> Result<Session, ServiceError> {
        self.metadata
            .get_session(session_id)
            .await?
            .ok_or(ServiceError::NotFound(session_id))
    }

    async fn put_bounded(
        &self,
        kind: ArtifactKind,
        key: &str,
        payload: ArtifactPayload,
    ) -> Result<BlobLocator, ServiceError> {
        let namespace = self.config.namespace_for(kind);
        let timeout = self.config.blob_op_timeout;
        match tokio::time::timeout(timeout, self.blobs.put(namespace, key, payload)).await {
            Ok(result) => result.map_err(ServiceError::Storage),
            Err(_) => Err(ServiceError::Storage(BlobError::timeout("put", timeout))),
        }
    }
}

/// Session-scoped object key: `{session_id}/{file_name}`.
fn session_key(session_id: SessionId, file_name: &str) -> String {
    format!("{session_id}/{file_name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_key_is_session_scoped() {
        let session_id = SessionId::generate();
        assert_eq!(
            session_key(session_id, "standup.mp4"),
            format!("{session_id}/standup.mp4")
        );
    }
}
