//! Access-list reconciliation.
//!
//! Moves a session's grant set to a desired target state by computing the
//! minimal additions and removals against the current grants. Only the
//! session owner may reconcile; the owner's own grant is always retained,
//! whether or not the desired set names the owner.

use crate::error::ServiceError;
use crate::guard;
use minutes_core::{SessionId, UserId};
use minutes_store::{IdentityResolver, MetadataStore};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Computes and applies grant additions and removals for one session.
pub struct AccessReconciler {
    metadata: Arc<dyn MetadataStore>,
    directory: Arc<dyn IdentityResolver>,
}

impl AccessReconciler {
    /// Create a reconciler over the given collaborators.
    pub fn new(metadata: Arc<dyn MetadataStore>, directory: Arc<dyn IdentityResolver>) -> Self {
        Self {
            metadata,
            directory,
        }
    }

    /// Reconcile the session's grant set toward `desired_handles`.
    ///
    /// Handles that do not resolve in the directory are dropped, not
    /// errors. Duplicate handles collapse; the operation is idempotent.
    /// Removals are applied before additions, but the ordering is not
    /// observable to callers. Returns the resulting grant user-id set in
    /// insertion order.
    ///
    /// Fails with [`ServiceError::NotFound`] for an unknown session and
    /// [`ServiceError::Forbidden`] for a non-owner requestor; neither
    /// mutates any state.
    pub async fn reconcile(
        &self,
        session_id: SessionId,
        requestor: UserId,
        desired_handles: &[String],
    ) -> Result<Vec<UserId>, ServiceError> {
        let session = self
            .metadata
            .get_session(session_id)
            .await?
            .ok_or(ServiceError::NotFound(session_id))?;
        guard::ensure_owner(&session, requestor)?;

        // The owner is unioned in unconditionally, so reconciliation can
        // never strip the owner's own grant.
        let mut desired: BTreeSet<UserId> = BTreeSet::new();
        desired.insert(session.owner_id);
        for handle in desired_handles {
            match self.directory.resolve_by_handle(handle).await? {
                Some(user_id) => {
                    desired.insert(user_id);
                }
                None => {
                    debug!(handle = %handle, "dropping unresolvable identity handle");
                }
            }
        }

        let existing: BTreeSet<UserId> = self
            .metadata
            .list_grants(session_id)
            .await?
            .into_iter()
            .map(|grant| grant.user_id)
            .collect();

        let mut removed = 0usize;
        for user_id in existing.difference(&desired) {
            self.metadata.delete_grant(session_id, *user_id).await?;
            removed += 1;
        }
        let mut added = 0usize;
        for user_id in desired.difference(&existing) {
            self.metadata
                .insert_grant_if_absent(session_id, *user_id)
                .await?;
            added += 1;
        }

        info!(
            session = %session_id,
            added,
            removed,
            "access list reconciled"
        );

        Ok(self
            .metadata
            .list_grants(session_id)
            .await?
            .into_iter()
            .map(|grant| grant.user_id)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minutes_core::{BlobLocator, Session};
    use minutes_store::{MemoryDirectory, MemoryMetadataStore};

    struct Fixture {
        reconciler: AccessReconciler,
        metadata: Arc<MemoryMetadataStore>,
        directory: Arc<MemoryDirectory>,
        session_id: SessionId,
        owner: UserId,
    }

    async fn fixture() -> Fixture {
        let metadata = Arc::new(MemoryMetadataStore::new());
        let directory = Arc::new(MemoryDirectory::new());
        let owner = directory.add_user("owner@x.com", "owner");

        let session = Session::new(
            SessionId::generate(),
            "planning",
            owner,
            BlobLocator::new("recordings", "k"),
        );
        metadata.create_session(&session).await.unwrap();
        metadata
            .insert_grant_if_absent(session.id, owner)
            .await
            .unwrap();

        Fixture {
            reconciler: AccessReconciler::new(metadata.clone(), directory.clone()),
            metadata,
            directory,
            session_id: session.id,
            owner,
        }
    }

    #[tokio::test]
    async fn test_adds_and_removes_toward_desired_set() {
        let fx = fixture().await;
        let b = fx.directory.add_user("b@x.com", "bee");
        let c = fx.directory.add_user("c@x.com", "cee");

        let set = fx
            .reconciler
            .reconcile(
                fx.session_id,
                fx.owner,
                &["b@x.com".to_owned(), "c@x.com".to_owned()],
            )
            .await
            .unwrap();
        assert_eq!(
            set.iter().copied().collect::<BTreeSet<_>>(),
            [fx.owner, b, c].into_iter().collect()
        );

        // shrinking the desired set removes B, keeps owner and C
        let set = fx
            .reconciler
            .reconcile(fx.session_id, fx.owner, &["c@x.com".to_owned()])
            .await
            .unwrap();
        assert_eq!(
            set.iter().copied().collect::<BTreeSet<_>>(),
            [fx.owner, c].into_iter().collect()
        );
    }

    #[tokio::test]
    async fn test_owner_retained_when_absent_from_desired() {
        let fx = fixture().await;
        let set = fx
            .reconciler
            .reconcile(fx.session_id, fx.owner, &[])
            .await
            .unwrap();
        assert_eq!(set, vec![fx.owner]);
    }

    #[tokio::test]
    async fn test_unresolvable_handles_dropped_silently() {
        let fx = fixture().await;
        let set = fx
            .reconciler
            .reconcile(fx.session_id, fx.owner, &["ghost@x.com".to_owned()])
            .await
            .unwrap();
        assert_eq!(set, vec![fx.owner]);
    }

    #[tokio::test]
    async fn test_non_owner_is_forbidden_without_mutation() {
        let fx = fixture().await;
        fx.directory.add_user("b@x.com", "bee");
        let intruder = fx.directory.add_user("i@x.com", "intruder");

        let result = fx
            .reconciler
            .reconcile(fx.session_id, intruder, &["b@x.com".to_owned()])
            .await;
        assert_eq!(result, Err(ServiceError::Forbidden));
        assert_eq!(fx.metadata.grant_count(), 1);
    }

    #[tokio::test]
    async fn test_unknown_session_not_found() {
        let fx = fixture().await;
        let result = fx
            .reconciler
            .reconcile(SessionId::generate(), fx.owner, &[])
            .await;
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_duplicate_handles_collapse() {
        let fx = fixture().await;
        fx.directory.add_user("b@x.com", "bee");

        let doubled = fx
            .reconciler
            .reconcile(
                fx.session_id,
                fx.owner,
                &["b@x.com".to_owned(), "b@x.com".to_owned()],
            )
            .await
            .unwrap();
        let single = fx
            .reconciler
            .reconcile(fx.session_id, fx.owner, &["b@x.com".to_owned()])
            .await
            .unwrap();
        assert_eq!(doubled, single);
    }

    #[tokio::test]
    async fn test_reconcile_is_idempotent() {
        let fx = fixture().await;
        fx.directory.add_user("b@x.com", "bee");
        fx.directory.add_user("c@x.com", "cee");
        let desired = vec!["b@x.com".to_owned(), "c@x.com".to_owned()];

        let first = fx
            .reconciler
            .reconcile(fx.session_id, fx.owner, &desired)
            .await
            .unwrap();
        let second = fx
            .reconciler
            .reconcile(fx.session_id, fx.owner, &desired)
            .await
            .unwrap();
        assert_eq!(first, second);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        const POOL: [&str; 4] = ["b@x.com", "c@x.com", "d@x.com", "ghost@x.com"];

        proptest! {
            // Reconciling twice with any handle multiset (duplicates and
            // unresolvable handles included) changes nothing on the second
            // pass, and duplicates never affect the outcome.
            #[test]
            fn prop_reconcile_idempotent(indices in proptest::collection::vec(0usize..POOL.len(), 0..12)) {
                let rt = tokio::runtime::Builder::new_current_thread()
                    .enable_time()
                    .build()
                    .unwrap();
                rt.block_on(async {
                    let fx = fixture().await;
                    // ghost@x.com stays unregistered on purpose
                    fx.directory.add_user("b@x.com", "bee");
                    fx.directory.add_user("c@x.com", "cee");
                    fx.directory.add_user("d@x.com", "dee");

                    let desired: Vec<String> =
                        indices.iter().map(|i| POOL[*i].to_owned()).collect();
                    let deduped: Vec<String> = {
                        let mut seen = BTreeSet::new();
                        desired
                            .iter()
                            .filter(|handle| seen.insert(handle.as_str().to_owned()))
                            .cloned()
                            .collect()
                    };

                    let first = fx
                        .reconciler
                        .reconcile(fx.session_id, fx.owner, &desired)
                        .await
                        .unwrap();
                    let second = fx
                        .reconciler
                        .reconcile(fx.session_id, fx.owner, &deduped)
                        .await
                        .unwrap();
                    prop_assert_eq!(first, second);
                    Ok(())
                })?;
            }
        }
    }
}
