//! In-memory implementations of the collaborator contracts.
//!
//! These back the test suites and local development. Both stores support
//! injected failures so partial-failure policy can be exercised: the
//! metadata store can be told to fail named operations, and the blob store
//! can reject puts or fail removals for specific keys.

use crate::blob::{BlobError, BlobStore, RemoveOutcome};
use crate::identity::IdentityResolver;
use crate::metadata::{MetadataError, MetadataStore};
use async_trait::async_trait;
use minutes_core::{
    AccessGrant, ArtifactKind, ArtifactPayload, BlobLocator, Session, SessionId, UserId,
    UserProfile,
};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};

/// In-memory relational store for sessions and grants.
///
/// Grants are kept in a `Vec` so insertion order is preserved, matching
/// the ordered-access-list contract.
#[derive(Default)]
pub struct MemoryMetadataStore {
    sessions: RwLock<HashMap<SessionId, Session>>,
    grants: RwLock<Vec<AccessGrant>>,
    failing_operations: RwLock<HashSet<&'static str>>,
}

impl MemoryMetadataStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every future call to the named operation fail.
    pub fn fail_operation(&self, operation: &'static str) {
        self.failing_operations.write().insert(operation);
    }

    /// Number of session rows currently stored.
    pub fn session_count(&self) -> usize {
        self.sessions.read().len()
    }

    /// Number of grant rows currently stored, across all sessions.
    pub fn grant_count(&self) -> usize {
        self.grants.read().len()
    }

    fn check(&self, operation: &'static str) -> Result<(), MetadataError> {
        if self.failing_operations.read().contains(operation) {
            return Err(MetadataError::new(operation, "injected failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl MetadataStore for MemoryMetadataStore {
    async fn create_session(&self, session: &Session) -> Result<(), MetadataError> {
        self.check("create_session")?;
        self.sessions.write().insert(session.id, session.clone());
        Ok(())
    }

    async fn get_session(&self, session_id: SessionId) -> Result<Option<Session>, MetadataError> {
        self.check("get_session")?;
        Ok(self.sessions.read().get(&session_id).cloned())
    }

    async fn update_title(&self, session_id: SessionId, title: &str) -> Result<(), MetadataError> {
        self.check("update_title")?;
        match self.sessions.write().get_mut(&session_id) {
            Some(session) => {
                session.title = title.to_owned();
                Ok(())
            }
            None => Err(MetadataError::new("update_title", "no such session row")),
        }
    }

    async fn update_artifact_ref(
        &self,
        session_id: SessionId,
        kind: ArtifactKind,
        locator: &BlobLocator,
    ) -> Result<(), MetadataError> {
        self.check("update_artifact_ref")?;
        match self.sessions.write().get_mut(&session_id) {
            Some(session) => {
                session.set_artifact_ref(kind, locator.clone());
                Ok(())
            }
            None => Err(MetadataError::new(
                "update_artifact_ref",
                "no such session row",
            )),
        }
    }

    async fn delete_session(&self, session_id: SessionId) -> Result<(), MetadataError> {
        self.check("delete_session")?;
        self.sessions.write().remove(&session_id);
        Ok(())
    }

    async fn list_grants(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<AccessGrant>, MetadataError> {
        self.check("list_grants")?;
        Ok(self
            .grants
            .read()
            .iter()
            .filter(|grant| grant.session_id == session_id)
            .cloned()
            .collect())
    }

    async fn insert_grant_if_absent(
        &self,
        session_id: SessionId,
        user_id: UserId,
    ) -> Result<(), MetadataError> {
        self.check("insert_grant_if_absent")?;
        let mut grants = self.grants.write();
        let present = grants
            .iter()
            .any(|grant| grant.session_id == session_id && grant.user_id == user_id);
        if !present {
            grants.push(AccessGrant::new(session_id, user_id));
        }
        Ok(())
    }

    async fn delete_grant(
        &self,
        session_id: SessionId,
        user_id: UserId,
    ) -> Result<(), MetadataError> {
        self.check("delete_grant")?;
        self.grants
            .write()
            .retain(|grant| !(grant.session_id == session_id && grant.user_id == user_id));
        Ok(())
    }

    async fn delete_all_grants(&self, session_id: SessionId) -> Result<(), MetadataError> {
        self.check("delete_all_grants")?;
        self.grants
            .write()
            .retain(|grant| grant.session_id != session_id);
        Ok(())
    }

    async fn sessions_for_user(&self, user_id: UserId) -> Result<Vec<Session>, MetadataError> {
        self.check("sessions_for_user")?;
        let sessions = self.sessions.read();
        Ok(self
            .grants
            .read()
            .iter()
            .filter(|grant| grant.user_id == user_id)
            .filter_map(|grant| sessions.get(&grant.session_id).cloned())
            .collect())
    }
}

struct StoredObject {
    content_type: String,
    bytes: Vec<u8>,
}

/// In-memory object store keyed by `(namespace, key)`.
#[derive(Default)]
pub struct MemoryBlobStore {
    objects: RwLock<HashMap<(String, String), StoredObject>>,
    failing_removes: RwLock<HashSet<(String, String)>>,
    rejecting_puts: RwLock<bool>,
}

impl MemoryBlobStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every future `put` fail.
    pub fn reject_puts(&self, reject: bool) {
        *self.rejecting_puts.write() = reject;
    }

    /// Make removal of `(namespace, key)` fail.
    pub fn fail_remove(&self, namespace: &str, key: &str) {
        self.failing_removes
            .write()
            .insert((namespace.to_owned(), key.to_owned()));
    }

    /// Whether an object is stored under `(namespace, key)`.
    pub fn contains(&self, namespace: &str, key: &str) -> bool {
        self.objects
            .read()
            .contains_key(&(namespace.to_owned(), key.to_owned()))
    }

    /// Number of stored objects.
    pub fn object_count(&self) -> usize {
        self.objects.read().len()
    }

    /// Content type recorded for `(namespace, key)`, if stored.
    pub fn content_type(&self, namespace: &str, key: &str) -> Option<String> {
        self.objects
            .read()
            .get(&(namespace.to_owned(), key.to_owned()))
            .map(|object| object.content_type.clone())
    }

    /// Size in bytes of the object under `(namespace, key)`, if stored.
    pub fn object_size(&self, namespace: &str, key: &str) -> Option<usize> {
        self.objects
            .read()
            .get(&(namespace.to_owned(), key.to_owned()))
            .map(|object| object.bytes.len())
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(
        &self,
        namespace: &str,
        key: &str,
        payload: ArtifactPayload,
    ) -> Result<BlobLocator, BlobError> {
        if *self.rejecting_puts.read() {
            return Err(BlobError::backend("put", "injected put failure"));
        }
        self.objects.write().insert(
            (namespace.to_owned(), key.to_owned()),
            StoredObject {
                content_type: payload.content_type,
                bytes: payload.bytes,
            },
        );
        Ok(BlobLocator::new(namespace, key))
    }

    async fn remove(&self, namespace: &str, key: &str) -> RemoveOutcome {
        let pair = (namespace.to_owned(), key.to_owned());
        if self.failing_removes.read().contains(&pair) {
            return RemoveOutcome::Failed(BlobError::backend("remove", "injected remove failure"));
        }
        match self.objects.write().remove(&pair) {
            Some(_) => RemoveOutcome::Removed,
            None => RemoveOutcome::NotFound,
        }
    }
}

/// In-memory identity directory.
#[derive(Default)]
pub struct MemoryDirectory {
    users: RwLock<Vec<UserProfile>>,
}

impl MemoryDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user and return the generated id.
    pub fn add_user(&self, email: impl Into<String>, username: impl Into<String>) -> UserId {
        let id = UserId::generate();
        self.users.write().push(UserProfile {
            id,
            email: email.into(),
            username: username.into(),
        });
        id
    }
}

#[async_trait]
impl IdentityResolver for MemoryDirectory {
    async fn resolve_by_handle(&self, handle: &str) -> Result<Option<UserId>, MetadataError> {
        Ok(self
            .users
            .read()
            .iter()
            .find(|user| user.email == handle)
            .map(|user| user.id))
    }

    async fn get_by_id(&self, user_id: UserId) -> Result<Option<UserProfile>, MetadataError> {
        Ok(self
            .users
            .read()
            .iter()
            .find(|user| user.id == user_id)
            .cloned())
    }
}
