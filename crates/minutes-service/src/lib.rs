//! # Minutes Service - Reconciliation & Lifecycle Core
//!
//! The core subsystem of the minutes session service: computing and
//! applying access-list membership changes, enforcing owner-only mutation,
//! and keeping relational metadata and blob-store content consistent
//! across create, attach, and delete.
//!
//! # Architecture
//!
//! - [`SessionService`] orchestrates the session lifecycle across the
//!   [`MetadataStore`](minutes_store::MetadataStore) and
//!   [`BlobStore`](minutes_store::BlobStore) collaborators, with a defined
//!   partial-failure policy: blob failures are fatal on create/attach,
//!   collected as [`BlobRemovalWarning`]s on delete; metadata failures are
//!   always fatal.
//! - [`AccessReconciler`] moves a session's grant set to a desired target
//!   state via set difference; the owner's grant is always retained.
//! - [`guard`] holds the owner-only authorization predicate applied before
//!   every mutation.
//!
//! All collaborators are injected as `Arc<dyn Trait>` at construction;
//! there are no process-wide singletons. Operations are request-scoped and
//! stateless between invocations. Concurrent reconciliations against the
//! same session are not serialized and may race last-write-wins at the
//! granularity of individual grant rows.
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use minutes_service::{ServiceConfig, SessionService};
//! use minutes_store::{MemoryBlobStore, MemoryDirectory, MemoryMetadataStore};
//!
//! let metadata = Arc::new(MemoryMetadataStore::new());
//! let blobs = Arc::new(MemoryBlobStore::new());
//! let directory = Arc::new(MemoryDirectory::new());
//! let service = SessionService::new(ServiceConfig::default(), metadata, blobs, directory);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Service configuration: namespaces, public base URL, blob timeouts
pub mod config;

/// Service error taxonomy
pub mod error;

/// Owner-only authorization predicate
pub mod guard;

/// Session lifecycle orchestration across both stores
pub mod lifecycle;

/// Access-list reconciliation
pub mod reconciler;

pub use config::ServiceConfig;
pub use error::ServiceError;
pub use lifecycle::{BlobRemovalWarning, CreatedSession, DeletionReport, SessionService};
pub use reconciler::AccessReconciler;
