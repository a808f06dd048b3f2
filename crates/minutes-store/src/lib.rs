//! # Minutes Store - Collaborator Contracts
//!
//! Abstract seams between the service core and its three external
//! collaborators: the relational metadata store, the object/blob store,
//! and the identity directory. The core only ever talks to these traits;
//! concrete backends are constructed at startup and injected.
//!
//! In-memory implementations of all three live in [`memory`] and back the
//! test suites and local development.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Blob-store contract and removal outcomes
pub mod blob;

/// Identity directory contract
pub mod identity;

/// In-memory store implementations
pub mod memory;

/// Relational metadata-store contract
pub mod metadata;

pub use blob::{BlobError, BlobStore, RemoveOutcome};
pub use identity::IdentityResolver;
pub use memory::{MemoryBlobStore, MemoryDirectory, MemoryMetadataStore};
pub use metadata::{MetadataError, MetadataStore};
