//! # Minutes Core - Domain Types
//!
//! Foundation crate for the minutes session service: strongly typed
//! identifiers, artifact kinds and blob locators, and the session /
//! access-grant records shared by the store and service layers.
//!
//! This crate is pure data. Collaborator traits live in `minutes-store`
//! and orchestration logic in `minutes-service`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Artifact kinds, blob locators, and upload payloads
pub mod artifact;

/// Strongly typed session and user identifiers
pub mod identifiers;

/// Session, access-grant, and user-profile records
pub mod session;

pub use artifact::{ArtifactKind, ArtifactPayload, BlobLocator, DerivedArtifactKind};
pub use identifiers::{SessionId, UserId};
pub use session::{AccessEntry, AccessGrant, Session, SessionDetails, UserProfile};
