//! Session, access-grant, and user-profile records.

use crate::artifact::{ArtifactKind, BlobLocator};
use crate::identifiers::{SessionId, UserId};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A recorded session: one owner, a title, and up to three artifact refs.
///
/// `owner_id` is set at creation and never changes; a session without an
/// owner cannot exist. Artifact refs start absent and are set by the
/// lifecycle manager (the recording at creation, transcript and summary on
/// attach). Setting a ref again overwrites it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique, immutable session identifier
    pub id: SessionId,
    /// Human-facing title, mutable by the owner
    pub title: String,
    /// The creating user; immutable
    pub owner_id: UserId,
    /// Creation timestamp
    pub created_at: OffsetDateTime,
    /// Locator of the primary recording
    pub recording_ref: Option<BlobLocator>,
    /// Locator of the derived transcript, if attached
    pub transcript_ref: Option<BlobLocator>,
    /// Locator of the derived summary, if attached
    pub summary_ref: Option<BlobLocator>,
}

impl Session {
    /// Create a session record with its recording ref already set.
    pub fn new(
        id: SessionId,
        title: impl Into<String>,
        owner_id: UserId,
        recording_ref: BlobLocator,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            owner_id,
            created_at: OffsetDateTime::now_utc(),
            recording_ref: Some(recording_ref),
            transcript_ref: None,
            summary_ref: None,
        }
    }

    /// The ref currently stored for `kind`, if any.
    pub fn artifact_ref(&self, kind: ArtifactKind) -> Option<&BlobLocator> {
        match kind {
            ArtifactKind::Recording => self.recording_ref.as_ref(),
            ArtifactKind::Transcript => self.transcript_ref.as_ref(),
            ArtifactKind::Summary => self.summary_ref.as_ref(),
        }
    }

    /// Set (or overwrite) the ref for `kind`.
    pub fn set_artifact_ref(&mut self, kind: ArtifactKind, locator: BlobLocator) {
        match kind {
            ArtifactKind::Recording => self.recording_ref = Some(locator),
            ArtifactKind::Transcript => self.transcript_ref = Some(locator),
            ArtifactKind::Summary => self.summary_ref = Some(locator),
        }
    }

    /// All refs currently present, paired with their kind.
    pub fn present_refs(&self) -> Vec<(ArtifactKind, BlobLocator)> {
        [
            (ArtifactKind::Recording, self.recording_ref.clone()),
            (ArtifactKind::Transcript, self.transcript_ref.clone()),
            (ArtifactKind::Summary, self.summary_ref.clone()),
        ]
        .into_iter()
        .filter_map(|(kind, locator)| locator.map(|locator| (kind, locator)))
        .collect()
    }
}

/// One (session, user) authorization record.
///
/// Unique per pair; the grant set for a session is exactly the set of
/// identities authorized to read and list it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessGrant {
    /// The session this grant applies to
    pub session_id: SessionId,
    /// The granted user
    pub user_id: UserId,
    /// When the grant was inserted; backs insertion-ordered access lists
    pub granted_at: OffsetDateTime,
}

impl AccessGrant {
    /// Create a grant stamped with the current time.
    pub fn new(session_id: SessionId, user_id: UserId) -> Self {
        Self {
            session_id,
            user_id,
            granted_at: OffsetDateTime::now_utc(),
        }
    }
}

/// User record as exposed by the identity directory. Read-only to the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Internal user identifier
    pub id: UserId,
    /// Email handle
    pub email: String,
    /// Display name
    pub username: String,
}

/// One entry in a session's resolved access list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessEntry {
    /// Display name of the granted user
    pub username: String,
    /// Email of the granted user
    pub email: String,
}

/// A session together with its resolved, insertion-ordered access list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDetails {
    /// The session record
    pub session: Session,
    /// Who currently holds a grant, in grant-insertion order
    pub access_list: Vec<AccessEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_session() -> Session {
        Session::new(
            SessionId::generate(),
            "weekly sync",
            UserId::generate(),
            BlobLocator::new("recordings", "a/b.mp4"),
        )
    }

    #[test]
    fn test_artifact_ref_roundtrip() {
        let mut session = sample_session();
        assert!(session.artifact_ref(ArtifactKind::Transcript).is_none());

        let locator = BlobLocator::new("transcripts", "a/b.txt");
        session.set_artifact_ref(ArtifactKind::Transcript, locator.clone());
        assert_eq!(session.artifact_ref(ArtifactKind::Transcript), Some(&locator));

        // overwrite replaces, never appends
        let newer = BlobLocator::new("transcripts", "a/b-v2.txt");
        session.set_artifact_ref(ArtifactKind::Transcript, newer.clone());
        assert_eq!(session.artifact_ref(ArtifactKind::Transcript), Some(&newer));
    }

    #[test]
    fn test_present_refs_skips_absent_kinds() {
        let mut session = sample_session();
        assert_eq!(session.present_refs().len(), 1);

        session.set_artifact_ref(ArtifactKind::Summary, BlobLocator::new("summaries", "a/b.md"));
        let refs = session.present_refs();
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].0, ArtifactKind::Recording);
        assert_eq!(refs[1].0, ArtifactKind::Summary);
    }
}
