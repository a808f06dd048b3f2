//! Artifact kinds, blob-store locators, and upload payloads.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three artifact kinds a session may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// The primary recording uploaded at session creation
    Recording,
    /// Derived transcript text
    Transcript,
    /// Derived summary text
    Summary,
}

impl ArtifactKind {
    /// Stable lowercase name, used for logging and key construction.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Recording => "recording",
            Self::Transcript => "transcript",
            Self::Summary => "summary",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Artifact kinds that can be attached after creation.
///
/// The recording is set exactly once, at creation time; only transcript and
/// summary arrive later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DerivedArtifactKind {
    /// Derived transcript text
    Transcript,
    /// Derived summary text
    Summary,
}

impl From<DerivedArtifactKind> for ArtifactKind {
    fn from(value: DerivedArtifactKind) -> Self {
        match value {
            DerivedArtifactKind::Transcript => Self::Transcript,
            DerivedArtifactKind::Summary => Self::Summary,
        }
    }
}

impl fmt::Display for DerivedArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(ArtifactKind::from(*self).as_str())
    }
}

/// Location of a stored blob: a namespace (bucket) plus an object key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlobLocator {
    /// Namespace (bucket) holding the object
    pub namespace: String,
    /// Object key within the namespace
    pub key: String,
}

impl BlobLocator {
    /// Create a locator from namespace and key.
    pub fn new(namespace: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            key: key.into(),
        }
    }

    /// Render the public URL for this locator: `{base}/{namespace}/{key}`.
    pub fn url(&self, public_base: &str) -> String {
        format!(
            "{}/{}/{}",
            public_base.trim_end_matches('/'),
            self.namespace,
            self.key
        )
    }
}

impl fmt::Display for BlobLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.key)
    }
}

/// Bytes and metadata for an artifact upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPayload {
    /// Original file name, used as the tail of the object key
    pub file_name: String,
    /// MIME content type forwarded to the blob store
    pub content_type: String,
    /// Raw artifact bytes
    pub bytes: Vec<u8>,
}

impl ArtifactPayload {
    /// Create a payload from its parts.
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locator_url_rendering() {
        let locator = BlobLocator::new("recordings", "abc/standup.mp4");
        assert_eq!(
            locator.url("http://media.local:9000"),
            "http://media.local:9000/recordings/abc/standup.mp4"
        );
        // trailing slash on the base is tolerated
        assert_eq!(
            locator.url("http://media.local:9000/"),
            "http://media.local:9000/recordings/abc/standup.mp4"
        );
    }

    #[test]
    fn test_derived_kind_maps_into_artifact_kind() {
        assert_eq!(
            ArtifactKind::from(DerivedArtifactKind::Transcript),
            ArtifactKind::Transcript
        );
        assert_eq!(
            ArtifactKind::from(DerivedArtifactKind::Summary),
            ArtifactKind::Summary
        );
    }
}
