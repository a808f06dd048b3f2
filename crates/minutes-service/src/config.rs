//! Service configuration.

use minutes_core::ArtifactKind;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for [`SessionService`](crate::SessionService).
///
/// Carries the blob namespace for each artifact kind, the public base URL
/// used when rendering locator URLs, and the bound applied to every
/// individual blob-store call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL prefixed to locators when rendering public URLs
    pub public_base_url: String,

    /// Namespace (bucket) for primary recordings
    pub recording_namespace: String,

    /// Namespace (bucket) for transcripts
    pub transcript_namespace: String,

    /// Namespace (bucket) for summaries
    pub summary_namespace: String,

    /// Bound on each individual blob-store call.
    ///
    /// A timed-out `put` is a fatal storage error; a timed-out `remove`
    /// during deletion is a non-fatal warning.
    pub blob_op_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            public_base_url: "http://localhost:9000".to_owned(),
            recording_namespace: "recordings".to_owned(),
            transcript_namespace: "transcripts".to_owned(),
            summary_namespace: "summaries".to_owned(),
            blob_op_timeout: Duration::from_secs(30),
        }
    }
}

impl ServiceConfig {
    /// The namespace configured for the given artifact kind.
    pub fn namespace_for(&self, kind: ArtifactKind) -> &str {
        match kind {
            ArtifactKind::Recording => &self.recording_namespace,
            ArtifactKind::Transcript => &self.transcript_namespace,
            ArtifactKind::Summary => &self.summary_namespace,
        }
    }
}
