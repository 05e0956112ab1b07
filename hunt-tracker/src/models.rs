use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};

/// One photographable site in the hunt.
///
/// `id` is assigned at roster definition time and never changes.
/// `submitted` is monotonic within a session: once true for a location it
/// never reverts to false, neither locally nor through reconciliation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub id: u32,
    pub name: String,
    /// Rating in [1,5], fixed at definition time
    pub difficulty: u8,
    #[serde(default)]
    pub submitted: bool,
    /// Store key of the winning submission; present iff `submitted`
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub image_reference: Option<String>,
}

/// A user-selected file held in memory pending confirmation.
///
/// Exists only between "file chosen" and "submit confirmed or modal
/// closed"; never persisted.
#[derive(Clone, PartialEq)]
pub struct StagedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl StagedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// Staged files can be megabytes; keep Debug output to the metadata.
impl std::fmt::Debug for StagedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StagedFile")
            .field("name", &self.name)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Wire record for one durable submission write.
///
/// The attempt id is a ULID generated per submit attempt, so a retried
/// write after a failure can never collide with an earlier partial write,
/// and the store-side winner per location is simply the greatest attempt
/// id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmissionAttempt {
    pub attempt_id: String,
    /// Base64-encoded photo content
    pub content: String,
    /// RFC 3339 UTC upload timestamp
    pub uploaded_at: String,
    /// Session id of the writing client
    pub session: String,
}

impl SubmissionAttempt {
    pub fn new(attempt_id: impl Into<String>, file: &StagedFile, session: impl Into<String>) -> Self {
        Self {
            attempt_id: attempt_id.into(),
            content: general_purpose::STANDARD.encode(&file.bytes),
            uploaded_at: chrono::Utc::now().to_rfc3339(),
            session: session.into(),
        }
    }
}
