//! Staged object references.

use uuid::Uuid;

/// Reference to a video staged on the remote host.
///
/// Its existence implies the local copy was deleted; the object itself must
/// be deleted once inference submission has consumed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedMediaReference {
    /// Object name within the remote working directory.
    pub remote_name: String,
    /// Publicly retrievable URL.
    pub public_url: String,
}

/// Generate a collision-free remote object name.
pub fn unique_remote_name() -> String {
    format!("{}.mp4", Uuid::new_v4().simple())
}
