//! Downloaded media artifacts.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// A downloaded video on local disk.
///
/// The artifact has exactly one owner at a time. Whoever holds it last must
/// delete it; `Drop` acts as a backstop so the file cannot leak when an
/// error unwinds the pipeline midway.
#[derive(Debug)]
pub struct LocalMediaArtifact {
    path: PathBuf,
    size_bytes: u64,
}

impl LocalMediaArtifact {
    pub fn new(path: PathBuf, size_bytes: u64) -> Self {
        Self { path, size_bytes }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// Delete the backing file now, consuming the artifact.
    ///
    /// Errors are logged, not raised: cleanup must never mask the failure
    /// that triggered it.
    pub fn delete(self) {
        self.remove_file();
        // Drop would otherwise try again on an already-deleted path.
        std::mem::forget(self);
    }

    fn remove_file(&self) {
        if self.path.exists() {
            match std::fs::remove_file(&self.path) {
                Ok(()) => debug!(path = %self.path.display(), "Deleted local media artifact"),
                Err(e) => warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to delete local media artifact"
                ),
            }
        }
    }
}

impl Drop for LocalMediaArtifact {
    fn drop(&mut self) {
        self.remove_file();
    }
}
