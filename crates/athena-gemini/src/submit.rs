//! Inference submission manager.
//!
//! Uploads a local video, polls the file's processing state until ACTIVE,
//! and guarantees cleanup of both sides: the local file is deleted the
//! moment the service has captured the content, and the remote file is
//! deleted on this module's own failure paths. For artifacts that reach
//! ACTIVE, the orchestrator performs the single remote deletion by
//! consuming [`UploadedArtifact::delete`].

use std::time::Duration;

use tracing::{debug, info, warn};

use athena_media::LocalMediaArtifact;

use crate::client::{FileState, GeminiClient};
use crate::error::{truncate_diagnostic, GeminiError, GeminiResult};

/// Polling parameters. The wait is a fixed-interval busy poll; backoff is
/// deliberately reserved for the generation retry path.
#[derive(Debug, Clone)]
pub struct PollConfig {
    pub interval: Duration,
    pub max_wait: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            max_wait: Duration::from_secs(120),
        }
    }
}

/// Handle to a file the service has accepted (state ACTIVE).
///
/// Deletion consumes the handle, so the remote side is torn down at most
/// once; the orchestrator must call it on every exit path, so exactly once.
#[derive(Debug)]
pub struct UploadedArtifact {
    pub name: String,
    pub uri: String,
    pub mime_type: String,
}

impl UploadedArtifact {
    /// Delete the remote file. Best-effort: a failed deletion is logged and
    /// never masks the pipeline's own outcome.
    pub async fn delete(self, client: &GeminiClient) {
        match client.delete_file(&self.name).await {
            Ok(()) => debug!(name = %self.name, "Deleted uploaded artifact"),
            Err(e) => warn!(name = %self.name, error = %e, "Failed to delete uploaded artifact"),
        }
    }
}

/// Upload a local video and wait until the service reports it ACTIVE.
///
/// Consumes the artifact: on ACTIVE the local file is deleted immediately
/// (the service holds the content; the local copy only bounded peak
/// memory). FAILED yields `RejectedByService`, an exhausted wait window
/// yields `ProcessingTimeout`; both failure paths delete the remote file
/// before returning.
pub async fn submit(
    client: &GeminiClient,
    artifact: LocalMediaArtifact,
    display_name: &str,
    poll: &PollConfig,
) -> GeminiResult<UploadedArtifact> {
    info!(
        path = %artifact.path().display(),
        size_mb = artifact.size_bytes() as f64 / (1024.0 * 1024.0),
        "Submitting video for inference"
    );

    let uploaded = client.upload_file(artifact.path(), display_name).await?;
    let name = uploaded.name.clone();

    let mut waited = Duration::ZERO;
    loop {
        let file = match client.get_file(&name).await {
            Ok(f) => f,
            Err(e) => {
                cleanup_remote(client, &name).await;
                return Err(e);
            }
        };

        match file.state {
            FileState::Active => {
                let Some(uri) = file.uri else {
                    cleanup_remote(client, &name).await;
                    return Err(GeminiError::upload_failed("ACTIVE file has no URI"));
                };
                let mime_type = file.mime_type.unwrap_or_else(|| "video/mp4".to_string());

                info!(name = %name, waited_secs = waited.as_secs(), "File is ACTIVE");
                // Service has captured the content; free local disk now.
                artifact.delete();

                return Ok(UploadedArtifact {
                    name,
                    uri,
                    mime_type,
                });
            }
            FileState::Failed => {
                let detail = file
                    .error
                    .map(|e| truncate_diagnostic(&e.to_string()))
                    .unwrap_or_else(|| "không có thông tin lỗi".to_string());
                cleanup_remote(client, &name).await;
                return Err(GeminiError::rejected(detail));
            }
            FileState::Processing | FileState::Unknown => {
                if waited >= poll.max_wait {
                    cleanup_remote(client, &name).await;
                    return Err(GeminiError::ProcessingTimeout {
                        waited_secs: waited.as_secs(),
                    });
                }
                debug!(
                    name = %name,
                    waited_secs = waited.as_secs(),
                    max_secs = poll.max_wait.as_secs(),
                    "Waiting for file processing"
                );
                tokio::time::sleep(poll.interval).await;
                waited += poll.interval;
            }
        }
    }
}

/// Best-effort remote deletion on a submission failure path.
async fn cleanup_remote(client: &GeminiClient, name: &str) {
    if let Err(e) = client.delete_file(name).await {
        warn!(name = %name, error = %e, "Failed to delete remote file after submission failure");
    }
}
