//! FTP staging client.
//!
//! suppaftp's control connection is blocking, so every session runs inside
//! `tokio::task::spawn_blocking`. One session per operation: connect, login,
//! enter the working directory, transfer in binary mode, quit.

use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use suppaftp::types::FileType;
use suppaftp::{FtpError, FtpStream};
use tracing::{debug, info, warn};

use crate::config::StagingConfig;
use crate::reference::{unique_remote_name, StagedMediaReference};

/// Best-effort FTP staging client.
///
/// No operation raises past this boundary: `stage` reports failure as
/// `None`, `retrieve` and `delete` as `false`.
#[derive(Debug, Clone)]
pub struct StagingClient {
    config: StagingConfig,
}

impl StagingClient {
    pub fn new(config: StagingConfig) -> Self {
        Self { config }
    }

    /// Create a client from the environment, `None` when not configured.
    pub fn from_env() -> Option<Self> {
        StagingConfig::from_env().map(Self::new)
    }

    /// Stage a local file to the remote host.
    ///
    /// On success the local copy is deleted and a retrievable reference is
    /// returned. Any failure leaves the local file in place and returns
    /// `None`; the caller falls back to the local copy.
    pub async fn stage(&self, local_path: &Path) -> Option<StagedMediaReference> {
        let config = self.config.clone();
        let path = local_path.to_path_buf();
        let remote_name = unique_remote_name();
        let name = remote_name.clone();

        let uploaded = tokio::task::spawn_blocking(move || upload_blocking(&config, &path, &name))
            .await
            .ok()?;

        match uploaded {
            Ok(bytes) => {
                if let Err(e) = tokio::fs::remove_file(local_path).await {
                    warn!(path = %local_path.display(), error = %e, "Failed to delete local copy after staging");
                }
                let public_url = format!(
                    "{}/{}/{}",
                    self.config.public_domain.trim_end_matches('/'),
                    self.config.remote_dir,
                    remote_name
                );
                info!(remote_name = %remote_name, bytes, "Staged media to remote storage");
                Some(StagedMediaReference {
                    remote_name,
                    public_url,
                })
            }
            Err(e) => {
                warn!(error = %e, "Staging upload failed, keeping local copy");
                None
            }
        }
    }

    /// Fetch a staged object back to `dest_path`. Returns `false` on any failure.
    pub async fn retrieve(&self, reference: &StagedMediaReference, dest_path: &Path) -> bool {
        let config = self.config.clone();
        let name = reference.remote_name.clone();
        let dest = PathBuf::from(dest_path);

        let result =
            tokio::task::spawn_blocking(move || download_blocking(&config, &name, &dest)).await;

        match result {
            Ok(Ok(bytes)) => {
                debug!(remote_name = %reference.remote_name, bytes, "Retrieved staged media");
                true
            }
            Ok(Err(e)) => {
                warn!(remote_name = %reference.remote_name, error = %e, "Staged retrieval failed");
                false
            }
            Err(e) => {
                warn!(error = %e, "Staged retrieval task failed");
                false
            }
        }
    }

    /// Delete a staged object. Returns `false` on any failure.
    pub async fn delete(&self, reference: &StagedMediaReference) -> bool {
        let config = self.config.clone();
        let name = reference.remote_name.clone();

        let result = tokio::task::spawn_blocking(move || delete_blocking(&config, &name)).await;

        match result {
            Ok(Ok(())) => {
                debug!(remote_name = %reference.remote_name, "Deleted staged media");
                true
            }
            Ok(Err(e)) => {
                warn!(remote_name = %reference.remote_name, error = %e, "Staged deletion failed");
                false
            }
            Err(e) => {
                warn!(error = %e, "Staged deletion task failed");
                false
            }
        }
    }
}

/// Open a session and enter the working directory, creating it if absent.
fn open_session(config: &StagingConfig) -> Result<FtpStream, FtpError> {
    let mut ftp = FtpStream::connect(config.addr())?;
    ftp.login(&config.user, &config.password)?;
    // mkdir fails when the directory already exists; only cwd must succeed.
    let _ = ftp.mkdir(&config.remote_dir);
    ftp.cwd(&config.remote_dir)?;
    ftp.transfer_type(FileType::Binary)?;
    Ok(ftp)
}

fn upload_blocking(
    config: &StagingConfig,
    local_path: &Path,
    remote_name: &str,
) -> Result<u64, StagingOpError> {
    let file = File::open(local_path)?;
    let mut reader = BufReader::new(file);

    let mut ftp = open_session(config)?;
    let bytes = ftp.put_file(remote_name, &mut reader)?;
    let _ = ftp.quit();
    Ok(bytes)
}

fn download_blocking(
    config: &StagingConfig,
    remote_name: &str,
    dest_path: &Path,
) -> Result<u64, StagingOpError> {
    let mut ftp = open_session(config)?;
    let mut stream = ftp.retr_as_stream(remote_name)?;

    let file = File::create(dest_path)?;
    let mut writer = BufWriter::new(file);
    let bytes = io::copy(&mut stream, &mut writer)?;

    ftp.finalize_retr_stream(stream)?;
    let _ = ftp.quit();
    Ok(bytes)
}

fn delete_blocking(config: &StagingConfig, remote_name: &str) -> Result<(), StagingOpError> {
    let mut ftp = open_session(config)?;
    ftp.rm(remote_name)?;
    let _ = ftp.quit();
    Ok(())
}

/// Internal error for one blocking session; never escapes the client.
#[derive(Debug, thiserror::Error)]
enum StagingOpError {
    #[error("FTP error: {0}")]
    Ftp(#[from] FtpError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_config() -> StagingConfig {
        StagingConfig {
            host: "127.0.0.1:1".to_string(),
            user: "u".to_string(),
            password: "p".to_string(),
            public_domain: "https://cdn.example.com".to_string(),
            remote_dir: "videos".to_string(),
        }
    }

    #[tokio::test]
    async fn test_stage_failure_keeps_local_copy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("video.mp4");
        std::fs::write(&path, b"data").unwrap();

        let client = StagingClient::new(unreachable_config());
        let staged = client.stage(&path).await;

        assert!(staged.is_none());
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_retrieve_failure_is_false_not_error() {
        let dir = tempfile::tempdir().unwrap();
        let client = StagingClient::new(unreachable_config());
        let reference = StagedMediaReference {
            remote_name: "missing.mp4".to_string(),
            public_url: "https://cdn.example.com/videos/missing.mp4".to_string(),
        };

        assert!(!client.retrieve(&reference, &dir.path().join("out.mp4")).await);
    }

    #[tokio::test]
    async fn test_delete_failure_is_false_not_error() {
        let client = StagingClient::new(unreachable_config());
        let reference = StagedMediaReference {
            remote_name: "missing.mp4".to_string(),
            public_url: "https://cdn.example.com/videos/missing.mp4".to_string(),
        };

        assert!(!client.delete(&reference).await);
    }
}
