//! Video acquisition entry point.

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info, warn};

use athena_models::unique_video_filename;

use crate::artifact::LocalMediaArtifact;
use crate::error::{MediaError, MediaResult};
use crate::platform::{is_self_reference, Platform};
use crate::sanitize::strip_ansi_codes;
use crate::strategy::strategies_for;

/// Download a video from a social-media URL.
///
/// Strategies for the classified platform are attempted in order; the first
/// success wins and the last tool error is retained for the final failure
/// message. The resulting file is deleted before `PayloadTooLarge` is
/// returned when it exceeds `size_limit_bytes` (`None` = unlimited).
///
/// Self-referencing URLs fail with `InvalidSource` before any tool or
/// network activity.
pub async fn fetch(
    url: &str,
    work_dir: &Path,
    size_limit_bytes: Option<u64>,
) -> MediaResult<LocalMediaArtifact> {
    if is_self_reference(url) {
        return Err(MediaError::invalid_source(
            "Link không hợp lệ! Bạn đang nhập link của trang web, không phải link video. \
             Vui lòng copy link video trực tiếp từ Facebook, TikTok, Instagram hoặc YouTube.",
        ));
    }

    which::which("yt-dlp").map_err(|_| MediaError::YtDlpNotFound)?;

    let output_path = work_dir.join(unique_video_filename());
    let output_path_str = output_path.to_string_lossy().into_owned();

    let platform = Platform::classify(url);
    let strategies = strategies_for(platform);
    let attempts = strategies.len();

    info!(url = %url, platform = ?platform, attempts, "Downloading video");

    let mut last_error: Option<String> = None;

    for (i, strategy) in strategies.iter().enumerate() {
        debug!(
            strategy = strategy.label,
            attempt = i + 1,
            attempts,
            "Trying download strategy"
        );

        let args = strategy.build_args(url, &output_path_str);
        let output = Command::new("yt-dlp")
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if output.status.success() && output_path.exists() {
            info!(strategy = strategy.label, "Download strategy succeeded");
            return finalize(&output_path, size_limit_bytes).await;
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let message = strip_ansi_codes(stderr.lines().last().unwrap_or("Unknown error"));
        warn!(
            strategy = strategy.label,
            error = %message,
            "Download strategy failed"
        );
        last_error = Some(message);

        // A partial file from a failed attempt must not poison the next one.
        if output_path.exists() {
            let _ = tokio::fs::remove_file(&output_path).await;
        }
    }

    Err(MediaError::download_failed(
        last_error.unwrap_or_else(|| "Không thể tải video".to_string()),
    ))
}

/// Stat the downloaded file and enforce the payload ceiling.
async fn finalize(
    output_path: &Path,
    size_limit_bytes: Option<u64>,
) -> MediaResult<LocalMediaArtifact> {
    let metadata = tokio::fs::metadata(output_path)
        .await
        .map_err(|_| MediaError::FileNotFound(output_path.to_path_buf()))?;
    let size_bytes = metadata.len();

    info!(
        path = %output_path.display(),
        size_mb = size_bytes as f64 / (1024.0 * 1024.0),
        "Downloaded video"
    );

    let artifact = LocalMediaArtifact::new(output_path.to_path_buf(), size_bytes);

    if let Some(limit) = size_limit_bytes {
        if size_bytes > limit {
            artifact.delete();
            return Err(MediaError::PayloadTooLarge {
                size_bytes,
                limit_bytes: limit,
            });
        }
    }

    Ok(artifact)
}
