//! Analysis pipeline orchestrator.
//!
//! One request walks the whole chain: download, optional FTP staging
//! round-trip, upload to Gemini, poll to ACTIVE, generate the script.
//! Remote resources are released on every exit path: the staged FTP copy
//! right after submission consumes the local file, the uploaded Gemini file
//! exactly once after generation finishes, success or not.

use tracing::{info, warn};

use athena_gemini::{generate_with_retry, script_prompt, submit, Part, PollConfig, RetryPolicy};
use athena_media::{fetch, LocalMediaArtifact};
use athena_models::{unique_video_filename, ScriptMode};
use athena_staging::StagedMediaReference;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Download a video, run it through Gemini, return the generated script.
pub async fn run_pipeline(state: &AppState, url: &str, mode: ScriptMode) -> ApiResult<String> {
    let artifact = fetch(url, &state.config.work_dir, state.config.max_video_bytes).await?;
    info!(
        size_mb = artifact.size_bytes() as f64 / (1024.0 * 1024.0),
        mode = %mode,
        "Video downloaded"
    );

    let (artifact, staged) = stage_round_trip(state, artifact).await?;

    let display_name = artifact
        .path()
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(unique_video_filename);

    let submit_result = submit(&state.gemini, artifact, &display_name, &PollConfig::default()).await;

    // Submission has consumed the local copy (or failed); the staged copy
    // has served its purpose either way.
    if let (Some(staging), Some(reference)) = (&state.staging, &staged) {
        staging.delete(reference).await;
    }

    let uploaded = submit_result?;
    let file_part = Part::file(uploaded.mime_type.clone(), uploaded.uri.clone());
    let parts = vec![file_part, Part::text(script_prompt(mode))];

    let generated = generate_with_retry(
        &state.gemini,
        &state.model,
        parts,
        &RetryPolicy::default(),
    )
    .await;

    // Exactly once, success or failure.
    uploaded.delete(&state.gemini).await;

    Ok(generated?)
}

/// Relocate the artifact through FTP staging when configured.
///
/// Best-effort: if the upload leg fails the local copy is kept and used
/// directly. A failed retrieve leg is an error, since by then the local
/// copy is gone.
async fn stage_round_trip(
    state: &AppState,
    artifact: LocalMediaArtifact,
) -> ApiResult<(LocalMediaArtifact, Option<StagedMediaReference>)> {
    let Some(staging) = &state.staging else {
        return Ok((artifact, None));
    };

    let Some(reference) = staging.stage(artifact.path()).await else {
        warn!("Staging upload failed, continuing with local copy");
        return Ok((artifact, None));
    };
    // Staging deleted the local file on success; the handle is now inert.
    drop(artifact);

    let dest = state.config.work_dir.join(unique_video_filename());
    if !staging.retrieve(&reference, &dest).await {
        staging.delete(&reference).await;
        return Err(ApiError::internal(
            "Không thể lấy lại video từ máy chủ trung gian. Vui lòng thử lại.",
        ));
    }

    let size_bytes = tokio::fs::metadata(&dest)
        .await
        .map_err(|e| ApiError::internal(format!("Lỗi hệ thống file: {e}")))?
        .len();

    info!(url = %reference.public_url, "Video staged and retrieved");
    Ok((
        LocalMediaArtifact::new(dest, size_bytes),
        Some(reference),
    ))
}
