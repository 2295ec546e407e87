//! Video analysis handler.

use axum::extract::State;
use axum::Json;
use tracing::info;

use athena_models::{AnalyzeRequest, AnalyzeResponse};

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::services::run_pipeline;
use crate::state::AppState;

/// Run the full analysis pipeline for one video URL.
pub async fn analyze(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<AnalyzeRequest>,
) -> ApiResult<Json<AnalyzeResponse>> {
    let url = request
        .url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| {
            ApiError::bad_request("Thiếu URL video. Vui lòng dán link video cần phân tích.")
        })?;

    info!(user_id = %user.id, mode = %request.mode, "Analysis requested");

    let script = run_pipeline(&state, url, request.mode).await?;
    Ok(Json(AnalyzeResponse { script }))
}
