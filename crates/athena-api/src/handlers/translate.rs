//! Script translation handler.

use axum::extract::State;
use axum::Json;
use tracing::info;

use athena_gemini::{generate_with_retry, translate_prompt, Part, RetryPolicy};
use athena_models::{TranslateRequest, TranslateResponse};

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Translate a previously generated script into another language.
///
/// Text-only generation call; reuses the same retry policy as analysis.
pub async fn translate(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<TranslateRequest>,
) -> ApiResult<Json<TranslateResponse>> {
    let text = request.text.trim();
    if text.is_empty() {
        return Err(ApiError::bad_request(
            "Thiếu nội dung cần dịch. Vui lòng tạo kịch bản trước khi dịch.",
        ));
    }

    info!(
        user_id = %user.id,
        target_language = %request.target_language,
        chars = text.len(),
        "Translation requested"
    );

    let prompt = translate_prompt(text, &request.target_language, &request.language_name);
    let translated_text = generate_with_retry(
        &state.gemini,
        &state.model,
        vec![Part::text(prompt)],
        &RetryPolicy::default(),
    )
    .await?;

    Ok(Json(TranslateResponse {
        translated_text,
        target_language: request.target_language,
        language_name: request.language_name,
    }))
}
