//! API error types.
//!
//! All pipeline failures are funneled through [`ApiError`] and rendered as a
//! JSON body `{"error": "..."}` with a Vietnamese message that names the
//! likely cause and what the user can do about it.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use athena_gemini::{truncate_diagnostic, GeminiError};
use athena_media::{strip_ansi_codes, MediaError};

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<MediaError> for ApiError {
    fn from(err: MediaError) -> Self {
        match err {
            MediaError::InvalidSource(message) => ApiError::BadRequest(message),
            MediaError::DownloadFailed { message } => ApiError::Internal(format!(
                "Lỗi tải video: {}. Hãy đảm bảo link video là công khai, hoặc thử nền tảng khác \
                 (TikTok, Facebook, YouTube).",
                truncate_diagnostic(&strip_ansi_codes(&message))
            )),
            MediaError::PayloadTooLarge {
                size_bytes,
                limit_bytes,
            } => ApiError::Internal(format!(
                "Video quá lớn ({:.1} MB, giới hạn {} MB). Hãy thử video ngắn hơn hoặc chất \
                 lượng thấp hơn.",
                size_bytes as f64 / (1024.0 * 1024.0),
                limit_bytes / (1024 * 1024)
            )),
            MediaError::YtDlpNotFound => {
                ApiError::Internal("Công cụ tải video chưa được cài đặt trên máy chủ.".to_string())
            }
            MediaError::FileNotFound(path) => ApiError::Internal(format!(
                "File video không tồn tại sau khi tải: {}",
                path.display()
            )),
            MediaError::Io(e) => ApiError::Internal(format!("Lỗi hệ thống file: {e}")),
        }
    }
}

impl From<GeminiError> for ApiError {
    fn from(err: GeminiError) -> Self {
        match err {
            GeminiError::RejectedByService(detail) => ApiError::Internal(format!(
                "Google từ chối file video. Nguyên nhân có thể: file quá lớn, format không hỗ \
                 trợ, hoặc video quá dài. Chi tiết: {}",
                truncate_diagnostic(&strip_ansi_codes(&detail))
            )),
            GeminiError::ProcessingTimeout { waited_secs } => ApiError::Internal(format!(
                "Google xử lý file quá lâu ({waited_secs}s). Vui lòng thử lại với video ngắn hơn."
            )),
            // Already carries a complete Vietnamese message.
            GeminiError::RateLimited(message) => ApiError::Internal(message),
            GeminiError::ServiceUnavailable(detail)
            | GeminiError::UploadFailed(detail)
            | GeminiError::Api { message: detail, .. } => ApiError::Internal(format!(
                "Dịch vụ AI tạm thời không khả dụng. Chi tiết: {}",
                truncate_diagnostic(&strip_ansi_codes(&detail))
            )),
            GeminiError::Http(e) => ApiError::Internal(format!(
                "Không thể kết nối tới dịch vụ AI. Chi tiết: {}",
                truncate_diagnostic(&e.to_string())
            )),
            GeminiError::Json(e) => ApiError::Internal(format!(
                "Phản hồi từ dịch vụ AI không hợp lệ. Chi tiết: {}",
                truncate_diagnostic(&e.to_string())
            )),
            GeminiError::Io(e) => ApiError::Internal(format!("Lỗi hệ thống file: {e}")),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error = match self {
            ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::BadRequest(msg)
            | ApiError::Internal(msg) => msg,
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_too_large_reports_both_sizes() {
        let err: ApiError = MediaError::PayloadTooLarge {
            size_bytes: 45 * 1024 * 1024 + 512 * 1024,
            limit_bytes: 30 * 1024 * 1024,
        }
        .into();
        match err {
            ApiError::Internal(msg) => {
                assert!(msg.contains("45.5 MB"));
                assert!(msg.contains("30 MB"));
            }
            other => panic!("expected Internal, got {other:?}"),
        }
    }

    #[test]
    fn download_failure_strips_ansi_codes() {
        let err: ApiError = MediaError::download_failed("\x1b[31mERROR:\x1b[0m private video").into();
        match err {
            ApiError::Internal(msg) => {
                assert!(!msg.contains('\x1b'));
                assert!(msg.contains("private video"));
            }
            other => panic!("expected Internal, got {other:?}"),
        }
    }

    #[test]
    fn rate_limited_message_passes_through() {
        let err: ApiError = GeminiError::RateLimited("Hệ thống đang quá tải".to_string()).into();
        match err {
            ApiError::Internal(msg) => assert_eq!(msg, "Hệ thống đang quá tải"),
            other => panic!("expected Internal, got {other:?}"),
        }
    }

    #[test]
    fn rejection_detail_is_truncated() {
        let err: ApiError = GeminiError::rejected("x".repeat(500)).into();
        match err {
            ApiError::Internal(msg) => assert!(msg.len() < 500),
            other => panic!("expected Internal, got {other:?}"),
        }
    }
}
