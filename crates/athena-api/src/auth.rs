//! Bearer-token authentication.
//!
//! The API trusts an upstream identity layer: the Authorization header
//! carries an opaque user id as a bearer token. This extractor enforces
//! presence (401) and the configured blocklist (403); it does not verify
//! the token cryptographically.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated user extracted from the Authorization header.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Opaque user id
    pub id: String,
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                ApiError::unauthorized("Phiên đăng nhập đã hết hạn. Vui lòng đăng nhập lại.")
            })?;

        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                ApiError::unauthorized("Phiên đăng nhập đã hết hạn. Vui lòng đăng nhập lại.")
            })?;

        if state.config.blocked_user_ids.iter().any(|b| b == token) {
            return Err(ApiError::forbidden(
                "Tài khoản của bạn đã bị khóa. Vui lòng liên hệ quản trị viên.",
            ));
        }

        Ok(AuthUser {
            id: token.to_string(),
        })
    }
}
