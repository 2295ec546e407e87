//! Axum HTTP API server.
//!
//! This crate provides:
//! - the `/analyze` and `/api/translate` endpoints
//! - bearer-token auth with a configurable blocklist
//! - the pipeline orchestrator (download, staging, Gemini, cleanup)
//! - Vietnamese user-facing error mapping

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
