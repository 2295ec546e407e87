//! Application state.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use athena_gemini::{resolve_model, GeminiClient};
use athena_staging::{StagingClient, StagingConfig};

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub gemini: Arc<GeminiClient>,
    /// Model chosen at startup; individual calls may substitute but never
    /// mutate this choice.
    pub model: Arc<str>,
    pub staging: Option<Arc<StagingClient>>,
}

impl AppState {
    /// Create new application state from the environment.
    ///
    /// Fails fast when `GEMINI_API_KEY` is missing; the staging client is
    /// optional and its absence only disables the FTP round-trip.
    pub async fn new(config: ApiConfig) -> anyhow::Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .context("GEMINI_API_KEY is not set; the server cannot start without it")?;

        let gemini = Arc::new(GeminiClient::new(api_key));
        let model = resolve_model(&gemini).await;
        info!(model = %model, "Selected generation model");

        let staging = match StagingConfig::from_env() {
            Some(staging_config) => {
                info!(host = %staging_config.host, "FTP staging enabled");
                Some(Arc::new(StagingClient::new(staging_config)))
            }
            None => {
                info!("FTP staging disabled (FTP_HOST not set)");
                None
            }
        };

        Ok(Self::with_parts(config, gemini, model, staging))
    }

    /// Assemble state from pre-built components. Used by tests to inject a
    /// client pointed at a mock server.
    pub fn with_parts(
        config: ApiConfig,
        gemini: Arc<GeminiClient>,
        model: String,
        staging: Option<Arc<StagingClient>>,
    ) -> Self {
        Self {
            config,
            gemini,
            model: Arc::from(model),
            staging,
        }
    }
}
