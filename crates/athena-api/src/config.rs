//! API configuration.

use std::path::PathBuf;

/// Default size ceiling for downloaded videos, in megabytes.
const DEFAULT_MAX_VIDEO_MB: u64 = 30;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// CORS origins
    pub cors_origins: Vec<String>,
    /// Max request body size
    pub max_body_size: usize,
    /// Environment (development/production)
    pub environment: String,
    /// Directory for downloaded video files
    pub work_dir: PathBuf,
    /// Size ceiling for downloaded videos in bytes; `None` disables the check
    pub max_video_bytes: Option<u64>,
    /// User ids denied access to the API
    pub blocked_user_ids: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: vec!["*".to_string()],
            max_body_size: 1024 * 1024, // 1MB, requests carry only URLs and text
            environment: "development".to_string(),
            work_dir: std::env::temp_dir(),
            max_video_bytes: Some(DEFAULT_MAX_VIDEO_MB * 1024 * 1024),
            blocked_user_ids: Vec::new(),
        }
    }
}

impl ApiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let max_video_mb = std::env::var("MAX_VIDEO_MB")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_MAX_VIDEO_MB);

        Self {
            host: std::env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("API_PORT")
                .or_else(|_| std::env::var("PORT"))
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8000),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_else(|_| vec!["*".to_string()]),
            max_body_size: std::env::var("MAX_BODY_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1024 * 1024),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            work_dir: std::env::var("WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| std::env::temp_dir()),
            // MAX_VIDEO_MB=0 disables the size check entirely
            max_video_bytes: (max_video_mb > 0).then(|| max_video_mb * 1024 * 1024),
            blocked_user_ids: std::env::var("BLOCKED_USER_IDS")
                .map(|s| {
                    s.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        }
    }

    /// Check if running in production mode.
    pub fn is_production(&self) -> bool {
        self.environment.to_lowercase() == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_size_ceiling_is_30mb() {
        let config = ApiConfig::default();
        assert_eq!(config.max_video_bytes, Some(30 * 1024 * 1024));
    }
}
