//! Request and response DTOs for the HTTP surface.

use serde::{Deserialize, Serialize};

use crate::mode::ScriptMode;

/// Body of `POST /analyze`.
///
/// `url` stays optional so a missing field can be reported as a 400 with a
/// user-facing message instead of a deserialization rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    pub url: Option<String>,
    #[serde(default)]
    pub mode: ScriptMode,
}

/// Body of a successful `POST /analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub script: String,
}

/// Body of `POST /api/translate`.
#[derive(Debug, Clone, Deserialize)]
pub struct TranslateRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_target_language")]
    pub target_language: String,
    #[serde(default = "default_language_name")]
    pub language_name: String,
}

fn default_target_language() -> String {
    "en".to_string()
}

fn default_language_name() -> String {
    "English".to_string()
}

/// Body of a successful `POST /api/translate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub translated_text: String,
    pub target_language: String,
    pub language_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_request_mode_defaults() {
        let req: AnalyzeRequest =
            serde_json::from_str(r#"{"url": "https://www.tiktok.com/@x/video/123"}"#).unwrap();
        assert_eq!(req.mode, ScriptMode::Detailed);
        assert!(req.url.is_some());
    }

    #[test]
    fn test_analyze_request_missing_url_deserializes() {
        let req: AnalyzeRequest = serde_json::from_str(r#"{"mode": "transcript"}"#).unwrap();
        assert!(req.url.is_none());
        assert_eq!(req.mode, ScriptMode::Transcript);
    }

    #[test]
    fn test_translate_request_defaults() {
        let req: TranslateRequest = serde_json::from_str(r#"{"text": "xin chào"}"#).unwrap();
        assert_eq!(req.target_language, "en");
        assert_eq!(req.language_name, "English");
    }
}
