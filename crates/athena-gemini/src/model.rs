//! Startup model selection.
//!
//! The credential may or may not be authorized for any given model, so the
//! concrete choice is resolved once at startup from enumeration and cached
//! by the caller. Preview/experimental/oversized variants are skipped: the
//! free-tier quota on those is too low for per-request video work.

use tracing::{info, warn};

use crate::client::{GeminiClient, ModelInfo};

/// Hardcoded fallback when enumeration fails or yields nothing usable.
pub const DEFAULT_MODEL: &str = "models/gemini-1.5-flash";

/// Name fragments that disqualify a model.
const EXCLUDED_PATTERNS: [&str; 4] = ["2.5", "latest", "preview", "exp"];

/// Preference order, lightweight first.
const PREFERRED: [&str; 3] = ["gemini-1.5-flash", "gemini-1.5-pro", "gemini-pro"];

/// Pick the best model from an enumeration result.
///
/// Only models supporting `generateContent` are considered. Excluded name
/// patterns are dropped before preference matching; when no preferred name
/// survives, the first generation-capable model is used as-is.
pub fn choose_model(models: &[ModelInfo]) -> Option<String> {
    let capable: Vec<&ModelInfo> = models
        .iter()
        .filter(|m| {
            m.supported_generation_methods
                .iter()
                .any(|method| method == "generateContent")
        })
        .collect();

    let filtered: Vec<&&ModelInfo> = capable
        .iter()
        .filter(|m| {
            let lower = m.name.to_lowercase();
            !EXCLUDED_PATTERNS.iter().any(|p| lower.contains(p))
        })
        .collect();

    for preferred in PREFERRED {
        if let Some(m) = filtered.iter().find(|m| m.name.contains(preferred)) {
            return Some(m.name.clone());
        }
    }

    capable.first().map(|m| m.name.clone())
}

/// Resolve the process-wide model choice. Never fails: enumeration errors
/// fall back to [`DEFAULT_MODEL`].
pub async fn resolve_model(client: &GeminiClient) -> String {
    match client.list_models().await {
        Ok(models) => match choose_model(&models) {
            Some(name) => {
                info!(model = %name, "Resolved generation model");
                name
            }
            None => {
                warn!("No usable model in enumeration, using default");
                DEFAULT_MODEL.to_string()
            }
        },
        Err(e) => {
            warn!(error = %e, "Model enumeration failed, using default");
            DEFAULT_MODEL.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(name: &str, methods: &[&str]) -> ModelInfo {
        ModelInfo {
            name: name.to_string(),
            supported_generation_methods: methods.iter().map(|m| m.to_string()).collect(),
        }
    }

    #[test]
    fn test_prefers_lightweight_flash() {
        let models = [
            model("models/gemini-1.5-pro", &["generateContent"]),
            model("models/gemini-1.5-flash", &["generateContent"]),
        ];
        assert_eq!(
            choose_model(&models).as_deref(),
            Some("models/gemini-1.5-flash")
        );
    }

    #[test]
    fn test_excludes_preview_and_oversized_variants() {
        let models = [
            model("models/gemini-2.5-pro", &["generateContent"]),
            model("models/gemini-1.5-flash-preview", &["generateContent"]),
            model("models/gemini-pro-latest", &["generateContent"]),
            model("models/gemini-exp-1206", &["generateContent"]),
            model("models/gemini-1.5-pro", &["generateContent"]),
        ];
        assert_eq!(
            choose_model(&models).as_deref(),
            Some("models/gemini-1.5-pro")
        );
    }

    #[test]
    fn test_ignores_models_without_generate_content() {
        let models = [
            model("models/gemini-1.5-flash", &["embedContent"]),
            model("models/gemini-pro", &["generateContent"]),
        ];
        assert_eq!(choose_model(&models).as_deref(), Some("models/gemini-pro"));
    }

    #[test]
    fn test_falls_back_to_first_capable_model() {
        let models = [
            model("models/gemini-2.5-flash", &["generateContent"]),
            model("models/gemini-2.5-pro", &["generateContent"]),
        ];
        // Everything is excluded by pattern, so the first capable one wins.
        assert_eq!(
            choose_model(&models).as_deref(),
            Some("models/gemini-2.5-flash")
        );
    }

    #[test]
    fn test_empty_enumeration_yields_none() {
        assert_eq!(choose_model(&[]), None);
    }
}
