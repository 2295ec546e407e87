//! HTTP client for the Gemini files and generation APIs.

use std::path::Path;

use reqwest::multipart;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GeminiError, GeminiResult};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// All four moderation categories relaxed to "block nothing": ordinary video
/// content trips false-positive refusals otherwise.
const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

/// Gemini API client.
pub struct GeminiClient {
    api_key: String,
    base_url: String,
    http: Client,
}

/// One part of a generation request: either raw text or an uploaded file.
#[derive(Debug, Clone, Serialize)]
pub enum Part {
    #[serde(rename = "text")]
    Text(String),
    #[serde(rename = "fileData", rename_all = "camelCase")]
    FileData { mime_type: String, file_uri: String },
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text(text.into())
    }

    pub fn file(mime_type: impl Into<String>, file_uri: impl Into<String>) -> Self {
        Part::FileData {
            mime_type: mime_type.into(),
            file_uri: file_uri.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "safetySettings")]
    safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

/// Processing state of an uploaded file, as reported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum FileState {
    #[serde(rename = "PROCESSING")]
    Processing,
    #[serde(rename = "ACTIVE")]
    Active,
    #[serde(rename = "FAILED")]
    Failed,
    #[serde(other)]
    Unknown,
}

impl Default for FileState {
    fn default() -> Self {
        FileState::Processing
    }
}

/// An uploaded file as reported by the files API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteFile {
    pub name: String,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub state: FileState,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    file: RemoteFile,
}

#[derive(Debug, Deserialize)]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

/// One entry from model enumeration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub name: String,
    #[serde(default)]
    pub supported_generation_methods: Vec<String>,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    /// Point the client at a different host. Used by tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Enumerate models available to this credential.
    pub async fn list_models(&self) -> GeminiResult<Vec<ModelInfo>> {
        let url = format!("{}/v1beta/models?key={}", self.base_url, self.api_key);
        let response = self.http.get(&url).send().await?;
        let response = Self::check(response).await?;
        let parsed: ListModelsResponse = response.json().await?;
        Ok(parsed.models)
    }

    /// Upload a local video through the media-upload endpoint.
    pub async fn upload_file(&self, path: &Path, display_name: &str) -> GeminiResult<RemoteFile> {
        let url = format!(
            "{}/upload/v1beta/files?key={}",
            self.base_url, self.api_key
        );

        let bytes = tokio::fs::read(path).await?;
        let metadata = serde_json::json!({ "file": { "display_name": display_name } });

        let form = multipart::Form::new()
            .part(
                "metadata",
                multipart::Part::text(metadata.to_string()).mime_str("application/json")?,
            )
            .part(
                "file",
                multipart::Part::bytes(bytes)
                    .file_name(display_name.to_string())
                    .mime_str("video/mp4")?,
            );

        let response = self.http.post(&url).multipart(form).send().await?;
        let response = Self::check(response).await?;
        let parsed: UploadResponse = response.json().await?;

        debug!(name = %parsed.file.name, "Uploaded file to Gemini");
        Ok(parsed.file)
    }

    /// Fetch the current processing state of an uploaded file.
    ///
    /// `name` is the opaque identifier from upload, e.g. `files/abc123`.
    pub async fn get_file(&self, name: &str) -> GeminiResult<RemoteFile> {
        let url = format!("{}/v1beta/{}?key={}", self.base_url, name, self.api_key);
        let response = self.http.get(&url).send().await?;
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    /// Delete an uploaded file.
    pub async fn delete_file(&self, name: &str) -> GeminiResult<()> {
        let url = format!("{}/v1beta/{}?key={}", self.base_url, name, self.api_key);
        let response = self.http.delete(&url).send().await?;
        Self::check(response).await?;
        debug!(name = %name, "Deleted file from Gemini");
        Ok(())
    }

    /// Invoke content generation with moderation relaxed.
    ///
    /// Returns `Ok(None)` when the service replies successfully with no
    /// text; the caller substitutes its placeholder.
    pub async fn generate(&self, model: &str, parts: Vec<Part>) -> GeminiResult<Option<String>> {
        let url = format!(
            "{}/v1beta/{}:generateContent?key={}",
            self.base_url,
            model_path(model),
            self.api_key
        );

        let request = GenerateRequest {
            contents: vec![Content { parts }],
            safety_settings: SAFETY_CATEGORIES
                .iter()
                .map(|category| SafetySetting {
                    category,
                    threshold: "BLOCK_NONE",
                })
                .collect(),
        };

        let response = self.http.post(&url).json(&request).send().await?;
        let response = Self::check(response).await?;
        let parsed: GenerateResponse = response.json().await?;

        let text = parsed
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .filter(|t| !t.is_empty());

        Ok(text)
    }

    /// Convert a non-success response into `GeminiError::Api`.
    async fn check(response: reqwest::Response) -> GeminiResult<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        Err(GeminiError::Api { status, message })
    }
}

/// Normalize a model name to its resource path (`models/<id>`).
fn model_path(model: &str) -> String {
    if model.starts_with("models/") {
        model.to_string()
    } else {
        format!("models/{model}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_path_normalization() {
        assert_eq!(model_path("gemini-1.5-flash"), "models/gemini-1.5-flash");
        assert_eq!(model_path("models/gemini-pro"), "models/gemini-pro");
    }

    #[test]
    fn test_part_serialization() {
        let part = Part::file("video/mp4", "https://files.example/abc");
        let json = serde_json::to_value(&part).unwrap();
        assert_eq!(json["fileData"]["mimeType"], "video/mp4");
        assert_eq!(json["fileData"]["fileUri"], "https://files.example/abc");

        let text = serde_json::to_value(Part::text("hello")).unwrap();
        assert_eq!(text["text"], "hello");
    }

    #[test]
    fn test_file_state_deserialization() {
        let file: RemoteFile = serde_json::from_str(
            r#"{"name": "files/abc", "state": "ACTIVE", "uri": "https://x/files/abc"}"#,
        )
        .unwrap();
        assert_eq!(file.state, FileState::Active);

        let pending: RemoteFile = serde_json::from_str(r#"{"name": "files/abc"}"#).unwrap();
        assert_eq!(pending.state, FileState::Processing);
    }
}
