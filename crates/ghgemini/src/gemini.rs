use crate::config::GeminiConfig;
use crate::prelude::*;
use ghgemini_core::gemini::{interpret_response, GenerateContentRequest, GenerationOutcome};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};

/// Thin client for the Gemini `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| eyre!("Failed to build HTTP client: {}", e))?;

        Ok(Self { http, config })
    }

    /// Send `prompt` as the only content part and interpret the answer.
    ///
    /// Non-success statuses come back as [`GenerationOutcome::ApiError`];
    /// only transport failures and malformed success bodies are errors.
    pub async fn generate(&self, prompt: &str) -> Result<GenerationOutcome, Error> {
        debug!("Sending prompt of {} bytes to {}", prompt.len(), self.config.model);

        let response = self
            .http
            .post(self.config.endpoint())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await
            .map_err(|e| Error::Generation(format!("request failed: {e}")))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Generation(format!("failed to read response body: {e}")))?;

        info!("Gemini answered with HTTP {status}");

        interpret_response(status, body).map_err(|e| Error::Generation(e.to_string()))
    }
}
