//! Gemini `generateContent` wire types and response interpretation

use serde::{Deserialize, Serialize};

/// Prefix of the text returned to callers when the API answers with a
/// non-success status.
pub const API_ERROR_PREFIX: &str = "Gemini API error: ";

/// Request body: `{"contents":[{"parts":[{"text": ...}]}]}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerateContentRequest {
    pub contents: Vec<RequestContent>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RequestContent {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Part {
    pub text: String,
}

impl GenerateContentRequest {
    /// A request whose only content part is `prompt`.
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![Part {
                    text: prompt.into(),
                }],
            }],
        }
    }
}

/// The subset of the success response we read.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GeminiResponseError {
    #[error("response body is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("response has no candidates")]
    NoCandidates,

    #[error("first candidate has no text part")]
    NoText,
}

/// Result of one generation call that reached the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// HTTP 200 with generated text.
    Text(String),
    /// Any other status, with the raw response body.
    ApiError { status: u16, body: String },
}

impl GenerationOutcome {
    pub fn is_error(&self) -> bool {
        matches!(self, GenerationOutcome::ApiError { .. })
    }

    /// Text shown to the caller.
    ///
    /// API errors keep the historical `"Gemini API error: <body>"` form.
    pub fn display_text(&self) -> String {
        match self {
            GenerationOutcome::Text(text) => text.clone(),
            GenerationOutcome::ApiError { body, .. } => format!("{API_ERROR_PREFIX}{body}"),
        }
    }
}

/// Pull the first candidate's first text part out of a success body.
pub fn extract_text(body: &str) -> Result<String, GeminiResponseError> {
    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| GeminiResponseError::InvalidJson(e.to_string()))?;

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(GeminiResponseError::NoCandidates)?;

    candidate
        .content
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .ok_or(GeminiResponseError::NoText)
}

/// Interpret a status code and body returned by the API.
pub fn interpret_response(status: u16, body: String) -> Result<GenerationOutcome, GeminiResponseError> {
    if status == 200 {
        extract_text(&body).map(GenerationOutcome::Text)
    } else {
        Ok(GenerationOutcome::ApiError { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(GenerateContentRequest::from_prompt("hello")).unwrap();
        assert_eq!(body, json!({"contents": [{"parts": [{"text": "hello"}]}]}));
    }

    #[test]
    fn test_extracts_first_candidate_text() {
        let body = r#"{"candidates":[
            {"content":{"parts":[{"text":"OK"},{"text":"ignored"}]}},
            {"content":{"parts":[{"text":"second"}]}}
        ]}"#;
        assert_eq!(extract_text(body).unwrap(), "OK");
    }

    #[test]
    fn test_extra_fields_ignored() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"OK"}],"role":"model"},"finishReason":"STOP"}],"usageMetadata":{}}"#;
        assert_eq!(extract_text(body).unwrap(), "OK");
    }

    #[test]
    fn test_malformed_bodies() {
        assert!(matches!(
            extract_text("not json"),
            Err(GeminiResponseError::InvalidJson(_))
        ));
        assert_eq!(extract_text("{}"), Err(GeminiResponseError::NoCandidates));
        assert_eq!(
            extract_text(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#),
            Err(GeminiResponseError::NoText)
        );
        assert_eq!(
            extract_text(r#"{"candidates":[{"content":{"parts":[]}}]}"#),
            Err(GeminiResponseError::NoText)
        );
    }

    #[test]
    fn test_non_200_is_api_error() {
        let outcome = interpret_response(503, "overloaded".to_string()).unwrap();
        assert!(outcome.is_error());
        assert_eq!(outcome.display_text(), "Gemini API error: overloaded");
    }

    #[test]
    fn test_200_is_text() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"OK"}]}}]}"#.to_string();
        let outcome = interpret_response(200, body).unwrap();
        assert_eq!(outcome, GenerationOutcome::Text("OK".to_string()));
        assert!(!outcome.is_error());
        assert_eq!(outcome.display_text(), "OK");
    }
}
