mod cli;
mod http;
mod stdio;
#[cfg(test)]
mod test_support;
mod tools;

pub use cli::App;

use crate::config::{GeminiConfig, RepoConfig};
use crate::gemini::GeminiClient;
use crate::git::{GitCli, RepoFetcher};
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// JSON-RPC 2.0 types
#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    #[serde(default)]
    id: Option<serde_json::Value>,
    #[serde(default)]
    method: Option<serde_json::Value>,
    #[serde(default)]
    params: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    jsonrpc: String,
    id: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcError {
    pub fn method_not_found() -> Self {
        Self {
            code: -32601,
            message: "Method not found".to_string(),
            data: None,
        }
    }

    fn parse_error(reason: impl std::fmt::Display) -> Self {
        Self {
            code: -32700,
            message: format!("Parse error: {reason}"),
            data: None,
        }
    }
}

impl From<Error> for JsonRpcError {
    fn from(err: Error) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
            data: Some(serde_json::json!({ "step": err.step() })),
        }
    }
}

// MCP Protocol types
#[derive(Debug, Serialize)]
pub struct Tool {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

/// Everything a request needs, built once at startup and shared read-only.
pub struct ServerState {
    pub gemini: GeminiClient,
    pub fetcher: Arc<dyn RepoFetcher>,
    pub repo: RepoConfig,
}

impl ServerState {
    pub fn from_global(global: &crate::Global) -> Result<Self> {
        let repo = RepoConfig::from_global(global);

        Ok(Self {
            gemini: GeminiClient::new(GeminiConfig::from_global(global))?,
            fetcher: Arc::new(GitCli::new(repo.git_bin.clone())),
            repo,
        })
    }
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let state = ServerState::from_global(&global)?;

    match app.command {
        cli::Commands::Stdio => stdio::run_stdio(state).await,
        cli::Commands::Http(options) => http::run_http(options, state).await,
    }
}

/// Answer one raw request body. Bytes that are not UTF-8 or not JSON are a
/// parse error, never a transport failure.
pub async fn handle_request(body: &[u8], state: &ServerState) -> JsonRpcResponse {
    let request = match parse_request(body) {
        Ok(req) => req,
        Err(error) => {
            return JsonRpcResponse {
                jsonrpc: "2.0".to_string(),
                id: None,
                result: None,
                error: Some(error),
            };
        }
    };

    let method = request.method.as_ref().and_then(|m| m.as_str());
    info!("Received {}", method.unwrap_or("<no method>"));

    let result = match method {
        Some("tools/list") => tools::handle_tools_list(),
        Some("tools/call") => tools::handle_tools_call(request.params, state).await,
        _ => Err(JsonRpcError::method_not_found()),
    };

    match result {
        Ok(value) => JsonRpcResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id,
            result: Some(value),
            error: None,
        },
        Err(error) => {
            warn!("Request failed with {}: {}", error.code, error.message);
            JsonRpcResponse {
                jsonrpc: "2.0".to_string(),
                id: request.id,
                result: None,
                error: Some(error),
            }
        }
    }
}

fn parse_request(body: &[u8]) -> Result<JsonRpcRequest, JsonRpcError> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(JsonRpcError::parse_error)?;

    if !value.is_object() {
        return Err(JsonRpcError::parse_error("request must be a JSON object"));
    }

    serde_json::from_value(value).map_err(JsonRpcError::parse_error)
}
