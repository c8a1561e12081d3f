mod process_code;

use crate::prelude::*;
use serde::{Deserialize, Serialize};

// Re-export types needed by tool handlers
pub use super::{JsonRpcError, ServerState, Tool};

pub const PROCESS_CODE_WITH_GEMINI: &str = "gh.process_code_with_gemini";

/// Tools this server knows how to call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolName {
    ProcessCodeWithGemini,
    Unknown(String),
}

impl From<String> for ToolName {
    fn from(name: String) -> Self {
        match name.as_str() {
            PROCESS_CODE_WITH_GEMINI => ToolName::ProcessCodeWithGemini,
            _ => ToolName::Unknown(name),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ToolsList {
    pub tools: Vec<Tool>,
}

#[derive(Debug, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    pub arguments: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct CallToolResult {
    pub content: Vec<Content>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum Content {
    #[serde(rename = "text")]
    Text { text: String },
}

pub fn handle_tools_list() -> Result<serde_json::Value, JsonRpcError> {
    let tools = vec![Tool {
        name: PROCESS_CODE_WITH_GEMINI.to_string(),
        description: "Clone repo, apply find/replace, send to Gemini for code suggestions"
            .to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "find_text": {"type": "string"},
                "replace_text": {"type": "string"},
                "chatContext": {"type": "object"}
            },
            "required": ["find_text", "replace_text", "chatContext"]
        }),
    }];

    let result = ToolsList { tools };

    serde_json::to_value(result).map_err(|e| JsonRpcError {
        code: -32603,
        message: format!("Internal error: {e}"),
        data: None,
    })
}

pub async fn handle_tools_call(
    params: Option<serde_json::Value>,
    state: &ServerState,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: CallToolParams = serde_json::from_value(params.unwrap_or(serde_json::Value::Null))
        .map_err(|e| JsonRpcError {
            code: -32602,
            message: format!("Invalid params: {e}"),
            data: None,
        })?;

    match ToolName::from(params.name) {
        ToolName::ProcessCodeWithGemini => {
            process_code::handle_process_code_with_gemini(params.arguments, state).await
        }
        // Unknown tools answer exactly like unknown methods.
        ToolName::Unknown(name) => {
            warn!("Unknown tool: {name}");
            Err(JsonRpcError::method_not_found())
        }
    }
}
