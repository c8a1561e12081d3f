use crate::prelude::*;
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    routing::post,
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use super::{JsonRpcResponse, ServerState};

pub fn router(state: Arc<ServerState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/mcp", post(mcp_handler))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .with_state(state)
}

pub async fn run_http(options: super::cli::HttpOptions, state: ServerState) -> Result<()> {
    let addr = format!("{}:{}", options.host, options.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {}: {}", addr, e))?;

    info!("MCP server listening on http://{}/mcp", addr);

    axum::serve(listener, router(Arc::new(state)))
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    Ok(())
}

// The body is taken as raw bytes so malformed JSON and invalid UTF-8 still get
// a JSON-RPC answer. Documents are not size limited.
async fn mcp_handler(State(state): State<Arc<ServerState>>, body: Bytes) -> Json<JsonRpcResponse> {
    Json(super::handle_request(&body, &state).await)
}

#[cfg(test)]
mod tests {
    use crate::mcp::test_support::{state, RecordingFetcher};
    use super::*;
    use serde_json::json;

    async fn serve() -> String {
        let state = state("http://127.0.0.1:1", RecordingFetcher::default());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, router(Arc::new(state))).await.unwrap();
        });

        format!("http://{addr}/mcp")
    }

    #[tokio::test]
    async fn test_post_tools_list() {
        let url = serve().await;

        let response = reqwest::Client::new()
            .post(&url)
            .json(&json!({"jsonrpc": "2.0", "id": "a", "method": "tools/list"}))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["id"], "a");
        assert_eq!(body["result"]["tools"][0]["name"], "gh.process_code_with_gemini");
    }

    #[tokio::test]
    async fn test_malformed_body_still_http_200() {
        let url = serve().await;

        let bodies: [Vec<u8>; 2] = [b"{oops".to_vec(), vec![0xff, 0xfe, b'{']];
        for body in bodies {
            let response = reqwest::Client::new()
                .post(&url)
                .header("content-type", "application/json")
                .body(body)
                .send()
                .await
                .unwrap();

            assert_eq!(response.status(), 200);
            let body: serde_json::Value = response.json().await.unwrap();
            assert_eq!(body["id"], serde_json::Value::Null);
            assert_eq!(body["error"]["code"], -32700);
        }
    }

    #[tokio::test]
    async fn test_large_document_is_accepted() {
        let url = serve().await;
        let content = "x".repeat(3 * 1024 * 1024);

        let response = reqwest::Client::new()
            .post(&url)
            .json(&json!({
                "jsonrpc": "2.0",
                "id": "big",
                "method": "tools/call",
                "params": {
                    "name": "gh.process_code_with_gemini",
                    "arguments": {
                        "find_text": "x",
                        "replace_text": "y",
                        "chatContext": {
                            "repository": {"name": "acme/widgets"},
                            "activeDocument": {"uri": "file:///src/app.py", "content": content},
                            "messages": [{"content": "review"}]
                        }
                    }
                }
            }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["jsonrpc"], "2.0");
        assert_eq!(body["id"], "big");
        // The stubbed Gemini address is unreachable, so the pipeline gets as
        // far as generation.
        assert_eq!(body["error"]["data"]["step"], "generate");
    }
}
