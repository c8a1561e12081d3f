use crate::prelude::*;
use crate::working_copy::WorkingCopy;
use ghgemini_core::gemini::GenerationOutcome;
use ghgemini_core::repo::clone_url;
use ghgemini_core::{build_prompt, find_replace, CallArguments, ToolInvocation};
use std::sync::Arc;

use super::{CallToolResult, Content, JsonRpcError, ServerState};

pub async fn handle_process_code_with_gemini(
    arguments: Option<serde_json::Value>,
    state: &ServerState,
) -> Result<serde_json::Value, JsonRpcError> {
    let args: CallArguments = serde_json::from_value(arguments.unwrap_or(serde_json::Value::Null))
        .map_err(|e| Error::InvalidArguments(e.to_string()))?;
    let invocation =
        ToolInvocation::from_arguments(args).map_err(|e| Error::InvalidArguments(e.to_string()))?;

    info!(
        "Calling gh.process_code_with_gemini: repository={}, branch={}, file={}",
        invocation.repository, invocation.branch, invocation.file_path
    );

    let outcome = process(&invocation, state).await?;

    let result = CallToolResult {
        content: vec![Content::Text {
            text: outcome.display_text(),
        }],
        is_error: outcome.is_error().then_some(true),
    };

    serde_json::to_value(result).map_err(|e| JsonRpcError {
        code: -32603,
        message: format!("Internal error: {e}"),
        data: None,
    })
}

/// Clone, edit, write and ask Gemini, in that order.
///
/// The working copy lives as long as this call, or until an in-flight fetch
/// finishes when the call is cancelled.
async fn process(
    invocation: &ToolInvocation,
    state: &ServerState,
) -> Result<GenerationOutcome, Error> {
    let working_copy = WorkingCopy::create()?;
    let url = clone_url(&state.repo.host, &invocation.repository);

    info!("Cloning {url} ({}) into {}", invocation.branch, working_copy.path().display());

    let fetcher = Arc::clone(&state.fetcher);
    let branch = invocation.branch.clone();
    let fetch_url = url.clone();

    // git blocks, keep it off the async workers. The blocking task owns the
    // working copy until the fetch returns, so a cancelled request cannot
    // remove the directory out from under git or leave it behind.
    let (working_copy, fetched) = tokio::task::spawn_blocking(move || {
        let fetched = fetcher.fetch(&fetch_url, &branch, working_copy.path());
        (working_copy, fetched)
    })
    .await
    .map_err(|e| Error::Clone {
        url,
        branch: invocation.branch.clone(),
        detail: format!("task join error: {e}"),
    })?;
    fetched?;

    let updated_content = find_replace(
        &invocation.content,
        &invocation.find_text,
        &invocation.replace_text,
    );
    working_copy
        .write_file(&invocation.file_path, &updated_content)
        .await?;

    let prompt = build_prompt(invocation, &updated_content);
    let outcome = state.gemini.generate(&prompt).await?;

    working_copy.close();

    Ok(outcome)
}
