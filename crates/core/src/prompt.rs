use crate::context::ToolInvocation;

/// Build the review prompt sent to the model.
///
/// Embeds the user's last message, the repository coordinates and the file
/// content after find/replace.
pub fn build_prompt(invocation: &ToolInvocation, updated_content: &str) -> String {
    format!(
        "
User request: {user_message}

Repository: {repository}, Branch: {branch}
File: {file_path}

Modified content (after find/replace):
{updated_content}

Please analyze and suggest improvements.
",
        user_message = invocation.user_message,
        repository = invocation.repository,
        branch = invocation.branch,
        file_path = invocation.file_path,
    )
}
