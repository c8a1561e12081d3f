//! Chat context model and tool argument extraction
//!
//! The chat client sends its whole editor state as `chatContext`. This module
//! holds the wire shape of that object and flattens it into a
//! [`ToolInvocation`], the only thing the rest of the pipeline looks at.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Branch used when the chat context does not name one.
pub const DEFAULT_BRANCH: &str = "main";

const FILE_URI_PREFIX: &str = "file://";

/// Errors produced while validating tool arguments.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ContextError {
    #[error("chatContext.messages must contain at least one message")]
    EmptyMessages,

    #[error("repository name must look like 'owner/repo', got '{0}'")]
    InvalidRepository(String),
}

/// Arguments of the `gh.process_code_with_gemini` tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallArguments {
    pub find_text: String,
    pub replace_text: String,
    #[serde(rename = "chatContext")]
    pub chat_context: ChatContext,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatContext {
    pub repository: Repository,
    #[serde(rename = "activeDocument")]
    pub active_document: ActiveDocument,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    /// `owner/repo`
    pub name: String,
    #[serde(default)]
    pub branch: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveDocument {
    /// `file://` URI of the document open in the editor.
    pub uri: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub content: String,
}

/// Flattened, validated form of [`CallArguments`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub repository: String,
    pub branch: String,
    /// Document path with the `file://` scheme removed.
    pub file_path: String,
    pub content: String,
    /// Content of the last chat message.
    pub user_message: String,
    pub find_text: String,
    pub replace_text: String,
}

impl ToolInvocation {
    /// Validate tool arguments and pull out the fields the pipeline needs.
    pub fn from_arguments(args: CallArguments) -> Result<Self, ContextError> {
        let CallArguments {
            find_text,
            replace_text,
            chat_context,
        } = args;

        validate_repository_name(&chat_context.repository.name)?;

        let user_message = chat_context
            .messages
            .into_iter()
            .last()
            .map(|message| message.content)
            .ok_or(ContextError::EmptyMessages)?;

        Ok(Self {
            repository: chat_context.repository.name,
            branch: chat_context
                .repository
                .branch
                .unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
            file_path: strip_file_uri(&chat_context.active_document.uri),
            content: chat_context.active_document.content,
            user_message,
            find_text,
            replace_text,
        })
    }
}

/// Remove the literal `file://` scheme from a document URI.
///
/// Every occurrence is removed, not only a leading one.
pub fn strip_file_uri(uri: &str) -> String {
    uri.replace(FILE_URI_PREFIX, "")
}

fn repository_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^/\s]+/[^/\s]+$").expect("valid regex"))
}

fn validate_repository_name(name: &str) -> Result<(), ContextError> {
    if repository_pattern().is_match(name) {
        Ok(())
    } else {
        Err(ContextError::InvalidRepository(name.to_string()))
    }
}
