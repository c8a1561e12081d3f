//! Core library for ghgemini
//!
//! This crate implements the **Functional Core** of the ghgemini server,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`ghgemini_core`** (this crate): Pure transformation functions with zero I/O
//! - **`ghgemini`**: The MCP server, git and HTTP I/O (the Imperative Shell)
//!
//! Everything here can be tested with fixture data. The shell owns the
//! working copy, runs `git`, writes files and talks to Gemini; this crate
//! decides what to write, where, and what to send.
//!
//! # Module Organization
//!
//! - [`context`]: Chat context wire types and extraction into a [`context::ToolInvocation`]
//! - [`edit`]: Literal find/replace and target path resolution inside a working copy
//! - [`prompt`]: The review prompt template
//! - [`gemini`]: `generateContent` request/response types and response interpretation
//! - [`repo`]: Clone URL and `git clone` argument construction
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use ghgemini_core::{build_prompt, find_replace, ToolInvocation};
//!
//! let invocation = ToolInvocation::from_arguments(args)?;
//! let updated = find_replace(&invocation.content, &invocation.find_text, &invocation.replace_text);
//! let prompt = build_prompt(&invocation, &updated);
//! ```

pub mod context;
pub mod edit;
pub mod gemini;
pub mod prompt;
pub mod repo;

pub use context::{CallArguments, ContextError, ToolInvocation};
pub use edit::{find_replace, resolve_target_path};
pub use gemini::{GenerateContentRequest, GeminiResponseError, GenerationOutcome};
pub use prompt::build_prompt;
