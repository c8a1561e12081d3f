/// Failures of the `gh.process_code_with_gemini` pipeline, one per step.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Failed to create working copy: {0}")]
    WorkingCopy(String),

    #[error("Failed to clone {url} at branch '{branch}': {detail}")]
    Clone {
        url: String,
        branch: String,
        detail: String,
    },

    #[error("Failed to write {path}: {detail}")]
    Write { path: String, detail: String },

    #[error("Gemini request failed: {0}")]
    Generation(String),
}

impl Error {
    /// JSON-RPC error code reported for this failure.
    pub fn code(&self) -> i32 {
        match self {
            Error::InvalidArguments(_) => -32602,
            Error::WorkingCopy(_)
            | Error::Clone { .. }
            | Error::Write { .. }
            | Error::Generation(_) => -32603,
        }
    }

    /// Name of the step that failed, reported as `error.data.step`.
    pub fn step(&self) -> &'static str {
        match self {
            Error::InvalidArguments(_) => "arguments",
            Error::WorkingCopy(_) => "workdir",
            Error::Clone { .. } => "clone",
            Error::Write { .. } => "write",
            Error::Generation(_) => "generate",
        }
    }
}
