use crate::prelude::*;
use ghgemini_core::repo::clone_args;
use std::path::Path;
use std::process::{Command, Stdio};

/// Fetches a repository branch into a local directory.
///
/// Implementations block until the fetch completes; callers run them on a
/// blocking thread.
pub trait RepoFetcher: Send + Sync {
    fn fetch(&self, url: &str, branch: &str, dest: &Path) -> Result<(), Error>;
}

/// Clones with the `git` command line client.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
}

impl GitCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl RepoFetcher for GitCli {
    fn fetch(&self, url: &str, branch: &str, dest: &Path) -> Result<(), Error> {
        let clone_error = |detail: String| Error::Clone {
            url: url.to_string(),
            branch: branch.to_string(),
            detail,
        };

        let output = Command::new(&self.program)
            .args(clone_args(url, branch, dest))
            // Never wait on a credential prompt.
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .output()
            .map_err(|e| clone_error(format!("failed to run {}: {e}", self.program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(clone_error(format!("{}: {}", output.status, stderr.trim())));
        }

        debug!("Cloned {url} ({branch}) into {}", dest.display());
        Ok(())
    }
}
