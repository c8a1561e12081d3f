use crate::config::{GeminiConfig, RepoConfig};
use crate::gemini::GeminiClient;
use crate::git::RepoFetcher;
use crate::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::ServerState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCall {
    pub url: String,
    pub branch: String,
    pub dest: PathBuf,
}

/// Stands in for `git clone`: records each call and seeds the destination
/// with a few files.
#[derive(Default, Clone)]
pub struct RecordingFetcher {
    pub calls: Arc<Mutex<Vec<FetchCall>>>,
    pub fail_with: Option<String>,
    pub delay: Option<Duration>,
}

impl RecordingFetcher {
    pub fn failing(detail: &str) -> Self {
        Self {
            fail_with: Some(detail.to_string()),
            ..Self::default()
        }
    }

    /// A fetcher that blocks for `delay` before seeding, like a slow clone.
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<FetchCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl RepoFetcher for RecordingFetcher {
    fn fetch(&self, url: &str, branch: &str, dest: &Path) -> Result<(), Error> {
        self.calls.lock().unwrap().push(FetchCall {
            url: url.to_string(),
            branch: branch.to_string(),
            dest: dest.to_path_buf(),
        });

        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }

        if let Some(detail) = &self.fail_with {
            return Err(Error::Clone {
                url: url.to_string(),
                branch: branch.to_string(),
                detail: detail.clone(),
            });
        }

        std::fs::create_dir_all(dest.join("src")).unwrap();
        std::fs::write(dest.join("src/app.py"), "print('from clone')\n").unwrap();
        std::fs::write(dest.join("README.md"), "# widgets\n").unwrap();
        Ok(())
    }
}

pub const GIT_HOST: &str = "https://git.test";

pub fn state(gemini_base_url: &str, fetcher: RecordingFetcher) -> ServerState {
    let gemini = GeminiClient::new(GeminiConfig {
        api_key: "test-key".to_string(),
        base_url: gemini_base_url.to_string(),
        api_version: "v1".to_string(),
        model: "gemini-pro".to_string(),
    })
    .unwrap();

    ServerState {
        gemini,
        fetcher: Arc::new(fetcher),
        repo: RepoConfig {
            host: GIT_HOST.to_string(),
            git_bin: "git".to_string(),
        },
    }
}
