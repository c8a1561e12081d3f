use crate::prelude::*;

/// Gemini endpoint configuration, passed explicitly to [`crate::gemini::GeminiClient`].
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub api_version: String,
    pub model: String,
}

impl GeminiConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com";
    pub const DEFAULT_API_VERSION: &'static str = "v1";
    pub const DEFAULT_MODEL: &'static str = "gemini-pro";

    /// Build the configuration from global CLI options.
    ///
    /// A missing API key is tolerated: requests are still sent, with an empty
    /// key, and the API's rejection is relayed to the caller.
    pub fn from_global(global: &crate::Global) -> Self {
        let api_key = global.gemini_api_key.clone().unwrap_or_else(|| {
            warn!("GEMINI_API_KEY is not set, Gemini requests will be rejected");
            String::new()
        });

        Self {
            api_key,
            base_url: global.gemini_base_url.clone(),
            api_version: global.gemini_api_version.clone(),
            model: global.gemini_model.clone(),
        }
    }

    /// `{base_url}/{api_version}/models/{model}:generateContent`
    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.api_version,
            self.model
        )
    }
}

/// Where and how repositories are cloned.
#[derive(Debug, Clone)]
pub struct RepoConfig {
    pub host: String,
    pub git_bin: String,
}

impl RepoConfig {
    pub const DEFAULT_HOST: &'static str = "https://github.com";

    pub fn from_global(global: &crate::Global) -> Self {
        Self {
            host: global.git_host.clone(),
            git_bin: global.git_bin.clone(),
        }
    }
}
