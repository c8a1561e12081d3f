use crate::prelude::*;
use clap::Parser;

mod config;
mod error;
mod gemini;
mod git;
mod mcp;
mod prelude;
mod working_copy;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Clone a repository, apply a find/replace to one file and ask Gemini to review it, over MCP"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Gemini API key
    #[clap(long, env = "GEMINI_API_KEY", global = true, hide_env_values = true)]
    gemini_api_key: Option<String>,

    /// Gemini API base URL
    #[clap(
        long,
        env = "GEMINI_BASE_URL",
        global = true,
        default_value = crate::config::GeminiConfig::DEFAULT_BASE_URL
    )]
    gemini_base_url: String,

    /// Gemini API version segment of the endpoint path
    #[clap(
        long,
        env = "GEMINI_API_VERSION",
        global = true,
        default_value = crate::config::GeminiConfig::DEFAULT_API_VERSION
    )]
    gemini_api_version: String,

    /// Gemini model used for review
    #[clap(
        long,
        env = "GEMINI_MODEL",
        global = true,
        default_value = crate::config::GeminiConfig::DEFAULT_MODEL
    )]
    gemini_model: String,

    /// Base URL of the git host repositories are cloned from
    #[clap(
        long,
        env = "GHGEMINI_GIT_HOST",
        global = true,
        default_value = crate::config::RepoConfig::DEFAULT_HOST
    )]
    git_host: String,

    /// git executable
    #[clap(long, env = "GHGEMINI_GIT_BIN", global = true, default_value = "git")]
    git_bin: String,

    /// Whether to display additional information.
    #[clap(long, env = "GHGEMINI_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Model Context Protocol server
    MCP(crate::mcp::App),
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let app = App::parse();

    init_logging(app.global.verbose);
    color_eyre::install()?;

    match app.command {
        SubCommands::MCP(sub_app) => crate::mcp::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
