use std::path::Path;

/// Build the HTTPS clone URL for `owner/repo` on `host`.
///
/// `host` is a base URL such as `https://github.com`; a trailing `/` is ignored.
pub fn clone_url(host: &str, repository: &str) -> String {
    format!("{}/{}.git", host.trim_end_matches('/'), repository)
}

/// Arguments passed to `git` to clone `url` at `branch` into `dest`.
pub fn clone_args(url: &str, branch: &str, dest: &Path) -> Vec<String> {
    vec![
        "clone".to_string(),
        "--branch".to_string(),
        branch.to_string(),
        url.to_string(),
        dest.display().to_string(),
    ]
}
