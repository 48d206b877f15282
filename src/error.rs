use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong between a command line and the gist API.
#[derive(Debug, Error)]
pub enum GistError {
    #[error("invalid gist identifier: {0:?}")]
    InvalidIdentifier(String),
    #[error("could not resolve a gist id from {0:?}")]
    UnresolvableIdentifier(String),
    #[error("at least one file is required")]
    EmptyFileSet,
    #[error("nothing to update")]
    NoOpUpdate,
    #[error("gist not found: {0}")]
    NotFound(String),
    #[error("authentication failed; check your personal access token")]
    AuthFailed,
    #[error("rate limit exceeded; try again later")]
    RateLimited,
    #[error("access forbidden: {0}")]
    Forbidden(String),
    #[error("update rejected by the API: {0}")]
    ValidationFailed(String),
    #[error("unexpected API response {status}: {message}")]
    Api { status: u16, message: String },
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("{}: not valid UTF-8 text; only text files can go in a gist", .0.display())]
    Decode(PathBuf),
    #[error("invalid glob pattern {0:?}")]
    BadPattern(String),
    #[error("no files matched {patterns:?} in {}", .dir.display())]
    NoMatchingFiles { dir: PathBuf, patterns: Vec<String> },
}
