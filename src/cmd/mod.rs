pub mod auth;
pub mod create;
pub mod delete;
pub mod from_dir;
pub mod list;
pub mod quick;
pub mod update;

use std::io::{self, Write};

use anyhow::{Context, Result, bail};

use crate::client::GistClient;
use crate::util::resolve_token;

/// Output format shared by every subcommand that prints results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Build an authenticated client or bail with a setup hint.
pub fn authenticated_client() -> Result<GistClient> {
    let Some(token) = resolve_token() else {
        bail!(
            "no personal access token found; run 'gist auth', set GITHUB_TOKEN, \
             or put {{\"github_token\": \"...\"}} in ./config.json"
        );
    };
    Ok(GistClient::new(token)?)
}

/// y/N prompt on stdin. Anything but an explicit yes declines.
pub fn confirm(prompt: &str) -> Result<bool> {
    let answer = prompt_line(&format!("{prompt} [y/N] "))?;
    Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
}

pub fn prompt_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush().context("failed to flush stdout")?;
    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("failed to read confirmation")?;
    Ok(line.trim().to_string())
}
