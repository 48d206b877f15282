use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const APP_NAME: &str = "gist-manager";

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    pub github_token: Option<String>,
    /// Base URL override for GitHub Enterprise installs
    #[serde(default)]
    pub api_url: Option<String>,
}

pub fn load_config() -> Result<Config> {
    let cfg: Config = confy::load(APP_NAME, None).context("failed to load config")?;
    Ok(cfg)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    confy::store(APP_NAME, None, cfg).context("failed to save config")?;
    Ok(())
}

fn token_from_env() -> Option<String> {
    std::env::var("GITHUB_TOKEN")
        .ok()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

fn token_from_store() -> Option<String> {
    load_config()
        .ok()
        .and_then(|cfg| cfg.github_token)
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Legacy escape hatch: a `config.json` next to the invocation with a
/// `github_token` key.
fn token_from_local_file() -> Option<String> {
    let path = Path::new("config.json");
    let content = std::fs::read_to_string(path).ok()?;
    let value: serde_json::Value = serde_json::from_str(&content).ok()?;
    value
        .get("github_token")
        .and_then(|t| t.as_str())
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Resolve a personal access token, first source wins.
pub fn resolve_token() -> Option<String> {
    const PROVIDERS: [fn() -> Option<String>; 3] =
        [token_from_env, token_from_store, token_from_local_file];
    PROVIDERS.iter().find_map(|provider| provider())
}

pub fn mask_token(token: &str) -> String {
    if token.len() > 8 {
        format!("{}...", &token[..8])
    } else {
        "...".to_string()
    }
}

use owo_colors::OwoColorize;
use supports_color::Stream;

pub fn color_enabled_stdout() -> bool {
    supports_color::on(Stream::Stdout).is_some()
}

pub fn sym_check(enabled: bool) -> String {
    if enabled { format!("{}", "✔".green().bold()) } else { "✔".to_string() }
}

pub fn sym_cross(enabled: bool) -> String {
    if enabled { format!("{}", "✖".red().bold()) } else { "x".to_string() }
}

pub fn sym_question(enabled: bool) -> String {
    if enabled { format!("{}", "?".cyan().bold()) } else { "?".to_string() }
}

pub fn sym_gear(enabled: bool) -> String {
    if enabled { format!("{}", "⚙".blue().bold()) } else { "⚙".to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn mask_keeps_a_short_prefix() {
        assert_eq!(mask_token("ghp_1234567890abcdef"), "ghp_1234...");
        assert_eq!(mask_token("short"), "...");
    }
}
