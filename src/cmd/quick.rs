use std::io::{self, Read};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::cmd::authenticated_client;
use crate::diff::FileSet;

/// Pipe stdin straight into a secret gist.
pub fn handle_quick(filename: String, description: Option<String>) -> Result<()> {
    let mut content = String::new();
    io::stdin()
        .read_to_string(&mut content)
        .context("failed to read content from stdin")?;
    let content = content.trim().to_string();
    if content.is_empty() {
        bail!("no content provided via stdin");
    }

    let client = authenticated_client()?;
    let description = description.unwrap_or_else(|| format!("Quick gist: {filename}"));
    let mut files = FileSet::new();
    files.insert(filename.clone(), content);

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner} Creating gist...").unwrap());
    pb.enable_steady_tick(Duration::from_millis(80));

    let result = client.create(&files, &description, false);
    pb.finish_and_clear();
    let snapshot = result.context("failed to create quick gist")?;

    println!("{} Quick gist created", "✔".green().bold());
    println!("  URL: {}", snapshot.html_url);
    println!("  Filename: {filename}");
    Ok(())
}
