use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use crate::client::GistSnapshot;
use crate::cmd::{OutputFormat, authenticated_client};
use crate::collect::read_files;
use crate::util::{color_enabled_stdout, sym_check};

pub fn handle_create(
    files: Vec<PathBuf>,
    description: Option<String>,
    public: bool,
    output: OutputFormat,
) -> Result<()> {
    let client = authenticated_client()?;
    let files_data = read_files(&files)?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner} Creating gist...").unwrap());
    pb.enable_steady_tick(Duration::from_millis(80));

    let result = client.create(&files_data, description.as_deref().unwrap_or(""), public);
    pb.finish_and_clear();
    let snapshot = result.context("failed to create gist")?;

    print_created(&snapshot, description.as_deref(), public, output)
}

pub fn print_created(
    snapshot: &GistSnapshot,
    description: Option<&str>,
    public: bool,
    output: OutputFormat,
) -> Result<()> {
    match output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(snapshot)?);
        }
        OutputFormat::Text => {
            let ce = color_enabled_stdout();
            println!("{} Gist created successfully!", sym_check(ce));
            println!("  URL: {}", snapshot.html_url);
            if let Some(desc) = description.filter(|d| !d.is_empty()) {
                println!("  Description: {desc}");
            }
            println!("  Public: {}", if public { "yes" } else { "no" });
            println!(
                "  Files: {}",
                snapshot.files.keys().cloned().collect::<Vec<_>>().join(", ")
            );
        }
    }
    Ok(())
}
