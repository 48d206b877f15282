use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use crate::cmd::{OutputFormat, authenticated_client, create::print_created};
use crate::collect::collect_directory;
use crate::util::{color_enabled_stdout, sym_gear};

pub fn handle_from_dir(
    directory: PathBuf,
    patterns: Vec<String>,
    description: Option<String>,
    public: bool,
    output: OutputFormat,
) -> Result<()> {
    let client = authenticated_client()?;

    let ce = color_enabled_stdout();
    if output == OutputFormat::Text {
        println!(
            "{} Scanning {} for {}...",
            sym_gear(ce),
            directory.display(),
            patterns.join(", ")
        );
    }
    let files_data = collect_directory(&directory, &patterns)?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner} Creating gist...").unwrap());
    pb.enable_steady_tick(Duration::from_millis(80));

    let result = client.create(&files_data, description.as_deref().unwrap_or(""), public);
    pb.finish_and_clear();
    let snapshot = result.context("failed to create gist from directory")?;

    print_created(&snapshot, description.as_deref(), public, output)
}
