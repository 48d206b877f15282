use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};

use crate::client::ListQuery;
use crate::cmd::{OutputFormat, authenticated_client};

pub fn handle_list(
    limit: u32,
    page: Option<u32>,
    since: Option<DateTime<Utc>>,
    output: OutputFormat,
) -> Result<()> {
    let client = authenticated_client()?;
    let query = ListQuery {
        per_page: Some(limit),
        page,
        since,
    };

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner} Fetching gists...").unwrap());
    pb.enable_steady_tick(Duration::from_millis(80));
    let result = client.list(&query);
    pb.finish_and_clear();
    let gists = result.context("failed to list gists")?;

    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&gists)?),
        OutputFormat::Text => {
            if gists.is_empty() {
                println!("No gists found.");
                return Ok(());
            }
            for gist in &gists {
                println!(
                    "{}  {:6}  {:2} file(s)  {}",
                    gist.id,
                    if gist.public { "public" } else { "secret" },
                    gist.files.len(),
                    gist.description.as_deref().unwrap_or(""),
                );
            }
        }
    }
    Ok(())
}
