use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;

use crate::client::BatchDeleteReport;
use crate::cmd::{OutputFormat, authenticated_client, confirm, prompt_line};
use crate::util::{color_enabled_stdout, sym_check, sym_cross, sym_question};

pub fn handle_delete(
    ids: Vec<String>,
    from_file: Option<PathBuf>,
    force: bool,
    dry_run: bool,
    quiet: bool,
    output: OutputFormat,
) -> Result<()> {
    let mut all_ids = ids;
    if let Some(path) = from_file {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        all_ids.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string),
        );
    }
    if all_ids.is_empty() {
        bail!("no gist ids specified");
    }

    if dry_run {
        return print_dry_run(&all_ids, output);
    }

    let ce = color_enabled_stdout();
    if !force && !quiet {
        println!(
            "{} WARNING: this will permanently delete {} and cannot be undone.",
            sym_question(ce),
            if all_ids.len() == 1 {
                "the gist".to_string()
            } else {
                format!("{} gists", all_ids.len())
            }
        );
        for (i, id) in all_ids.iter().enumerate() {
            println!("  {}. {id}", i + 1);
        }
        let confirmed = if all_ids.len() == 1 {
            confirm("Delete this gist?")?
        } else {
            prompt_line("Type 'DELETE ALL' to confirm: ")? == "DELETE ALL"
        };
        if !confirmed {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    let client = authenticated_client()?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner} Deleting...").unwrap());
    pb.enable_steady_tick(Duration::from_millis(80));
    let report = client.delete_batch(&all_ids);
    pb.finish_and_clear();

    match output {
        OutputFormat::Json => print_report_json(&report)?,
        OutputFormat::Text => {
            if report.all_succeeded() {
                if !quiet {
                    println!(
                        "{} {} deleted successfully",
                        sym_check(ce),
                        if report.deleted() == 1 {
                            format!("Gist {}", report.outcomes[0].id)
                        } else {
                            format!("All {} gists", report.deleted())
                        }
                    );
                }
            } else {
                if !quiet {
                    println!("{} Deletion finished with errors:", sym_cross(ce));
                    println!("  deleted: {}", report.deleted());
                    println!("  failed:  {}", report.failed());
                }
                for outcome in &report.outcomes {
                    if let Some(err) = &outcome.error {
                        eprintln!("  {}: {err}", outcome.id);
                    }
                }
            }
        }
    }

    if !report.all_succeeded() {
        bail!("{} of {} deletes failed", report.failed(), report.outcomes.len());
    }
    Ok(())
}

fn print_dry_run(ids: &[String], output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Json => {
            let value = json!({
                "operation": "delete",
                "dry_run": true,
                "gists": ids,
                "total": ids.len(),
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text => {
            println!("DRY RUN: would delete {} gist(s)", ids.len());
            for (i, id) in ids.iter().enumerate() {
                println!("  {}. {id}", i + 1);
            }
        }
    }
    Ok(())
}

fn print_report_json(report: &BatchDeleteReport) -> Result<()> {
    let gists: Vec<serde_json::Value> = report
        .outcomes
        .iter()
        .map(|o| match &o.error {
            None => json!({ "gist_id": o.id, "deleted": true }),
            Some(err) => json!({ "gist_id": o.id, "deleted": false, "error": err.to_string() }),
        })
        .collect();
    let value = json!({
        "operation": "delete",
        "success": report.all_succeeded(),
        "summary": { "deleted": report.deleted(), "failed": report.failed() },
        "gists": gists,
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
