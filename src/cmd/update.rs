use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use indicatif::{ProgressBar, ProgressStyle};

use crate::client::GistSnapshot;
use crate::cmd::{OutputFormat, authenticated_client, confirm};
use crate::collect::{collect_directory, read_files};
use crate::diff::{UpdateIntent, UpdatePayload, reconcile};
use crate::error::GistError;
use crate::ident::normalize_gist_id;
use crate::util::{color_enabled_stdout, sym_check, sym_gear};

pub struct UpdateArgs {
    pub gist: String,
    pub files: Vec<PathBuf>,
    pub description: Option<String>,
    pub from_dir: Option<PathBuf>,
    pub patterns: Vec<String>,
    pub add: Vec<PathBuf>,
    pub remove: Vec<String>,
    pub sync: bool,
    pub dry_run: bool,
    pub force: bool,
    pub output: OutputFormat,
}

pub fn handle_update(args: UpdateArgs) -> Result<()> {
    let id = normalize_gist_id(&args.gist)?;
    let client = authenticated_client()?;

    if let Some(dir) = &args.from_dir {
        if args.patterns.is_empty() {
            bail!("--patterns is required when using --from-dir");
        }
        if !dir.is_dir() {
            bail!("directory not found: {}", dir.display());
        }
    }

    let mut desired = read_files(&args.files)?;
    desired.extend(read_files(&args.add)?);
    if let Some(dir) = &args.from_dir {
        desired.extend(collect_directory(dir, &args.patterns)?);
    }

    let intent = UpdateIntent {
        description: args.description.clone(),
        files: desired,
        remove: args.remove.iter().cloned().collect(),
        sync: args.sync,
    };

    let ce = color_enabled_stdout();
    let text = args.output == OutputFormat::Text;
    if text {
        println!("{} Analyzing gist {}...", sym_gear(ce), id);
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner} Fetching gist...").unwrap());
    pb.enable_steady_tick(Duration::from_millis(80));
    let fetched = client.fetch(&id);
    pb.finish_and_clear();
    let snapshot = fetched.context("failed to fetch gist")?;

    if text {
        println!(
            "{} Found \"{}\" ({} files)",
            sym_check(ce),
            snapshot.description.as_deref().unwrap_or("no description"),
            snapshot.files.len()
        );
    }

    let reconciled = reconcile(&snapshot.file_contents(), &intent);

    if args.dry_run {
        println!("\nChanges to be made:");
        match reconciled {
            Ok(payload) => {
                for line in change_lines(&snapshot, &payload) {
                    println!("  {line}");
                }
            }
            Err(GistError::NoOpUpdate) => println!("  No changes detected"),
            Err(err) => return Err(err.into()),
        }
        println!("\nDry run complete - no changes made");
        return Ok(());
    }

    let payload = reconciled?;

    if !args.force && !confirm(&format!("Update gist {id}?"))? {
        println!("Update cancelled.");
        return Ok(());
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner} Updating gist...").unwrap());
    pb.enable_steady_tick(Duration::from_millis(80));
    let updated = client.update(&id, &payload);
    pb.finish_and_clear();
    let updated = updated.context("failed to update gist")?;

    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&updated)?),
        OutputFormat::Text => {
            println!("{} Gist updated successfully!", sym_check(ce));
            println!("  URL: {}", updated.html_url);
            if let Some(desc) = updated.description.as_deref().filter(|d| !d.is_empty()) {
                println!("  Description: {desc}");
            }
            println!("  Files: {} total", updated.files.len());
        }
    }
    Ok(())
}

/// Human-readable staging summary, one line per affected file.
fn change_lines(snapshot: &GistSnapshot, payload: &UpdatePayload) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(desc) = &payload.description {
        lines.push(format!("* description: \"{desc}\""));
    }
    for (name, entry) in &payload.files {
        let line = match entry {
            Some(_) if snapshot.files.contains_key(name) => format!("~ {name} (modified)"),
            Some(_) => format!("+ {name} (new file)"),
            None => format!("- {name} (removed)"),
        };
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn snapshot() -> GistSnapshot {
        serde_json::from_value(serde_json::json!({
            "id": "aa5a315d61ae9438b18d",
            "html_url": "https://gist.github.com/aa5a315d61ae9438b18d",
            "description": "demo",
            "public": false,
            "files": {
                "main.py": { "filename": "main.py", "content": "A" },
                "README.md": { "filename": "README.md", "content": "B" },
            }
        }))
        .unwrap()
    }

    #[test]
    fn change_lines_label_adds_modifies_and_removals() {
        let snapshot = snapshot();
        let intent = UpdateIntent {
            files: [
                ("main.py".to_string(), "A2".to_string()),
                ("new.py".to_string(), "N".to_string()),
            ]
            .into(),
            remove: ["README.md".to_string()].into(),
            ..Default::default()
        };
        let payload = reconcile(&snapshot.file_contents(), &intent).unwrap();
        let lines = change_lines(&snapshot, &payload);
        assert_eq!(
            lines,
            vec![
                "- README.md (removed)".to_string(),
                "~ main.py (modified)".to_string(),
                "+ new.py (new file)".to_string(),
            ]
        );
    }

    #[test]
    fn change_lines_lead_with_a_description_override() {
        let snapshot = snapshot();
        let intent = UpdateIntent {
            description: Some("new desc".to_string()),
            ..Default::default()
        };
        let payload = reconcile(&snapshot.file_contents(), &intent).unwrap();
        let lines = change_lines(&snapshot, &payload);
        assert_eq!(lines, vec!["* description: \"new desc\"".to_string()]);
    }
}
