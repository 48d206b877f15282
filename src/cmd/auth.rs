use std::env;
use std::io::{self, Read};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use serde::Deserialize;

use crate::common::network::{PROBE_TIMEOUT_SECS, api_base, default_client};
use crate::util::{color_enabled_stdout, load_config, mask_token, save_config, sym_check, sym_question};

#[derive(Deserialize, Default)]
struct WhoAmIResponse {
    login: Option<String>,
    name: Option<String>,
    id: Option<u64>,
}

pub fn handle_auth(reset: bool) -> Result<()> {
    let ce = color_enabled_stdout();

    // A stored token just gets inspected, unless the user asked to reset.
    if !reset {
        if let Ok(cfg) = load_config() {
            if let Some(token) = cfg.github_token.as_deref().filter(|t| !t.trim().is_empty()) {
                println!(
                    "{} Personal access token: {}",
                    sym_check(ce),
                    mask_token(token).blue().bold()
                );
                if probe_token(ce, token) {
                    return Ok(());
                }
                println!(
                    "{} Token appears invalid or expired. Please enter a new one.",
                    sym_question(ce)
                );
            }
        }
    }

    println!("Enter your personal access token (or set GITHUB_TOKEN):");
    println!("  Create one with the 'gist' scope at https://github.com/settings/tokens");
    let token = match rpassword::read_password() {
        Ok(t) if !t.trim().is_empty() => t,
        _ => {
            if let Ok(t) = env::var("GITHUB_TOKEN") {
                t
            } else {
                let mut buf = String::new();
                io::stdin()
                    .read_to_string(&mut buf)
                    .context("failed to read token from stdin")?;
                buf
            }
        }
    };
    let token = token.trim().to_string();
    if token.is_empty() {
        bail!("token cannot be empty");
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner} Saving token...").unwrap());
    pb.enable_steady_tick(Duration::from_millis(80));

    let mut cfg = load_config().unwrap_or_default();
    cfg.github_token = Some(token.clone());
    save_config(&cfg)?;

    pb.finish_and_clear();
    println!("{} Personal access token saved.", sym_check(ce));
    println!(
        "{} Personal access token: {}",
        sym_check(ce),
        mask_token(&token).blue().bold()
    );
    if !probe_token(ce, &token) {
        println!(
            "{} Could not verify the token against {}; it is stored anyway.",
            sym_question(ce),
            api_base()
        );
    }
    Ok(())
}

/// Hit the whoami endpoint with a short timeout and print what we learn.
/// Returns false when the token is rejected or the probe never lands.
fn probe_token(ce: bool, token: &str) -> bool {
    let Ok(client) = default_client(PROBE_TIMEOUT_SECS) else {
        return false;
    };
    let Ok(resp) = client
        .get(format!("{}/user", api_base()))
        .bearer_auth(token)
        .send()
    else {
        return false;
    };
    if !resp.status().is_success() {
        return false;
    }
    if let Ok(info) = resp.json::<WhoAmIResponse>() {
        if let Some(login) = info.login {
            println!("{} Login: {}", sym_check(ce), login);
        }
        if let Some(name) = info.name {
            println!("{} Name: {}", sym_check(ce), name);
        }
        if let Some(id) = info.id {
            println!("{} User ID: {}", sym_check(ce), id);
        }
    }
    true
}
