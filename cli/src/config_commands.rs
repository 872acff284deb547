use crate::cli::Cli;
use crate::colors::Colors;
use crate::config_utils::config_path;
use crate::output::{emit, mask_secret};
use anyhow::{Context, Result};
use anypay_lib::constants::DEFAULT_HTTP_TIMEOUT_SECS;
use anypay_lib::Config;
use serde_json::json;
use std::fmt::Write;

/// Show the effective configuration with secrets masked
pub fn show_command(cli: &Cli) -> Result<()> {
    let path = config_path(cli)?;
    let mut config =
        Config::load_or_default(Some(&path)).context("Failed to load configuration")?;
    cli.apply_overrides(&mut config);

    let display = build_config_display(&config, &path);

    emit(cli, &display, |_, out| {
        writeln!(out, "Config file: {}", Colors::path(&path.display().to_string()))?;
        if !path.exists() {
            writeln!(out, "{}", Colors::dim("(file does not exist, showing options and defaults)"))?;
        }
        writeln!(out)?;

        let or_unset = |value: Option<String>| value.unwrap_or_else(|| "<not set>".to_string());
        let rows = [
            ("account_id", or_unset(non_empty(&config.account_id))),
            ("api_key", or_unset(non_empty(&config.api_key).map(|k| mask_secret(&k)))),
            ("project_id", or_unset(config.project_id.clone())),
            ("secret", or_unset(config.secret.as_deref().map(mask_secret))),
            ("api_url", config.api_url().to_string()),
            ("merchant_url", config.merchant_url().to_string()),
            ("timeout_secs", effective_timeout(&config).to_string()),
        ];
        for (key, value) in rows {
            writeln!(out, "{} = {}", Colors::key(key), value)?;
        }
        if let Some(seconds) = config.connect_timeout_secs {
            writeln!(out, "{} = {}", Colors::key("connect_timeout_secs"), seconds)?;
        }
        if let Some(ref ua) = config.user_agent {
            writeln!(out, "{} = {}", Colors::key("user_agent"), ua)?;
        }
        Ok(())
    })
}

/// Validate the configuration file
pub fn validate_command(cli: &Cli) -> Result<()> {
    let path = config_path(cli)?;

    if !path.exists() {
        anyhow::bail!("Configuration file not found: {}", path.display());
    }

    let config = Config::load_from(Some(&path))?;

    println!(
        "{} Configuration is valid: {}",
        Colors::ok_marker(),
        path.display()
    );

    if config.project_id.is_none() {
        println!(
            "{} project_id is not set: commissions, payments and link are unavailable",
            Colors::warn_marker()
        );
    }
    if config.secret.is_none() {
        println!(
            "{} secret is not set: link is unavailable",
            Colors::warn_marker()
        );
    }

    Ok(())
}

/// Write a config file from the account options
pub fn init_command(cli: &Cli, force: bool) -> Result<()> {
    let path = config_path(cli)?;

    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite it.",
            path.display()
        );
    }

    let mut config = Config::default();
    cli.apply_overrides(&mut config);
    config
        .validate()
        .context("Cannot create config: pass --account-id and --api-key (or ANYPAY_ACCOUNT_ID and ANYPAY_API_KEY)")?;

    let saved = config.save_to(Some(&path))?;

    if cli.should_show_output() {
        println!(
            "{} config to {}",
            Colors::success("Wrote"),
            Colors::path(&saved.display().to_string())
        );
    }

    Ok(())
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn effective_timeout(config: &Config) -> u64 {
    config.timeout_secs.unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS)
}

/// Build configuration display data for JSON and YAML output
fn build_config_display(config: &Config, config_path: &std::path::Path) -> serde_json::Value {
    json!({
        "config_path": config_path.display().to_string(),
        "account_id": non_empty(&config.account_id),
        "api_key": non_empty(&config.api_key).map(|k| mask_secret(&k)),
        "project_id": config.project_id,
        "secret": config.secret.as_deref().map(mask_secret),
        "api_url": config.api_url(),
        "merchant_url": config.merchant_url(),
        "timeout_secs": effective_timeout(config),
        "connect_timeout_secs": config.connect_timeout_secs,
        "user_agent": config.user_agent,
    })
}
