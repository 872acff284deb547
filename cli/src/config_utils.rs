//! Configuration loading utilities for the CLI

use crate::cli::Cli;
use anyhow::{Context, Result};
use anypay_lib::{AnypayClient, Config};
use std::path::PathBuf;
use tracing::debug;

/// Resolve the config file path from `--config` or the default location.
pub fn config_path(cli: &Cli) -> Result<PathBuf> {
    match cli.config {
        Some(ref path) => Ok(PathBuf::from(path)),
        None => Ok(Config::default_config_path()?),
    }
}

/// Load the config file (if any) and overlay command-line and environment options.
///
/// A missing file is fine as long as the options supply the credentials.
pub fn load_config(cli: &Cli) -> Result<Config> {
    let mut config =
        Config::load_or_default(cli.config.as_ref()).context("Failed to load configuration")?;
    cli.apply_overrides(&mut config);
    debug!(
        account_id = %config.account_id,
        api_url = config.api_url(),
        project_id = config.project_id.is_some(),
        "resolved configuration"
    );
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Build an API client from the effective configuration.
///
/// `-H` headers and `-vvv` connection logging apply on top of the configured
/// HTTP settings.
pub fn build_client(cli: &Cli) -> Result<AnypayClient> {
    let config = load_config(cli)?;
    let http = config
        .http_client_builder()
        .headers(&cli.headers)
        .verbose(cli.is_http_verbose());
    AnypayClient::from_config_with_http(&config, http).context("Failed to create AnyPay client")
}
