//! Output formatting and display utilities for the CLI

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::{Cli, OutputFormat};

/// Render `value` in the selected output format.
///
/// JSON and YAML are produced from the value's serde form; text output is
/// rendered by `text` into a buffer. All formats honor `--output`.
pub fn emit<T, F>(cli: &Cli, value: &T, text: F) -> Result<()>
where
    T: Serialize + ?Sized,
    F: FnOnce(&T, &mut String) -> Result<()>,
{
    let output = match cli.output_format.resolve() {
        OutputFormat::Auto => unreachable!("Auto should be resolved"),
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
        OutputFormat::Text => {
            let mut buffer = String::new();
            text(value, &mut buffer)?;
            buffer
        }
    };
    write_output(cli, output.trim_end_matches('\n'))
}

/// Write string output to file or stdout based on CLI options
pub fn write_output(cli: &Cli, content: impl AsRef<str>) -> Result<()> {
    let content = content.as_ref();
    if let Some(output_file) = &cli.output {
        std::fs::write(output_file, content).context("Failed to write output file")?;
        if cli.is_verbose() && cli.should_show_output() {
            eprintln!("Saved to: {output_file}");
        }
    } else {
        println!("{content}");
    }
    Ok(())
}

/// Format a money amount with two decimals, e.g. `1234.50`.
pub fn format_money(amount: f64) -> String {
    format!("{amount:.2}")
}

/// Mask a secret for display, keeping the last four characters.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{tail}")
}
