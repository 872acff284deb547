use anypay_lib::{
    CommissionType, Config, Language, PaymentCurrency, PaymentMethod, PayoutCurrency,
    PayoutMethod, WireValue,
};
use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;

/// Custom styles for CLI help output
fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Cyan.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
}

/// Output format for CLI commands.
///
/// - `Auto`: Automatically detect based on terminal (text for TTY, JSON for pipes)
/// - `Text`: Human-readable text output
/// - `Json`: JSON output for scripting and agents
/// - `Yaml`: YAML output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize, Default)]
pub enum OutputFormat {
    /// Auto-detect: JSON if piped, text if terminal
    #[default]
    Auto,
    /// Human-readable text output
    Text,
    /// JSON output for scripting
    Json,
    /// YAML output
    Yaml,
}

impl OutputFormat {
    /// Resolve `Auto` to a concrete format based on terminal detection.
    ///
    /// Returns `Text` if stdout is a terminal (interactive use),
    /// returns `Json` if stdout is not a terminal (piped/scripted use).
    pub fn resolve(self) -> Self {
        match self {
            OutputFormat::Auto => {
                if std::io::stdout().is_terminal() {
                    OutputFormat::Text
                } else {
                    OutputFormat::Json
                }
            }
            other => other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Parser, Debug)]
#[command(name = "anypay")]
#[command(about = "Command-line client for the AnyPay merchant API", long_about = None)]
#[command(version)]
#[command(styles = styles())]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short = 'C', long = "config", value_name = "PATH", global = true)]
    pub config: Option<String>,

    // Account Options
    /// Account id (overrides the config file)
    #[arg(
        long,
        value_name = "ID",
        env = "ANYPAY_ACCOUNT_ID",
        global = true,
        help_heading = "Account Options"
    )]
    pub account_id: Option<String>,

    /// API key used to sign requests
    #[arg(
        long,
        value_name = "KEY",
        env = "ANYPAY_API_KEY",
        hide_env_values = true,
        global = true,
        help_heading = "Account Options"
    )]
    pub api_key: Option<String>,

    /// Project (merchant) id, required for commissions, payments and links
    #[arg(
        long,
        value_name = "ID",
        env = "ANYPAY_PROJECT_ID",
        global = true,
        help_heading = "Account Options"
    )]
    pub project_id: Option<String>,

    /// Notification secret, required for payment links
    #[arg(
        long,
        value_name = "SECRET",
        env = "ANYPAY_SECRET",
        hide_env_values = true,
        global = true,
        help_heading = "Account Options"
    )]
    pub secret: Option<String>,

    // HTTP Options
    /// API base URL
    #[arg(
        long,
        value_name = "URL",
        env = "ANYPAY_API_URL",
        global = true,
        help_heading = "HTTP Options"
    )]
    pub api_url: Option<String>,

    /// Payment page base URL used for links
    #[arg(
        long,
        value_name = "URL",
        env = "ANYPAY_MERCHANT_URL",
        global = true,
        help_heading = "HTTP Options"
    )]
    pub merchant_url: Option<String>,

    /// Maximum time for each request
    #[arg(
        short = 'm',
        long = "max-time",
        alias = "timeout",
        value_name = "SECONDS",
        global = true,
        help_heading = "HTTP Options"
    )]
    pub max_time: Option<u64>,

    /// Maximum time to establish the connection
    #[arg(
        long = "connect-timeout",
        value_name = "SECONDS",
        global = true,
        help_heading = "HTTP Options"
    )]
    pub connect_timeout: Option<u64>,

    /// Add a header to every API request (repeatable)
    #[arg(
        short = 'H',
        long = "header",
        value_name = "HEADER",
        value_parser = parse_header,
        global = true,
        help_heading = "HTTP Options"
    )]
    pub headers: Vec<(String, String)>,

    // Display Options
    /// Verbosity level (can be used multiple times: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbosity", action = clap::ArgAction::Count, global = true, help_heading = "Display Options")]
    pub verbosity: u8,

    /// Control color output
    #[arg(
        long,
        value_name = "MODE",
        default_value = "auto",
        global = true,
        help_heading = "Display Options"
    )]
    pub color: ColorMode,

    /// Do not print log messages (aliases: -s, --silent)
    #[arg(
        short = 'q',
        long = "quiet",
        visible_short_alias = 's',
        visible_alias = "silent",
        global = true,
        help_heading = "Display Options"
    )]
    pub quiet: bool,

    /// Output format (auto detects: text for terminal, json for pipes)
    #[arg(
        long,
        value_name = "FORMAT",
        default_value = "auto",
        global = true,
        help_heading = "Display Options"
    )]
    pub output_format: OutputFormat,

    /// Write output to file
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        global = true,
        help_heading = "Display Options"
    )]
    pub output: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    // === Account Commands ===
    /// Show the account balance
    #[command(alias = "b")]
    Balance,

    /// Show currency conversion rates
    Rates,

    /// Show commission percentages per payment method
    #[command(after_help = "\
Examples:
  anypay commissions --project-id 42
  anypay commissions --output-format json")]
    Commissions,

    /// List trusted notification IP addresses
    #[command(alias = "ip-notification")]
    Ips,

    // === Payment Commands ===
    /// List incoming payments
    #[command(after_help = "\
Examples:
  anypay payments                      # Latest payments
  anypay payments --pay-id 7           # Look up one order
  anypay payments --offset 100         # Next page")]
    Payments {
        /// AnyPay transaction id
        #[arg(long = "trans-id", value_name = "ID")]
        transaction_id: Option<u64>,
        /// Seller-side payment id
        #[arg(long, value_name = "ID")]
        pay_id: Option<u64>,
        /// Paging offset
        #[arg(long, value_name = "N")]
        offset: Option<u64>,
    },

    /// Build a signed payment page link (no request is made)
    #[command(after_help = "\
Examples:
  anypay link 7 100
  anypay link 7 100 --desc 'Order #7' --lang en
  anypay link 7 100 --extra success_url=https://shop.example/ok")]
    Link {
        /// Seller-side payment id
        pay_id: u64,
        /// Amount to charge
        amount: f64,
        /// Payment currency
        #[arg(long, value_parser = parse_wire::<PaymentCurrency>, default_value = "rub")]
        currency: PaymentCurrency,
        /// Order description shown to the customer
        #[arg(long = "desc", value_name = "TEXT")]
        description: Option<String>,
        /// Customer email
        #[arg(long)]
        email: Option<String>,
        /// Customer phone
        #[arg(long)]
        phone: Option<String>,
        /// Preselected payment method
        #[arg(long, value_parser = parse_wire::<PaymentMethod>)]
        method: Option<PaymentMethod>,
        /// Payment page language
        #[arg(long = "lang", value_parser = parse_wire::<Language>)]
        language: Option<Language>,
        /// Extra unsigned query parameter (repeatable)
        #[arg(long = "extra", value_name = "KEY=VALUE", value_parser = parse_key_value)]
        extra: Vec<(String, String)>,
    },

    // === Payout Commands ===
    /// List outgoing payouts
    Payouts {
        /// AnyPay transaction id
        #[arg(long = "trans-id", value_name = "ID")]
        transaction_id: Option<u64>,
        /// Seller-side payout id
        #[arg(long, value_name = "ID")]
        payout_id: Option<u64>,
        /// Paging offset
        #[arg(long, value_name = "N")]
        offset: Option<u64>,
    },

    /// Create a payout
    #[command(
        alias = "create-payout",
        after_help = "\
Examples:
  anypay payout 5 qiwi 150.5 +79001234567
  anypay payout 6 card 1000 4111111111111111 --commission-type balance"
    )]
    Payout {
        /// Seller-side payout id
        payout_id: u64,
        /// Payout method (qiwi, ym, wm, mc, card)
        #[arg(value_parser = parse_wire::<PayoutMethod>)]
        method: PayoutMethod,
        /// Amount to send
        amount: f64,
        /// Destination wallet, card or phone number
        wallet: String,
        /// Whether the commission is charged to the payout or the balance
        #[arg(long, value_parser = parse_wire::<CommissionType>)]
        commission_type: Option<CommissionType>,
        /// Payout currency
        #[arg(long, value_parser = parse_wire::<PayoutCurrency>)]
        currency: Option<PayoutCurrency>,
        /// URL notified on status changes
        #[arg(long, value_name = "URL")]
        status_url: Option<String>,
    },

    // === Setup Commands ===
    /// Manage configuration
    #[command(
        alias = "c",
        args_conflicts_with_subcommands = true,
        after_help = "\
Examples:
  anypay config                        # Show current config
  anypay config validate               # Check config is valid
  anypay config init --account-id 1234 --api-key KEY
  anypay config --output-format json   # Output as JSON"
    )]
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Show version information
    #[command(alias = "v")]
    Version,

    /// Generate shell completions script
    #[command(
        alias = "com",
        after_help = "\
Examples:
  anypay completions bash >> ~/.bashrc
  anypay completions zsh >> ~/.zshrc
  anypay completions fish > ~/.config/fish/completions/anypay.fish"
    )]
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration with secrets masked
    Show,
    /// Validate configuration file
    Validate,
    /// Write a config file from the account options
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Parse a wire code such as `qiwi` or `rub`, listing valid codes on failure.
fn parse_wire<T: WireValue>(value: &str) -> Result<T, String> {
    T::from_wire(value).ok_or_else(|| {
        let expected: Vec<&str> = T::ALL.iter().map(WireValue::as_str).collect();
        format!("expected one of: {}", expected.join(", "))
    })
}

/// Parse a `Name: Value` header.
fn parse_header(value: &str) -> Result<(String, String), String> {
    let (name, value) = value
        .split_once(':')
        .ok_or_else(|| format!("Invalid header format '{value}'. Expected 'Name: Value'"))?;

    let name = name.trim();
    if name.is_empty() {
        return Err("Header name cannot be empty".to_string());
    }

    Ok((name.to_string(), value.trim().to_string()))
}

/// Parse a `KEY=VALUE` pair.
fn parse_key_value(value: &str) -> Result<(String, String), String> {
    let (key, value) = value
        .split_once('=')
        .ok_or_else(|| format!("Invalid parameter '{value}'. Expected 'KEY=VALUE'"))?;

    let key = key.trim();
    if key.is_empty() {
        return Err("Parameter name cannot be empty".to_string());
    }

    Ok((key.to_string(), value.to_string()))
}

impl Cli {
    /// Overlay account and HTTP options onto a loaded config.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(ref account_id) = self.account_id {
            config.account_id = account_id.clone();
        }
        if let Some(ref api_key) = self.api_key {
            config.api_key = api_key.clone();
        }
        if let Some(ref project_id) = self.project_id {
            config.project_id = Some(project_id.clone());
        }
        if let Some(ref secret) = self.secret {
            config.secret = Some(secret.clone());
        }
        if let Some(ref api_url) = self.api_url {
            config.api_url = Some(api_url.clone());
        }
        if let Some(ref merchant_url) = self.merchant_url {
            config.merchant_url = Some(merchant_url.clone());
        }
        if let Some(max_time) = self.max_time {
            config.timeout_secs = Some(max_time);
        }
        if let Some(connect_timeout) = self.connect_timeout {
            config.connect_timeout_secs = Some(connect_timeout);
        }
    }

    /// Default log filter for the chosen verbosity
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Connection-level HTTP logging, enabled at `-vvv`
    pub fn is_http_verbose(&self) -> bool {
        self.verbosity >= 3
    }

    /// Check if verbose output is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbosity >= 1
    }

    /// Check if output should be shown (not quiet)
    pub fn should_show_output(&self) -> bool {
        !self.quiet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wire_codes() {
        assert_eq!(parse_wire::<PayoutMethod>("mc"), Ok(PayoutMethod::Mobile));
        assert_eq!(parse_wire::<Language>("en"), Ok(Language::English));

        let err = parse_wire::<PayoutCurrency>("usd").unwrap_err();
        assert!(err.contains("rub, uah"));
    }

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("success_url=https://x.example/?a=b"),
            Ok(("success_url".to_string(), "https://x.example/?a=b".to_string()))
        );
        assert!(parse_key_value("novalue").is_err());
        assert!(parse_key_value("=value").is_err());
    }

    #[test]
    fn test_parse_header() {
        assert_eq!(
            parse_header("X-Request-Id: abc:1"),
            Ok(("X-Request-Id".to_string(), "abc:1".to_string()))
        );
        assert!(parse_header("no-colon").is_err());
        assert!(parse_header(": value").is_err());
    }

    #[test]
    fn test_overrides_win_over_file() {
        let cli = Cli::parse_from([
            "anypay",
            "--account-id",
            "999",
            "--project-id",
            "42",
            "--max-time",
            "5",
            "--connect-timeout",
            "2",
            "balance",
        ]);
        let mut config = Config {
            account_id: "1".into(),
            api_key: "file-key".into(),
            ..Default::default()
        };
        cli.apply_overrides(&mut config);

        assert_eq!(config.account_id, "999");
        assert_eq!(config.api_key, "file-key");
        assert_eq!(config.project_id.as_deref(), Some("42"));
        assert_eq!(config.timeout_secs, Some(5));
        assert_eq!(config.connect_timeout_secs, Some(2));
    }

    #[test]
    fn test_log_level() {
        assert_eq!(Cli::parse_from(["anypay", "balance"]).log_level(), "warn");
        assert_eq!(Cli::parse_from(["anypay", "-vv", "balance"]).log_level(), "debug");
        assert_eq!(Cli::parse_from(["anypay", "-q", "-v", "balance"]).log_level(), "error");
    }
}
