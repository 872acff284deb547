//! anypay CLI - command-line client for the AnyPay merchant API

mod account_commands;
mod cli;
mod colors;
mod config_commands;
mod config_utils;
mod errors;
mod exit_codes;
mod output;
mod payment_commands;
mod payout_commands;
mod table;

use anyhow::Result;
use anypay_lib::{AnypayClient, NewPayout, PaymentsQuery, PayoutsQuery};
use clap::{CommandFactory, Parser};
use clap_complete::{generate, shells};
use cli::{Cli, ColorMode, Commands, ConfigCommands, Shell};
use colored::control;
use config_utils::build_client;
use exit_codes::ExitCode;
use payment_commands::LinkArgs;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = ctrlc::set_handler(move || {
        eprintln!("Interrupted");
        std::process::exit(ExitCode::Interrupted.code());
    }) {
        eprintln!("Warning: failed to set Ctrl+C handler: {e}");
    }

    let result = run().await;

    if let Err(e) = result {
        eprintln!("{}", errors::format_error_with_suggestion(&e));
        ExitCode::from(&e).exit();
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    init_color_support(&cli);
    init_logging(&cli);

    handle_command(&cli).await
}

/// Handle CLI subcommands
async fn handle_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Config { command } => match command {
            None | Some(ConfigCommands::Show) => config_commands::show_command(cli),
            Some(ConfigCommands::Validate) => config_commands::validate_command(cli),
            Some(ConfigCommands::Init { force }) => config_commands::init_command(cli, *force),
        },

        Commands::Version => show_version(),

        Commands::Completions { shell } => generate_completions(*shell),

        command => {
            let client = build_client(cli)?;
            let result = handle_api_command(cli, &client, command).await;
            client.close();
            result
        }
    }
}

/// Commands that need an API client
async fn handle_api_command(cli: &Cli, client: &AnypayClient, command: &Commands) -> Result<()> {
    match command {
        Commands::Balance => account_commands::balance_command(cli, client).await,
        Commands::Rates => account_commands::rates_command(cli, client).await,
        Commands::Commissions => account_commands::commissions_command(cli, client).await,
        Commands::Ips => account_commands::ips_command(cli, client).await,

        Commands::Payments {
            transaction_id,
            pay_id,
            offset,
        } => {
            let query = PaymentsQuery {
                transaction_id: *transaction_id,
                pay_id: *pay_id,
                offset: *offset,
            };
            payment_commands::payments_command(cli, client, query).await
        }

        Commands::Link {
            pay_id,
            amount,
            currency,
            description,
            email,
            phone,
            method,
            language,
            extra,
        } => payment_commands::link_command(
            cli,
            client,
            LinkArgs {
                pay_id: *pay_id,
                amount: *amount,
                currency: *currency,
                description: description.clone(),
                email: email.clone(),
                phone: phone.clone(),
                method: *method,
                language: *language,
                extra: extra.clone(),
            },
        ),

        Commands::Payouts {
            transaction_id,
            payout_id,
            offset,
        } => {
            let query = PayoutsQuery {
                transaction_id: *transaction_id,
                payout_id: *payout_id,
                offset: *offset,
            };
            payout_commands::payouts_command(cli, client, query).await
        }

        Commands::Payout {
            payout_id,
            method,
            amount,
            wallet,
            commission_type,
            currency,
            status_url,
        } => {
            let mut payout = NewPayout::new(*payout_id, *method, *amount, wallet.clone());
            payout.commission_type = *commission_type;
            payout.currency = *currency;
            payout_commands::create_payout_command(cli, client, payout, status_url.as_deref())
                .await
        }

        Commands::Config { .. } | Commands::Version | Commands::Completions { .. } => {
            unreachable!("handled without a client")
        }
    }
}

// ==================== Simple Commands ====================

/// Show version information
fn show_version() -> Result<()> {
    const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

    println!("anypay CLI: v{CLI_VERSION}");
    println!("anypay-lib: v{}", anypay_lib::VERSION);

    Ok(())
}

/// Generate shell completions
fn generate_completions(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    match shell {
        Shell::Bash => generate(shells::Bash, &mut cmd, bin_name, &mut std::io::stdout()),
        Shell::Zsh => generate(shells::Zsh, &mut cmd, bin_name, &mut std::io::stdout()),
        Shell::Fish => generate(shells::Fish, &mut cmd, bin_name, &mut std::io::stdout()),
        Shell::PowerShell => generate(
            shells::PowerShell,
            &mut cmd,
            bin_name,
            &mut std::io::stdout(),
        ),
    }

    Ok(())
}

/// Initialize color support based on user preference, NO_COLOR and `--output`
fn init_color_support(cli: &Cli) {
    use std::io::IsTerminal;
    let no_color_env = std::env::var("NO_COLOR").is_ok();

    match cli.color {
        ColorMode::Always => control::set_override(true),
        ColorMode::Never => control::set_override(false),
        ColorMode::Auto => {
            if no_color_env || cli.output.is_some() || !std::io::stdout().is_terminal() {
                control::set_override(false);
            }
        }
    }
}

/// Log to stderr. `RUST_LOG` takes precedence over `-v` / `-q`.
fn init_logging(cli: &Cli) {
    use std::io::IsTerminal;

    let ansi = match cli.color {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => std::env::var("NO_COLOR").is_err() && std::io::stderr().is_terminal(),
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(cli.verbosity >= 3)
        .with_ansi(ansi)
        .init();
}
