//! Account-level commands: balance, rates, commissions and notification IPs

use crate::cli::Cli;
use crate::colors::Colors;
use crate::output::{emit, format_money};
use crate::table::Table;
use anyhow::{Context, Result};
use anypay_lib::{AnypayClient, Rates};
use serde_json::json;
use std::fmt::Write;
use std::net::Ipv4Addr;

/// Show the account balance
pub async fn balance_command(cli: &Cli, client: &AnypayClient) -> Result<()> {
    let balance = client
        .balance()
        .await
        .context("Failed to fetch balance")?;

    emit(cli, &json!({ "balance": balance }), |_, out| {
        writeln!(out, "{} {}", Colors::key("Balance:"), Colors::amount(&format_money(balance)))?;
        Ok(())
    })
}

/// Show conversion rates
pub async fn rates_command(cli: &Cli, client: &AnypayClient) -> Result<()> {
    let rates = client.rates().await.context("Failed to fetch rates")?;
    emit(cli, &rates, print_rates)
}

fn print_rates(rates: &Rates, out: &mut String) -> Result<()> {
    let incoming = &rates.incoming;
    let outgoing = &rates.outgoing;

    writeln!(out, "{}", Colors::key("Incoming"))?;
    let mut table = Table::new(&["CURRENCY", "RATE"]);
    table.align_right(&[1]);
    for (code, rate) in [
        ("wmz", incoming.webmoney_dollar),
        ("usd", incoming.dollar),
        ("eur", incoming.euro),
        ("btc", incoming.bitcoin),
        ("ltc", incoming.litecoin),
        ("dash", incoming.dash),
        ("zec", incoming.zcash),
    ] {
        table.row(vec![code.to_string(), rate.to_string()]);
    }
    out.push_str(&table.render());

    writeln!(out)?;
    writeln!(out, "{}", Colors::key("Outgoing"))?;
    let mut table = Table::new(&["CURRENCY", "RATE"]);
    table.align_right(&[1]);
    table.row(vec!["wmz".to_string(), outgoing.webmoney_dollar.to_string()]);
    table.row(vec!["uah".to_string(), outgoing.hryvnia.to_string()]);
    out.push_str(&table.render());

    Ok(())
}

/// Show commission percentages of the configured project
pub async fn commissions_command(cli: &Cli, client: &AnypayClient) -> Result<()> {
    let commissions = client
        .commissions()
        .await
        .context("Failed to fetch commissions")?;

    emit(cli, &commissions, |commissions, out| {
        let mut table = Table::new(&["METHOD", "COMMISSION %"]);
        table.align_right(&[1]);
        for (method, rate) in commissions.iter() {
            table.row(vec![method.to_string(), format_money(rate)]);
        }
        out.push_str(&table.render());
        Ok(())
    })
}

/// List the addresses AnyPay sends notifications from
pub async fn ips_command(cli: &Cli, client: &AnypayClient) -> Result<()> {
    let ips = client
        .ip_notifications()
        .await
        .context("Failed to fetch notification IPs")?;

    emit(cli, &ips, |ips: &Vec<Ipv4Addr>, out| {
        for ip in ips {
            writeln!(out, "{ip}")?;
        }
        Ok(())
    })
}
