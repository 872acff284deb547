//! Outgoing payout commands: listing and creating payouts

use crate::cli::Cli;
use crate::colors::Colors;
use crate::output::{emit, format_money};
use crate::table::Table;
use anyhow::{Context, Result};
use anypay_lib::{AnypayClient, NewPayout, Payout, PayoutStatus, PayoutsQuery, Url};
use std::fmt::Write;

/// List outgoing payouts
pub async fn payouts_command(cli: &Cli, client: &AnypayClient, query: PayoutsQuery) -> Result<()> {
    let payouts = client
        .payouts(&query)
        .await
        .context("Failed to fetch payouts")?;

    emit(cli, &payouts, |payouts: &Vec<Payout>, out| {
        if payouts.is_empty() {
            writeln!(out, "No payouts found.")?;
            return Ok(());
        }
        out.push_str(&render_payouts(payouts));
        Ok(())
    })
}

fn render_payouts(payouts: &[Payout]) -> String {
    let mut table = Table::new(&[
        "TRANSACTION", "PAYOUT ID", "STATUS", "METHOD", "AMOUNT", "COMMISSION", "WALLET", "CREATED",
    ]);
    table.align_right(&[4, 5]);
    for payout in payouts {
        table.row(vec![
            payout.transaction_id.to_string(),
            payout.payout_id.to_string(),
            payout.status.to_string(),
            payout.method.to_string(),
            format_money(payout.amount),
            format_money(payout.commission),
            payout.wallet.clone(),
            payout.created_at.clone(),
        ]);
    }
    table.render_with(|column, cell| match column {
        2 => cell
            .parse::<PayoutStatus>()
            .map(Colors::payout_status)
            .unwrap_or_else(|_| cell.into()),
        7 => Colors::dim(cell),
        _ => cell.into(),
    })
}

/// Create a payout
pub async fn create_payout_command(
    cli: &Cli,
    client: &AnypayClient,
    payout: NewPayout,
    status_url: Option<&str>,
) -> Result<()> {
    let mut payout = payout;
    if let Some(status_url) = status_url {
        let url = Url::parse(status_url)
            .with_context(|| format!("Invalid status URL '{status_url}'"))?;
        payout = payout.status_url(url);
    }

    let created = client
        .create_payout(&payout)
        .await
        .context("Failed to create payout")?;

    emit(cli, &created, |created, out| {
        if cli.should_show_output() {
            writeln!(
                out,
                "{} payout {} ({}) for {}",
                Colors::success("Created"),
                created.payout_id,
                Colors::payout_status(created.status),
                Colors::amount(&format_money(created.amount)),
            )?;
            writeln!(out)?;
        }
        out.push_str(&render_payouts(std::slice::from_ref(created)));
        Ok(())
    })
}
