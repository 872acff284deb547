//! Incoming payment commands: listing payments and building payment links

use crate::cli::Cli;
use crate::colors::Colors;
use crate::output::{emit, format_money};
use crate::table::Table;
use anyhow::{Context, Result};
use anypay_lib::{
    AnypayClient, Language, Payment, PaymentCurrency, PaymentLinkRequest, PaymentMethod,
    PaymentStatus, PaymentsQuery,
};
use serde_json::json;
use std::fmt::Write;

/// List incoming payments
pub async fn payments_command(cli: &Cli, client: &AnypayClient, query: PaymentsQuery) -> Result<()> {
    let payments = client
        .payments(&query)
        .await
        .context("Failed to fetch payments")?;

    emit(cli, &payments, |payments: &Vec<Payment>, out| {
        if payments.is_empty() {
            writeln!(out, "No payments found.")?;
            return Ok(());
        }

        let mut table = Table::new(&[
            "TRANSACTION", "PAY ID", "STATUS", "METHOD", "AMOUNT", "PROFIT", "EMAIL", "CREATED",
        ]);
        table.align_right(&[4, 5]);
        for payment in payments {
            table.row(vec![
                payment.transaction_id.to_string(),
                payment.pay_id.to_string(),
                payment.status.to_string(),
                payment.method.to_string(),
                format_money(payment.amount),
                format_money(payment.profit),
                payment.email.clone(),
                payment.created_at.clone(),
            ]);
        }
        out.push_str(&table.render_with(|column, cell| match column {
            2 => cell
                .parse::<PaymentStatus>()
                .map(Colors::payment_status)
                .unwrap_or_else(|_| cell.into()),
            7 => Colors::dim(cell),
            _ => cell.into(),
        }));
        Ok(())
    })
}

/// Options of the `link` command
pub struct LinkArgs {
    pub pay_id: u64,
    pub amount: f64,
    pub currency: PaymentCurrency,
    pub description: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub method: Option<PaymentMethod>,
    pub language: Option<Language>,
    pub extra: Vec<(String, String)>,
}

impl LinkArgs {
    fn into_request(self) -> PaymentLinkRequest {
        let mut request = PaymentLinkRequest::new(self.pay_id, self.amount).currency(self.currency);
        request.description = self.description;
        request.email = self.email;
        request.phone = self.phone;
        request.method = self.method;
        request.language = self.language;
        for (key, value) in self.extra {
            request = request.extra(key, Some(value));
        }
        request
    }
}

/// Print a signed payment page link
pub fn link_command(cli: &Cli, client: &AnypayClient, args: LinkArgs) -> Result<()> {
    let request = args.into_request();
    let url = client
        .payment_link(&request)
        .context("Failed to build payment link")?;

    emit(cli, &json!({ "url": url.as_str() }), |_, out| {
        writeln!(out, "{url}")?;
        Ok(())
    })
}
