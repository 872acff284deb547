//! Semantic color helpers for consistent CLI output.
//!
//! Colors are semantic - they convey meaning rather than just decoration.

use anypay_lib::{PaymentStatus, PayoutStatus};
use colored::{ColoredString, Colorize};

/// Semantic color helpers for consistent CLI output.
///
/// # Color Scheme
///
/// | Element | Color | Usage |
/// |---------|-------|-------|
/// | Success | Green | Completed payments, amounts |
/// | Error | Red | Error messages, failed or canceled records |
/// | Warning | Yellow | Pending records |
/// | Info | Cyan | Hints, commands to run |
/// | Path | Blue | File paths |
/// | Key | White+Bold | Labels, config keys |
/// | Dim | Dimmed | Secondary info, timestamps |
pub struct Colors;

impl Colors {
    /// Green - for success messages and positive outcomes
    pub fn success(s: &str) -> ColoredString {
        s.green()
    }

    /// Red - for error messages and failures
    pub fn error(s: &str) -> ColoredString {
        s.red()
    }

    /// Yellow - for warnings and cautions
    pub fn warning(s: &str) -> ColoredString {
        s.yellow()
    }

    /// Cyan - for informational messages and hints
    pub fn info(s: &str) -> ColoredString {
        s.cyan()
    }

    /// Blue - for file and directory paths
    pub fn path(s: &str) -> ColoredString {
        s.blue()
    }

    /// Green+Bold - for money amounts
    pub fn amount(s: &str) -> ColoredString {
        s.green().bold()
    }

    /// White+Bold - for labels and config keys
    pub fn key(s: &str) -> ColoredString {
        s.white().bold()
    }

    /// Dimmed - for less important/secondary information
    pub fn dim(s: &str) -> ColoredString {
        s.dimmed()
    }

    /// Color a payment status by outcome.
    pub fn payment_status(status: PaymentStatus) -> ColoredString {
        let s = status.to_string();
        match status {
            PaymentStatus::Paid => s.green(),
            PaymentStatus::Waiting => s.yellow(),
            PaymentStatus::Refund => s.cyan(),
            PaymentStatus::Canceled | PaymentStatus::Expired | PaymentStatus::Error => s.red(),
        }
    }

    /// Color a payout status by outcome.
    pub fn payout_status(status: PayoutStatus) -> ColoredString {
        let s = status.to_string();
        match status {
            PayoutStatus::Paid => s.green(),
            PayoutStatus::InProcess => s.yellow(),
            PayoutStatus::Canceled | PayoutStatus::Blocked => s.red(),
        }
    }

    /// Green [OK] marker for verification success
    pub fn ok_marker() -> ColoredString {
        "[OK]".green()
    }

    /// Yellow [WARN] marker for warnings
    pub fn warn_marker() -> ColoredString {
        Self::warning("[WARN]")
    }
}
