//! CLI command handlers, one file per command.

mod add;
mod check;
mod list;
mod show;

pub use add::run_add;
pub use check::run_check;
pub use list::run_list;
pub use show::run_show;

use anyhow::{anyhow, Result};
use chrono::DateTime;
use pa_core::repository::Outcome;

/// Prints a successful outcome; turns a failed one into an error for `main`.
pub(crate) fn report(outcome: &Outcome) -> Result<()> {
    match outcome.failure {
        None => {
            match outcome.id {
                Some(id) => println!("{} (id {id})", outcome.message),
                None => println!("{}", outcome.message),
            }
            Ok(())
        }
        Some(kind) => {
            tracing::debug!("{} failure maps to HTTP {}", kind, kind.http_status());
            Err(anyhow!("{}", outcome.message))
        }
    }
}

/// `YYYY-MM-DD` for a Unix timestamp, `-` when absent.
pub(crate) fn fmt_date(ts: Option<i64>) -> String {
    ts.and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Column value for optional text, `-` when absent.
pub(crate) fn fmt_text(text: Option<&str>) -> &str {
    text.unwrap_or("-")
}
