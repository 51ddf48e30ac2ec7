//! `page-analyzer show <id>` – one site and its check history.

use anyhow::{bail, Result};
use pa_core::fetch_page::PageFetcher;
use pa_core::repository::{Repository, MSG_URL_NOT_FOUND};

use super::{fmt_date, fmt_text};

pub async fn run_show<F: PageFetcher>(repo: &Repository<F>, id: i64) -> Result<()> {
    let Some(url) = repo.find_by_id(id).await? else {
        bail!("{MSG_URL_NOT_FOUND}");
    };

    println!("ID:      {}", url.id);
    println!("Name:    {}", url.name);
    println!("Created: {}", fmt_date(Some(url.created_at)));
    println!();

    let checks = repo.list_checks(url.id).await?;
    if checks.is_empty() {
        println!("No checks yet. Run `page-analyzer check {}`.", url.id);
        return Ok(());
    }

    println!(
        "{:<4} {:<7} {:<12} {:<30} {:<30} {}",
        "#", "STATUS", "DATE", "H1", "TITLE", "DESCRIPTION"
    );
    for c in checks {
        println!(
            "{:<4} {:<7} {:<12} {:<30} {:<30} {}",
            c.seq,
            c.status_code,
            fmt_date(Some(c.created_at)),
            fmt_text(c.h1.as_deref()),
            fmt_text(c.title.as_deref()),
            fmt_text(c.description.as_deref())
        );
    }
    Ok(())
}
