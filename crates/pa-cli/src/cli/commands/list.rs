//! `page-analyzer list` – all sites with their latest check.

use anyhow::Result;
use pa_core::fetch_page::PageFetcher;
use pa_core::repository::Repository;

use super::fmt_date;

pub async fn run_list<F: PageFetcher>(repo: &Repository<F>) -> Result<()> {
    let urls = repo.list_all().await?;
    if urls.is_empty() {
        println!("No sites in database.");
        return Ok(());
    }

    println!("{:<6} {:<12} {:<8} {}", "ID", "LAST CHECK", "STATUS", "NAME");
    for u in urls {
        let status = u
            .last_status_code
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<6} {:<12} {:<8} {}",
            u.url.id,
            fmt_date(u.last_check_at),
            status,
            u.url.name
        );
    }
    Ok(())
}
