//! `page-analyzer add <url>` – normalize and store a site.

use anyhow::Result;
use pa_core::fetch_page::PageFetcher;
use pa_core::repository::Repository;

use super::report;

pub async fn run_add<F: PageFetcher>(repo: &Repository<F>, url: &str) -> Result<()> {
    let outcome = repo.add(url).await;
    report(&outcome)
}
