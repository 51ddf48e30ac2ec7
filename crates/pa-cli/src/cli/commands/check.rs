//! `page-analyzer check <id>` – fetch a stored site and record a check.

use anyhow::Result;
use pa_core::fetch_page::PageFetcher;
use pa_core::repository::Repository;

use super::report;

pub async fn run_check<F: PageFetcher>(repo: &Repository<F>, id: i64) -> Result<()> {
    let outcome = repo.add_check(id).await;
    report(&outcome)
}
