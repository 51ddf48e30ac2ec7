//! Check operations: append and per-URL history.

use anyhow::Result;
use sqlx::Row;

use super::db::{unix_timestamp, UrlDb};
use super::types::{Check, CheckId, NewCheck, UrlId};

impl UrlDb {
    /// Append a check for an existing URL.
    ///
    /// Runs in its own transaction; the foreign key rejects unknown `url_id`s.
    pub async fn insert_check(&self, url_id: UrlId, check: &NewCheck) -> Result<CheckId> {
        let mut tx = self.pool.begin().await?;

        let row_id = sqlx::query(
            r#"
            INSERT INTO url_checks (
                url_id, status_code, h1, title, description, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(url_id)
        .bind(check.status_code)
        .bind(&check.h1)
        .bind(&check.title)
        .bind(&check.description)
        .bind(unix_timestamp())
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        tx.commit().await?;
        Ok(row_id)
    }

    /// All checks for a URL, newest first.
    ///
    /// `seq` numbers the checks oldest-first (1 = first check ever), so the
    /// numbering does not depend on the order of the returned list.
    pub async fn list_checks(&self, url_id: UrlId) -> Result<Vec<Check>> {
        let rows = sqlx::query(
            r#"
            SELECT
                id, url_id, status_code, h1, title, description, created_at,
                ROW_NUMBER() OVER (
                    PARTITION BY url_id
                    ORDER BY created_at ASC, id ASC
                ) AS seq
            FROM url_checks
            WHERE url_id = ?1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(url_id)
        .fetch_all(&self.pool)
        .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(Check {
                id: row.get("id"),
                url_id: row.get("url_id"),
                seq: row.get("seq"),
                status_code: row.get("status_code"),
                h1: row.get("h1"),
                title: row.get("title"),
                description: row.get("description"),
                created_at: row.get("created_at"),
            });
        }

        Ok(out)
    }
}
