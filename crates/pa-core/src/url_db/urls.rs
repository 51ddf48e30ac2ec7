//! URL operations: insert-if-absent, lookup, listing.

use anyhow::{anyhow, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::db::{unix_timestamp, UrlDb};
use super::types::{InsertUrl, Url, UrlId, UrlSummary};

impl UrlDb {
    /// Insert `name` unless a URL with that name is already stored.
    ///
    /// The insert is a single `ON CONFLICT DO NOTHING` statement, so it takes
    /// the write lock up front and waits on `busy_timeout` instead of failing
    /// a read-to-write lock upgrade. When the name is already stored (or a
    /// concurrent add stored it first) nothing is returned and the existing
    /// id is looked up.
    pub async fn insert_url(&self, name: &str) -> Result<InsertUrl> {
        let inserted = sqlx::query(
            r#"
            INSERT INTO urls (name, created_at)
            VALUES (?1, ?2)
            ON CONFLICT (name) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(name)
        .bind(unix_timestamp())
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = inserted {
            return Ok(InsertUrl::Inserted(row.get("id")));
        }

        let url = self
            .find_url_by_name(name)
            .await?
            .ok_or_else(|| anyhow!("url {name} missing after conflicting insert"))?;
        Ok(InsertUrl::Existing(url.id))
    }

    /// Fetch a single URL by id.
    pub async fn find_url(&self, id: UrlId) -> Result<Option<Url>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, created_at
            FROM urls
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(url_from_row))
    }

    /// Fetch a single URL by its normalized name.
    pub async fn find_url_by_name(&self, name: &str) -> Result<Option<Url>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, created_at
            FROM urls
            WHERE name = ?1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(url_from_row))
    }

    /// List all URLs, newest first, each with its most recent check (if any).
    pub async fn list_urls(&self) -> Result<Vec<UrlSummary>> {
        let rows = sqlx::query(
            r#"
            SELECT
                u.id, u.name, u.created_at,
                MAX(c.created_at) AS last_check_at,
                (
                    SELECT lc.status_code
                    FROM url_checks lc
                    WHERE lc.url_id = u.id
                    ORDER BY lc.created_at DESC, lc.id DESC
                    LIMIT 1
                ) AS last_status_code
            FROM urls u
            LEFT JOIN url_checks c ON c.url_id = u.id
            GROUP BY u.id, u.name, u.created_at
            ORDER BY u.created_at DESC, u.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(UrlSummary {
                url: url_from_row(&row),
                last_check_at: row.get("last_check_at"),
                last_status_code: row.get("last_status_code"),
            });
        }

        Ok(out)
    }

    /// Number of stored URLs.
    pub async fn count_urls(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM urls")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("n"))
    }
}

fn url_from_row(row: &SqliteRow) -> Url {
    Url {
        id: row.get("id"),
        name: row.get("name"),
        created_at: row.get("created_at"),
    }
}
