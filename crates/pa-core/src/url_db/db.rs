//! SQLite-backed URL database: connection, migrations, timestamp helper.
//!
//! URL and check CRUD live in `urls` and `checks`.

use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Pool size used when the caller does not pick one.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 8;

/// How long a writer waits for another connection's write lock.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle to the SQLite-backed URL database.
///
/// The default file lives under the XDG state directory:
/// `~/.local/state/page-analyzer/urls.db`.
#[derive(Clone)]
pub struct UrlDb {
    pub(crate) pool: Pool<Sqlite>,
}

impl UrlDb {
    /// Default database path under the XDG state directory.
    pub fn default_path() -> Result<PathBuf> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("page-analyzer")?;
        Ok(xdg_dirs.get_state_home().join("page-analyzer").join("urls.db"))
    }

    /// Open (or create) the default URL database and run migrations.
    pub async fn open_default() -> Result<Self> {
        Self::open_at(Self::default_path()?, DEFAULT_MAX_CONNECTIONS).await
    }

    /// Open (or create) the database at a specific path. Creates parent dirs if needed.
    pub async fn open_at(path: impl AsRef<Path>, max_connections: u32) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true);
        Self::connect(options, max_connections).await
    }

    /// Open a database from a `sqlite:` URI such as `sqlite://data/urls.db`
    /// (the form accepted in `DATABASE_URL`).
    pub async fn open_url(uri: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(uri)?
            .create_if_missing(true)
            .foreign_keys(true);
        Self::connect(options, max_connections).await
    }

    async fn connect(options: SqliteConnectOptions, max_connections: u32) -> Result<Self> {
        let options = options.busy_timeout(BUSY_TIMEOUT);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await?;
        let db = UrlDb { pool };
        db.migrate().await?;
        Ok(db)
    }

    async fn migrate(&self) -> Result<()> {
        // - `urls.name` is the normalized origin; UNIQUE is the conflict
        //   target of the insert in `insert_url`.
        // - Text columns of `url_checks` are truncated by the writer, never rejected.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS urls (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE CHECK (length(name) <= 255),
                created_at INTEGER NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS url_checks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                url_id INTEGER NOT NULL REFERENCES urls (id),
                status_code INTEGER NOT NULL,
                h1 TEXT,
                title TEXT,
                description TEXT,
                created_at INTEGER NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_url_checks_url_created
            ON url_checks (url_id, created_at);
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Close the pool, waiting for checked-out connections to be returned.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Current time as Unix seconds (for DB timestamps).
pub(crate) fn unix_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

#[cfg(test)]
/// Open an in-memory database for tests (no disk I/O).
pub(crate) async fn open_memory() -> Result<UrlDb> {
    // Single connection: each new in-memory connection would be a different, empty DB.
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;
    let db = UrlDb { pool };
    db.migrate().await?;
    Ok(db)
}
