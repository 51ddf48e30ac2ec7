use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::fetch_page::CurlFetcher;
use crate::url_db::{UrlDb, DEFAULT_MAX_CONNECTIONS};

/// Environment variable that overrides the configured database location.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Global configuration loaded from `~/.config/page-analyzer/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// SQLite file for URLs and checks. None = `~/.local/state/page-analyzer/urls.db`.
    #[serde(default)]
    pub database_path: Option<PathBuf>,
    /// Total timeout of a check request, in seconds.
    pub fetch_timeout_secs: u64,
    /// Maximum pooled database connections.
    pub max_connections: u32,
    /// Optional `User-Agent` sent with check requests (None = libcurl default).
    #[serde(default)]
    pub user_agent: Option<String>,
    /// `sqlite:` URI taken from `DATABASE_URL` by [`load_or_init`]. Never read from the file.
    #[serde(skip)]
    pub database_url: Option<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            fetch_timeout_secs: 5,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            user_agent: None,
            database_url: None,
        }
    }
}

impl AnalyzerConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs.max(1))
    }

    /// Fetcher configured with this timeout and user agent.
    pub fn fetcher(&self) -> CurlFetcher {
        let fetcher = CurlFetcher::new(self.fetch_timeout());
        match &self.user_agent {
            Some(ua) => fetcher.with_user_agent(ua.clone()),
            None => fetcher,
        }
    }

    /// Use `path` for the database, dropping any `DATABASE_URL` picked up at load.
    /// An explicit path given on the command line wins over the environment.
    pub fn override_database_path(&mut self, path: PathBuf) {
        self.database_path = Some(path);
        self.database_url = None;
    }

    /// Open the URL database: `database_url` if set, else `database_path`, else the XDG default.
    pub async fn open_db(&self) -> Result<UrlDb> {
        if let Some(uri) = &self.database_url {
            tracing::debug!("opening database from {}", DATABASE_URL_ENV);
            return UrlDb::open_url(uri, self.max_connections).await;
        }
        let path = match &self.database_path {
            Some(p) => p.clone(),
            None => UrlDb::default_path()?,
        };
        tracing::debug!("opening database at {}", path.display());
        UrlDb::open_at(path, self.max_connections).await
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("page-analyzer")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Non-empty, trimmed `DATABASE_URL`.
fn database_url_from_env() -> Option<String> {
    std::env::var(DATABASE_URL_ENV)
        .ok()
        .map(|uri| uri.trim().to_string())
        .filter(|uri| !uri.is_empty())
}

/// Load configuration from disk, creating a default file if none exists.
/// `DATABASE_URL` from the environment is applied on top.
pub fn load_or_init() -> Result<AnalyzerConfig> {
    let path = config_path()?;
    let mut cfg = if path.exists() {
        let data = fs::read_to_string(&path)?;
        toml::from_str::<AnalyzerConfig>(&data)?
    } else {
        let default_cfg = AnalyzerConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        default_cfg
    };
    cfg.database_url = database_url_from_env();
    Ok(cfg)
}
