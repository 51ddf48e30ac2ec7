//! CLI for the page analyzer.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use pa_core::config;
use pa_core::repository::Repository;
use std::path::PathBuf;

use commands::{run_add, run_check, run_list, run_show};

/// Top-level CLI for the page analyzer.
#[derive(Debug, Parser)]
#[command(name = "page-analyzer")]
#[command(about = "Track sites and check their SEO metadata (status, h1, title, description)", long_about = None)]
pub struct Cli {
    /// SQLite database file (overrides `database_path` from config.toml and `DATABASE_URL`).
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Add a site. The URL is normalized to scheme://host; duplicates are reported, not re-added.
    Add {
        /// URL or bare host name (https is assumed).
        url: String,
    },

    /// List all sites, newest first, with their latest check.
    List,

    /// Show one site and its check history.
    Show {
        /// URL identifier.
        id: i64,
    },

    /// Fetch a site now and record its status, h1, title, and description.
    Check {
        /// URL identifier.
        id: i64,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let mut cfg = config::load_or_init()?;
        if let Some(db) = cli.db {
            cfg.override_database_path(db);
        }
        tracing::debug!("loaded config: {:?}", cfg);

        let db = cfg.open_db().await?;
        let repo = Repository::new(db, cfg.fetcher());

        let result = match cli.command {
            CliCommand::Add { url } => run_add(&repo, &url).await,
            CliCommand::List => run_list(&repo).await,
            CliCommand::Show { id } => run_show(&repo, id).await,
            CliCommand::Check { id } => run_check(&repo, id).await,
        };

        repo.db().close().await;
        result
    }
}

#[cfg(test)]
mod tests;
