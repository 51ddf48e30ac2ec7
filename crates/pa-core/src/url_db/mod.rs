//! Persistent URL store (SQLite via sqlx).
//!
//! Two tables: `urls` (one row per normalized origin, unique by name) and
//! `url_checks` (append-only history of page checks per URL).

pub mod checks;
pub mod db;
pub mod types;
pub mod urls;

pub use db::*;
pub use types::*;

#[cfg(test)]
mod tests;
