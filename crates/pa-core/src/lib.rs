pub mod config;
pub mod error;
pub mod fetch_page;
pub mod limits;
pub mod logging;
pub mod repository;
pub mod url_db;
pub mod url_norm;
