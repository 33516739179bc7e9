//! Errors raised while bootstrapping the onboarding service
//!
//! Covers the work done outside a request: reading configuration,
//! preparing the root folder and opening the database. Upload writes reuse
//! the `Io` variant.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Opening or migrating the SQLite database failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Root folder, uploads directory or upload file could not be written
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file unreadable or not valid TOML
    #[error("Configuration error: {0}")]
    Config(String),
}
