//! # Onboard Common Library
//!
//! Shared code for the onboarding service including:
//! - Error types
//! - Configuration loading and root folder resolution
//! - Database initialization
//! - Timestamp helpers

pub mod config;
pub mod db;
pub mod error;
pub mod time;

pub use error::{Error, Result};
