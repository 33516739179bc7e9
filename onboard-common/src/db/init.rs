//! Database initialization
//!
//! Opens (or creates) the SQLite database and ensures the `employees`
//! table exists. Safe to call on every startup.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // WAL lets readers proceed while a submission is being written
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&pool)
        .await?;

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&pool)
        .await?;

    create_employees_table(&pool).await?;

    Ok(pool)
}

/// Open a private in-memory database with the full schema
///
/// A single connection is used so every query sees the same database.
pub async fn init_memory_database() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;

    create_employees_table(&pool).await?;

    Ok(pool)
}

/// Create the employees table
///
/// Structured sub-objects (addresses, contacts, education, experience,
/// insurance, bank info) are stored as JSON text.
pub async fn create_employees_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT,
            last_name TEXT,
            date_of_birth TEXT,
            gender TEXT,
            marital_status TEXT,
            personal_email TEXT,
            phone TEXT,
            alternate_phone TEXT,
            nationality TEXT,
            permanent_address TEXT NOT NULL,
            current_address TEXT NOT NULL,
            emergency_contacts TEXT NOT NULL,
            education_history TEXT NOT NULL,
            work_experience TEXT NOT NULL,
            insurance_info TEXT NOT NULL,
            bank_info TEXT NOT NULL,
            id_proof_path TEXT,
            resume_path TEXT,
            signed_document_path TEXT,
            agreed_terms INTEGER NOT NULL DEFAULT 0,
            agreed_privacy INTEGER NOT NULL DEFAULT 0,
            signature_date TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    info!("Table \"employees\" is ready");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_database_has_employees_table() {
        let pool = init_memory_database().await.unwrap();

        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'employees'",
        )
        .fetch_one(&pool)
        .await
        .unwrap();

        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_create_employees_table_is_idempotent() {
        let pool = init_memory_database().await.unwrap();

        create_employees_table(&pool).await.unwrap();
        create_employees_table(&pool).await.unwrap();

        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(rows, 0);
    }
}
