//! Persistence gateway
//!
//! Stores one assembled [`EmployeeRecord`] per call. Each insert is a
//! single statement, so a failure leaves nothing behind. Failures are
//! returned as-is; there is no retry.

pub mod employees;

pub use employees::SqliteRecordStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{EmployeeRecord, PersistedRecord};

/// Why the record store could not complete a write or read
#[derive(Debug, Error)]
pub enum PersistenceFailure {
    /// Store unreachable or the pool is gone
    #[error("record store unavailable: {0}")]
    Connectivity(String),

    /// Row rejected by a schema constraint
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// A structured column could not be encoded or decoded
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Any other store-level error
    #[error("record store error: {0}")]
    Other(String),
}

impl From<sqlx::Error> for PersistenceFailure {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Configuration(_) => PersistenceFailure::Connectivity(err.to_string()),
            sqlx::Error::Database(ref db_err)
                if !matches!(db_err.kind(), sqlx::error::ErrorKind::Other) =>
            {
                PersistenceFailure::Constraint(err.to_string())
            }
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) | sqlx::Error::Encode(_) => {
                PersistenceFailure::Other(format!("value conversion: {}", err))
            }
            other => PersistenceFailure::Other(other.to_string()),
        }
    }
}

/// Long-lived handle to wherever employee records are kept
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Store a finalized record, returning its new identifier
    async fn insert_employee(&self, record: EmployeeRecord) -> Result<i64, PersistenceFailure>;

    /// Read a stored record back, `None` for an unknown identifier
    async fn load_employee(&self, id: i64) -> Result<Option<PersistedRecord>, PersistenceFailure>;
}
