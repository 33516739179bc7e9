//! Employee row operations on SQLite

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::debug;

use super::{PersistenceFailure, RecordStore};
use crate::models::{EmployeeRecord, PersistedRecord};

/// [`RecordStore`] backed by the shared SQLite pool
#[derive(Clone)]
pub struct SqliteRecordStore {
    pool: SqlitePool,
}

impl SqliteRecordStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Structured sub-objects encoded for their JSON text columns
struct EncodedColumns {
    permanent_address: String,
    current_address: String,
    emergency_contacts: String,
    education_history: String,
    work_experience: String,
    insurance_info: String,
    bank_info: String,
}

impl EncodedColumns {
    fn encode(record: &EmployeeRecord) -> Result<Self, serde_json::Error> {
        Ok(Self {
            permanent_address: serde_json::to_string(&record.permanent_address)?,
            current_address: serde_json::to_string(&record.current_address)?,
            emergency_contacts: serde_json::to_string(&record.emergency_contacts)?,
            education_history: serde_json::to_string(&record.education_history)?,
            work_experience: serde_json::to_string(&record.work_experience)?,
            insurance_info: serde_json::to_string(&record.insurance_info)?,
            bank_info: serde_json::to_string(&record.bank_info)?,
        })
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn insert_employee(&self, record: EmployeeRecord) -> Result<i64, PersistenceFailure> {
        // Encode everything before touching the store
        let columns = EncodedColumns::encode(&record)?;

        let result = sqlx::query(
            r#"
            INSERT INTO employees (
                first_name, last_name, date_of_birth, gender, marital_status,
                personal_email, phone, alternate_phone, nationality,
                permanent_address, current_address, emergency_contacts,
                education_history, work_experience, insurance_info, bank_info,
                id_proof_path, resume_path, signed_document_path,
                agreed_terms, agreed_privacy, signature_date
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.first_name)
        .bind(&record.last_name)
        .bind(&record.date_of_birth)
        .bind(&record.gender)
        .bind(&record.marital_status)
        .bind(&record.personal_email)
        .bind(&record.phone)
        .bind(&record.alternate_phone)
        .bind(&record.nationality)
        .bind(&columns.permanent_address)
        .bind(&columns.current_address)
        .bind(&columns.emergency_contacts)
        .bind(&columns.education_history)
        .bind(&columns.work_experience)
        .bind(&columns.insurance_info)
        .bind(&columns.bank_info)
        .bind(&record.id_proof_path)
        .bind(&record.resume_path)
        .bind(&record.signed_document_path)
        .bind(record.agreed_terms)
        .bind(record.agreed_privacy)
        .bind(&record.signature_date)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!("Inserted employee row {}", id);

        Ok(id)
    }

    async fn load_employee(&self, id: i64) -> Result<Option<PersistedRecord>, PersistenceFailure> {
        let row = sqlx::query(
            r#"
            SELECT id, first_name, last_name, date_of_birth, gender, marital_status,
                   personal_email, phone, alternate_phone, nationality,
                   permanent_address, current_address, emergency_contacts,
                   education_history, work_experience, insurance_info, bank_info,
                   id_proof_path, resume_path, signed_document_path,
                   agreed_terms, agreed_privacy, signature_date, created_at
            FROM employees
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| decode_row(&row)).transpose()
    }
}

fn decode_row(row: &SqliteRow) -> Result<PersistedRecord, PersistenceFailure> {
    let record = EmployeeRecord {
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        date_of_birth: row.try_get("date_of_birth")?,
        gender: row.try_get("gender")?,
        marital_status: row.try_get("marital_status")?,
        personal_email: row.try_get("personal_email")?,
        phone: row.try_get("phone")?,
        alternate_phone: row.try_get("alternate_phone")?,
        nationality: row.try_get("nationality")?,
        permanent_address: json_column(row, "permanent_address")?,
        current_address: json_column(row, "current_address")?,
        emergency_contacts: json_column(row, "emergency_contacts")?,
        education_history: json_column(row, "education_history")?,
        work_experience: json_column(row, "work_experience")?,
        insurance_info: json_column(row, "insurance_info")?,
        bank_info: json_column(row, "bank_info")?,
        id_proof_path: row.try_get("id_proof_path")?,
        resume_path: row.try_get("resume_path")?,
        signed_document_path: row.try_get("signed_document_path")?,
        agreed_terms: row.try_get("agreed_terms")?,
        agreed_privacy: row.try_get("agreed_privacy")?,
        signature_date: row.try_get("signature_date")?,
    };

    Ok(PersistedRecord {
        id: row.try_get("id")?,
        created_at: row.try_get("created_at")?,
        record,
    })
}

fn json_column<T: DeserializeOwned>(row: &SqliteRow, column: &str) -> Result<T, PersistenceFailure> {
    let text: String = row.try_get(column)?;
    Ok(serde_json::from_str(&text)?)
}
