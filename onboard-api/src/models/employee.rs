//! The assembled onboarding record and its sub-objects
//!
//! Sub-objects serialize with the camelCase keys stored in the JSON
//! columns. Every declared key is always written, `null` when the form
//! left it out.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Postal address (permanent or current)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactKind {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyContact {
    #[serde(rename = "type")]
    pub kind: ContactKind,
    pub name: Option<String>,
    pub relationship: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Secondary school certificate slot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondarySchool {
    pub school: Option<String>,
    pub year: Option<String>,
    pub grade: Option<String>,
    pub certificate: Option<String>,
}

/// Intermediate (higher secondary) slot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intermediate {
    pub college: Option<String>,
    pub year: Option<String>,
    pub grade: Option<String>,
    pub branch: Option<String>,
    pub certificate: Option<String>,
}

/// Graduation slot and additional degrees share this shape
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Degree {
    pub college: Option<String>,
    pub year: Option<String>,
    pub grade: Option<String>,
    pub degree: Option<String>,
    pub branch: Option<String>,
    pub certificate: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationHistory {
    pub ssc: SecondarySchool,
    pub inter: Intermediate,
    pub grad: Degree,
    /// At most 2 entries
    pub additional: Vec<Degree>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperience {
    pub company: Option<String>,
    pub job_title: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub current_job: bool,
    pub employee_id: Option<String>,
    pub supervisor_name: Option<String>,
    pub description: Option<String>,
    pub certificate: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsurancePolicy {
    pub provider: Option<String>,
    pub policy_number: Option<String>,
    pub coverage_type: Option<String>,
    pub expiration_date: Option<String>,
    pub document: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankInfo {
    pub bank_name: Option<String>,
    pub account_name: Option<String>,
    pub account_number: Option<String>,
    pub routing_number: Option<String>,
    pub iban: Option<String>,
    pub bank_address: Option<String>,
}

/// One finalized onboarding submission, ready to persist
///
/// Scalar values are copied verbatim from the form; no format checks are
/// applied to emails, phones or dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub marital_status: Option<String>,
    pub personal_email: Option<String>,
    pub phone: Option<String>,
    pub alternate_phone: Option<String>,
    pub nationality: Option<String>,
    pub permanent_address: Address,
    pub current_address: Address,
    /// Primary then secondary
    pub emergency_contacts: [EmergencyContact; 2],
    pub education_history: EducationHistory,
    /// At most 3 entries, empty unless `hasExperience` was set
    pub work_experience: Vec<WorkExperience>,
    /// At most 3 entries, empty unless `hasInsurance` was set
    pub insurance_info: Vec<InsurancePolicy>,
    pub bank_info: BankInfo,
    pub id_proof_path: Option<String>,
    pub resume_path: Option<String>,
    pub signed_document_path: Option<String>,
    pub agreed_terms: bool,
    pub agreed_privacy: bool,
    pub signature_date: Option<String>,
}

/// A stored employee row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedRecord {
    pub id: i64,
    pub created_at: NaiveDateTime,
    #[serde(flatten)]
    pub record: EmployeeRecord,
}
