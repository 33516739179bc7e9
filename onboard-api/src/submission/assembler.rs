//! Record assembly
//!
//! Builds one [`EmployeeRecord`] from a [`RawSubmission`]. Pure and total:
//! missing fields become `None`, missing documents become `None`, skipped
//! group entries are simply left out.

use super::groups::{
    GroupCollector, GroupEntry, ADDITIONAL_EDUCATION, EDUCATION, EXPERIENCE, INSURANCE,
};
use super::{FieldTable, RawSubmission};
use crate::models::{
    Address, BankInfo, ContactKind, Degree, EducationHistory, EmergencyContact, EmployeeRecord,
    InsurancePolicy, Intermediate, SecondarySchool, WorkExperience,
};

/// Top-level document slots
pub const ID_PROOF_SLOT: &str = "idProof";
pub const RESUME_SLOT: &str = "resume";
pub const SIGNED_DOCUMENT_SLOT: &str = "signedDocument";

/// Assemble the employee record for one submission
pub fn assemble_record(submission: &RawSubmission) -> EmployeeRecord {
    let fields = FieldTable::from_fields(&submission.fields);
    let groups = GroupCollector::new(&fields, &submission.files);
    let files = groups.files();

    EmployeeRecord {
        first_name: fields.text("firstName"),
        last_name: fields.text("lastName"),
        date_of_birth: fields.text("dateOfBirth"),
        gender: fields.text("gender"),
        marital_status: fields.text("maritalStatus"),
        personal_email: fields.text("personalEmail"),
        phone: fields.text("phone"),
        alternate_phone: fields.text("alternatePhone"),
        nationality: fields.text("nationality"),
        permanent_address: address(&fields, "permanent"),
        current_address: address(&fields, "current"),
        emergency_contacts: [
            emergency_contact(&groups.emergency_contact(1), ContactKind::Primary),
            emergency_contact(&groups.emergency_contact(2), ContactKind::Secondary),
        ],
        education_history: education_history(&groups),
        work_experience: groups.collect(&EXPERIENCE).iter().map(work_experience).collect(),
        insurance_info: groups.collect(&INSURANCE).iter().map(insurance_policy).collect(),
        bank_info: bank_info(&fields),
        id_proof_path: files.resolve(ID_PROOF_SLOT),
        resume_path: files.resolve(RESUME_SLOT),
        signed_document_path: files.resolve(SIGNED_DOCUMENT_SLOT),
        agreed_terms: fields.is_truthy("agreeTerms"),
        agreed_privacy: fields.is_truthy("agreePrivacy"),
        signature_date: fields.text("signatureDate"),
    }
}

/// `{prefix}Street`, `{prefix}City`, ... e.g. `permanentZip`
fn address(fields: &FieldTable, prefix: &str) -> Address {
    let part = |name: &str| fields.text(format!("{}{}", prefix, name));
    Address {
        street: part("Street"),
        city: part("City"),
        state: part("State"),
        zip: part("Zip"),
        country: part("Country"),
    }
}

fn emergency_contact(entry: &GroupEntry<'_>, kind: ContactKind) -> EmergencyContact {
    EmergencyContact {
        kind,
        name: entry.text("Name"),
        relationship: entry.text("Relationship"),
        phone: entry.text("Phone"),
        email: entry.text("Email"),
    }
}

fn education_history(groups: &GroupCollector<'_>) -> EducationHistory {
    let ssc = groups.fixed_slot(EDUCATION, "ssc");
    let inter = groups.fixed_slot(EDUCATION, "inter");

    EducationHistory {
        ssc: SecondarySchool {
            school: ssc.text("school"),
            year: ssc.text("year"),
            grade: ssc.text("grade"),
            certificate: ssc.file("certificate"),
        },
        inter: Intermediate {
            college: inter.text("college"),
            year: inter.text("year"),
            grade: inter.text("grade"),
            branch: inter.text("branch"),
            certificate: inter.file("certificate"),
        },
        grad: degree(&groups.fixed_slot(EDUCATION, "grad")),
        additional: groups
            .collect(&ADDITIONAL_EDUCATION)
            .iter()
            .map(degree)
            .collect(),
    }
}

fn degree(entry: &GroupEntry<'_>) -> Degree {
    Degree {
        college: entry.text("college"),
        year: entry.text("year"),
        grade: entry.text("grade"),
        degree: entry.text("degree"),
        branch: entry.text("branch"),
        certificate: entry.file("certificate"),
    }
}

fn work_experience(entry: &GroupEntry<'_>) -> WorkExperience {
    WorkExperience {
        company: entry.text("company"),
        job_title: entry.text("jobTitle"),
        start_date: entry.text("startDate"),
        end_date: entry.text("endDate"),
        current_job: entry.flag("currentJob"),
        employee_id: entry.text("employeeId"),
        supervisor_name: entry.text("supervisorName"),
        description: entry.text("description"),
        certificate: entry.file("certificate"),
    }
}

fn insurance_policy(entry: &GroupEntry<'_>) -> InsurancePolicy {
    InsurancePolicy {
        provider: entry.text("provider"),
        policy_number: entry.text("policyNumber"),
        coverage_type: entry.text("coverageType"),
        expiration_date: entry.text("expirationDate"),
        document: entry.file("document"),
    }
}

fn bank_info(fields: &FieldTable) -> BankInfo {
    BankInfo {
        bank_name: fields.text("bankName"),
        account_name: fields.text("accountName"),
        account_number: fields.text("accountNumber"),
        routing_number: fields.text("routingNumber"),
        iban: fields.text("iban"),
        bank_address: fields.text("bankAddress"),
    }
}
