//! Form-to-record assembly pipeline
//!
//! raw submission → parsed field keys → collected groups → assembled record
//!
//! Nothing in this module performs I/O; the result is handed to
//! [`crate::db::RecordStore`] for persistence.

pub mod assembler;
pub mod field_path;
pub mod file_slots;
pub mod groups;

pub use assembler::assemble_record;
pub use field_path::{FieldKey, FieldPath, Segment};
pub use file_slots::{resolve_slot, FileSlots, UploadedFile};
pub use groups::{GroupCollector, GroupEntry, GroupSpec};

use std::collections::HashMap;

/// One onboarding form as delivered by the receiver
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSubmission {
    pub fields: HashMap<String, String>,
    pub files: Vec<UploadedFile>,
}

impl RawSubmission {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn with_file(mut self, field_name: impl Into<String>, stored_path: impl Into<String>) -> Self {
        self.files.push(UploadedFile::new(field_name, stored_path));
        self
    }
}

/// Truthiness of a form value: present and non-empty.
///
/// Used for checkboxes (`agreeTerms`, `currentJob`), gate flags and
/// presence fields alike.
pub fn is_truthy(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

/// Submitted text fields keyed by their parsed [`FieldKey`]
#[derive(Debug, Clone, Default)]
pub struct FieldTable {
    values: HashMap<FieldKey, String>,
}

impl FieldTable {
    pub fn from_fields(fields: &HashMap<String, String>) -> Self {
        let values = fields
            .iter()
            .map(|(name, value)| (FieldKey::parse(name), value.clone()))
            .collect();
        Self { values }
    }

    pub fn get(&self, key: impl Into<FieldKey>) -> Option<&str> {
        self.values.get(&key.into()).map(String::as_str)
    }

    /// Owned copy of a value, verbatim
    pub fn text(&self, key: impl Into<FieldKey>) -> Option<String> {
        self.get(key).map(str::to_string)
    }

    pub fn is_truthy(&self, key: impl Into<FieldKey>) -> bool {
        is_truthy(self.get(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(None));
        assert!(!is_truthy(Some("")));
        assert!(is_truthy(Some("on")));
        assert!(is_truthy(Some("0")));
        assert!(is_truthy(Some("false")));
        assert!(is_truthy(Some(" ")));
    }

    #[test]
    fn test_field_table_lookup_by_path_and_name() {
        let submission = RawSubmission::new()
            .with_field("firstName", "Jane")
            .with_field("experience[1][company]", "Initech");
        let table = FieldTable::from_fields(&submission.fields);

        assert_eq!(table.get("firstName"), Some("Jane"));
        assert_eq!(
            table.get(FieldPath::new("experience").index(1).key("company")),
            Some("Initech")
        );
        assert_eq!(table.get("experience[0][company]"), None);
    }

    #[test]
    fn test_field_table_keeps_malformed_names_as_scalars() {
        let submission = RawSubmission::new().with_field("notes[", "kept");
        let table = FieldTable::from_fields(&submission.fields);

        assert_eq!(table.get(FieldKey::Plain("notes[".to_string())), Some("kept"));
    }
}
