//! Matching uploaded files to document slots
//!
//! Each slot holds at most one document. When several uploads share a
//! field name only the first one submitted is used.

use serde::{Deserialize, Serialize};

/// An uploaded file after the blob store has written it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    /// Form field the file was submitted under, e.g. `experience[0][certificate]`
    pub field_name: String,
    /// Where the blob store put it
    pub stored_path: String,
}

impl UploadedFile {
    pub fn new(field_name: impl Into<String>, stored_path: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            stored_path: stored_path.into(),
        }
    }
}

/// Stored path of the first file submitted under `field_name`
pub fn resolve_slot<'a>(files: &'a [UploadedFile], field_name: &str) -> Option<&'a str> {
    files
        .iter()
        .find(|file| file.field_name == field_name)
        .map(|file| file.stored_path.as_str())
}

/// Read-only view over a submission's uploaded files
#[derive(Debug, Clone, Copy)]
pub struct FileSlots<'a> {
    files: &'a [UploadedFile],
}

impl<'a> FileSlots<'a> {
    pub fn new(files: &'a [UploadedFile]) -> Self {
        Self { files }
    }

    /// Owned stored path for a slot, `None` when nothing was uploaded
    pub fn resolve(&self, field_name: &str) -> Option<String> {
        resolve_slot(self.files, field_name).map(str::to_string)
    }
}
