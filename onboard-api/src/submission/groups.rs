//! Collection of repeated form sections
//!
//! Fixed-position groups (the three education slots, the two emergency
//! contacts) always yield their slot. Variable-position groups are read
//! at indices `0..cap` only; an index is kept when its presence field is
//! non-empty, and the whole group is skipped when its gate flag is not
//! truthy. Entries come back in ascending index order with no gaps.

use tracing::debug;

use super::field_path::{FieldKey, FieldPath, Segment};
use super::file_slots::{FileSlots, UploadedFile};
use super::FieldTable;

/// Layout of a variable-position group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupSpec {
    /// Base field name, e.g. `experience`
    pub name: &'static str,
    /// Number of candidate indices read, starting at 0
    pub cap: usize,
    /// Sub-key that must be non-empty for an entry to be kept
    pub presence_key: &'static str,
    /// Top-level flag that enables the group, if any
    pub gate: Option<&'static str>,
}

pub const ADDITIONAL_EDUCATION: GroupSpec = GroupSpec {
    name: "additionalEducation",
    cap: 2,
    presence_key: "college",
    gate: None,
};

pub const EXPERIENCE: GroupSpec = GroupSpec {
    name: "experience",
    cap: 3,
    presence_key: "company",
    gate: Some("hasExperience"),
};

pub const INSURANCE: GroupSpec = GroupSpec {
    name: "insurance",
    cap: 3,
    presence_key: "provider",
    gate: Some("hasInsurance"),
};

/// Base name of the fixed education slots (`education[ssc][...]`, ...)
pub const EDUCATION: &str = "education";

/// Flat-key prefix of emergency contacts (`emergencyName1`, ...)
pub const EMERGENCY_CONTACT: &str = "emergency";

/// How an entry's sub-fields are named in the submission
#[derive(Debug, Clone, PartialEq, Eq)]
enum SlotNaming {
    /// `prefix[sub]`, e.g. `experience[0]` + `company`
    Bracketed(FieldPath),
    /// `{prefix}{Sub}{position}`, e.g. `emergency` + `Name` + `1`
    Suffixed {
        prefix: &'static str,
        position: usize,
    },
}

/// One entry of a group, read lazily from the submission
#[derive(Debug, Clone)]
pub struct GroupEntry<'a> {
    naming: SlotNaming,
    fields: &'a FieldTable,
    files: FileSlots<'a>,
}

impl<'a> GroupEntry<'a> {
    fn key_for(&self, sub_key: &str) -> FieldKey {
        match &self.naming {
            SlotNaming::Bracketed(prefix) => prefix.clone().key(sub_key).into(),
            SlotNaming::Suffixed { prefix, position } => {
                FieldKey::Plain(format!("{}{}{}", prefix, sub_key, position))
            }
        }
    }

    /// Index of a variable-position entry, `None` for fixed slots
    pub fn index(&self) -> Option<usize> {
        match &self.naming {
            SlotNaming::Bracketed(prefix) => match prefix.segments().last() {
                Some(Segment::Index(index)) => Some(*index),
                _ => None,
            },
            SlotNaming::Suffixed { .. } => None,
        }
    }

    /// Verbatim text value of a sub-field
    pub fn text(&self, sub_key: &str) -> Option<String> {
        self.fields.text(self.key_for(sub_key))
    }

    /// Checkbox-style sub-field coerced through [`super::is_truthy`]
    pub fn flag(&self, sub_key: &str) -> bool {
        self.fields.is_truthy(self.key_for(sub_key))
    }

    /// Stored path of the document uploaded for a file-typed sub-field,
    /// matched on the fully qualified field name
    pub fn file(&self, sub_key: &str) -> Option<String> {
        self.files.resolve(&self.key_for(sub_key).to_string())
    }

    fn is_present(&self, presence_key: &str) -> bool {
        self.fields.is_truthy(self.key_for(presence_key))
    }
}

/// Walks a parsed submission and hands out group entries
pub struct GroupCollector<'a> {
    fields: &'a FieldTable,
    files: FileSlots<'a>,
}

impl<'a> GroupCollector<'a> {
    pub fn new(fields: &'a FieldTable, files: &'a [UploadedFile]) -> Self {
        Self {
            fields,
            files: FileSlots::new(files),
        }
    }

    pub fn files(&self) -> FileSlots<'a> {
        self.files
    }

    /// Named slot of a fixed group, e.g. `education[ssc]`. Always present.
    pub fn fixed_slot(&self, group: &str, slot: &str) -> GroupEntry<'a> {
        self.entry(SlotNaming::Bracketed(FieldPath::new(group).key(slot)))
    }

    /// Emergency contact at 1-based `position`. Always present.
    pub fn emergency_contact(&self, position: usize) -> GroupEntry<'a> {
        self.entry(SlotNaming::Suffixed {
            prefix: EMERGENCY_CONTACT,
            position,
        })
    }

    /// Entries of a variable-position group, at most `group.cap` of them
    pub fn collect(&self, group: &GroupSpec) -> Vec<GroupEntry<'a>> {
        if let Some(gate) = group.gate {
            if !self.fields.is_truthy(gate) {
                debug!("{} skipped: gate flag {} not set", group.name, gate);
                return Vec::new();
            }
        }

        (0..group.cap)
            .map(|index| self.entry(SlotNaming::Bracketed(FieldPath::new(group.name).index(index))))
            .filter(|entry| {
                let present = entry.is_present(group.presence_key);
                if !present {
                    debug!(
                        "{}[{}] skipped: {} is empty",
                        group.name,
                        entry.index().unwrap_or_default(),
                        group.presence_key
                    );
                }
                present
            })
            .collect()
    }

    fn entry(&self, naming: SlotNaming) -> GroupEntry<'a> {
        GroupEntry {
            naming,
            fields: self.fields,
            files: self.files,
        }
    }
}
