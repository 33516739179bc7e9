//! Bracket-indexed field name parsing
//!
//! Form fields for repeated sections arrive with names such as
//! `experience[0][company]` or `education[ssc][school]`. They are decoded
//! once, up front, into a [`FieldKey`] so the rest of the pipeline never
//! does string surgery on field names.
//!
//! Grammar: a non-empty base identifier followed by one or more bracketed
//! segments. A segment holding a canonical base-10 number (`0`, `7`, `12`,
//! never `07`) is an index; any other non-empty content is a literal key.
//! Anything that does not match is a plain scalar key, never an error.

use std::fmt;

/// One bracketed segment of a field path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Zero-based position, e.g. the `1` in `insurance[1][provider]`
    Index(usize),
    /// Literal sub-key, e.g. `ssc` or `provider`
    Key(String),
}

impl Segment {
    fn parse(content: &str) -> Self {
        if is_canonical_index(content) {
            if let Ok(index) = content.parse::<usize>() {
                return Segment::Index(index);
            }
        }
        Segment::Key(content.to_string())
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Index(index) => write!(f, "[{}]", index),
            Segment::Key(key) => write!(f, "[{}]", key),
        }
    }
}

/// Leading zeros stay literal so `a[01]` re-serializes unchanged
fn is_canonical_index(content: &str) -> bool {
    !content.is_empty()
        && content.bytes().all(|b| b.is_ascii_digit())
        && (content.len() == 1 || !content.starts_with('0'))
}

/// A base name plus its bracketed segments
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    base: String,
    segments: Vec<Segment>,
}

impl FieldPath {
    /// Start a path at `base`; add segments with [`index`](Self::index)
    /// and [`key`](Self::key)
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            segments: Vec::new(),
        }
    }

    pub fn index(mut self, index: usize) -> Self {
        self.segments.push(Segment::Index(index));
        self
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.segments.push(Segment::Key(key.into()));
        self
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Parse a bracketed field name; `None` when it does not match the grammar
    pub fn parse(raw: &str) -> Option<Self> {
        let open = raw.find('[')?;
        let base = &raw[..open];
        if base.is_empty() || base.contains(']') {
            return None;
        }

        let mut segments = Vec::new();
        let mut rest = &raw[open..];
        while !rest.is_empty() {
            let inner = rest.strip_prefix('[')?;
            let close = inner.find(']')?;
            let content = &inner[..close];
            if content.is_empty() || content.contains('[') {
                return None;
            }
            segments.push(Segment::parse(content));
            rest = &inner[close + 1..];
        }

        Some(Self {
            base: base.to_string(),
            segments,
        })
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)?;
        for segment in &self.segments {
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

/// A submitted field name after classification
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKey {
    /// Flat scalar such as `firstName`, or any name that failed the grammar
    Plain(String),
    /// Bracketed name with at least one segment
    Path(FieldPath),
}

impl FieldKey {
    /// Classify a raw field name. Total: malformed names become `Plain`.
    pub fn parse(raw: &str) -> Self {
        match FieldPath::parse(raw) {
            Some(path) => FieldKey::Path(path),
            None => FieldKey::Plain(raw.to_string()),
        }
    }

    pub fn as_path(&self) -> Option<&FieldPath> {
        match self {
            FieldKey::Path(path) => Some(path),
            FieldKey::Plain(_) => None,
        }
    }
}

impl From<&str> for FieldKey {
    fn from(raw: &str) -> Self {
        FieldKey::parse(raw)
    }
}

impl From<String> for FieldKey {
    fn from(raw: String) -> Self {
        FieldKey::parse(&raw)
    }
}

impl From<FieldPath> for FieldKey {
    fn from(path: FieldPath) -> Self {
        if path.segments.is_empty() {
            FieldKey::Plain(path.base)
        } else {
            FieldKey::Path(path)
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKey::Plain(raw) => f.write_str(raw),
            FieldKey::Path(path) => write!(f, "{}", path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_index_and_key_segments() {
        let path = FieldPath::parse("experience[2][company]").unwrap();

        assert_eq!(
            path.segments(),
            &[Segment::Index(2), Segment::Key("company".to_string())]
        );
        assert_eq!(path, FieldPath::new("experience").index(2).key("company"));
    }

    #[test]
    fn test_parse_named_slot() {
        let path = FieldPath::parse("education[ssc][school]").unwrap();

        assert_eq!(
            path,
            FieldPath::new("education").key("ssc").key("school")
        );
    }

    #[test]
    fn test_parse_single_segment() {
        let path = FieldPath::parse("tags[0]").unwrap();
        assert_eq!(path, FieldPath::new("tags").index(0));
    }

    #[test]
    fn test_leading_zero_stays_literal() {
        let path = FieldPath::parse("insurance[01][provider]").unwrap();

        assert_eq!(path.segments()[0], Segment::Key("01".to_string()));
        assert_ne!(path, FieldPath::new("insurance").index(1).key("provider"));
    }

    #[test]
    fn test_index_overflow_stays_literal() {
        let raw = "rows[99999999999999999999999999][x]";
        let path = FieldPath::parse(raw).unwrap();

        assert!(matches!(path.segments()[0], Segment::Key(_)));
        assert_eq!(path.to_string(), raw);
    }

    #[test]
    fn test_no_nesting_limit() {
        let path = FieldPath::parse("a[0][b][1][c][2][d]").unwrap();
        assert_eq!(path.segments().len(), 6);
    }

    #[test]
    fn test_plain_keys() {
        assert_eq!(FieldKey::parse("firstName"), FieldKey::Plain("firstName".to_string()));
        assert_eq!(FieldKey::parse(""), FieldKey::Plain(String::new()));
    }

    #[test]
    fn test_malformed_keys_become_plain() {
        for raw in [
            "[0][college]",
            "education[",
            "education[]",
            "education[ssc",
            "education[ssc]school",
            "education[ssc][",
            "education[[0]]",
            "educa]tion[0]",
            "education[ssc]]",
        ] {
            assert_eq!(
                FieldKey::parse(raw),
                FieldKey::Plain(raw.to_string()),
                "{} should be plain",
                raw
            );
        }
    }

    #[test]
    fn test_round_trip_reconstructs_key() {
        for raw in [
            "education[ssc][school]",
            "education[grad][certificate]",
            "additionalEducation[0][college]",
            "additionalEducation[1][certificate]",
            "experience[2][currentJob]",
            "insurance[10][policyNumber]",
            "insurance[01][provider]",
            "a[b c][d-e]",
            "x[0]",
        ] {
            let key = FieldKey::parse(raw);
            assert!(key.as_path().is_some(), "{} should parse as a path", raw);
            assert_eq!(key.to_string(), raw);
        }
    }

    #[test]
    fn test_parse_is_deterministic() {
        let raw = "experience[1][jobTitle]";
        assert_eq!(FieldKey::parse(raw), FieldKey::parse(raw));
    }

    #[test]
    fn test_builder_without_segments_is_plain_key() {
        let key = FieldKey::from(FieldPath::new("hasExperience"));
        assert_eq!(key, FieldKey::Plain("hasExperience".to_string()));
    }

    #[test]
    fn test_builder_matches_parsed_key() {
        let built = FieldKey::from(FieldPath::new("experience").index(0).key("company"));
        assert_eq!(built, FieldKey::from("experience[0][company]"));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_segment() -> impl Strategy<Value = Segment> {
            prop_oneof![
                (0usize..10_000).prop_map(Segment::Index),
                "[a-zA-Z_][a-zA-Z0-9_ -]{0,8}".prop_map(Segment::Key),
            ]
        }

        fn arb_path() -> impl Strategy<Value = FieldPath> {
            (
                "[a-zA-Z][a-zA-Z0-9_]{0,10}",
                prop::collection::vec(arb_segment(), 1..5),
            )
                .prop_map(|(base, segments)| FieldPath { base, segments })
        }

        proptest! {
            #[test]
            fn any_name_reserializes_unchanged(raw in ".*") {
                prop_assert_eq!(FieldKey::parse(&raw).to_string(), raw);
            }

            /// Bracket-dense names hit the malformed branches far more often
            #[test]
            fn bracket_heavy_name_reserializes_unchanged(raw in "[a-z0-9\\[\\]]{0,12}") {
                prop_assert_eq!(FieldKey::parse(&raw).to_string(), raw);
            }

            #[test]
            fn built_path_parses_back(path in arb_path()) {
                let raw = path.to_string();
                prop_assert_eq!(FieldPath::parse(&raw), Some(path));
            }

            #[test]
            fn canonical_number_is_index(index in any::<usize>()) {
                let path = FieldPath::parse(&format!("group[{}][key]", index));
                prop_assert_eq!(path, Some(FieldPath::new("group").index(index).key("key")));
            }
        }
    }
}
