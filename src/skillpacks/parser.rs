//! SKILL.md file parser.

use super::error::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::{
    self, Deserialize, Deserializer, EnumAccess, MapAccess, SeqAccess, VariantAccess, Visitor,
};
use std::collections::BTreeMap;
use std::fmt;

/// Leading `---` block. The closing marker only has to start a line.
static FRONTMATTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\A---\n(.*?)\n---").expect("frontmatter pattern is valid"));

/// SKILL.md split into its metadata block and body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frontmatter<'a> {
    /// Text between the markers
    pub yaml: &'a str,
    /// Everything after the closing marker
    pub body: &'a str,
}

/// Convert `\r\n` and lone `\r` line endings to `\n`
pub fn normalize_newlines(content: &str) -> String {
    content.replace("\r\n", "\n").replace('\r', "\n")
}

/// Split a manifest into frontmatter and body.
///
/// Returns `None` when the content does not open with a `---` block.
pub fn split_frontmatter(content: &str) -> Option<Frontmatter<'_>> {
    let caps = FRONTMATTER_RE.captures(content)?;
    let whole = caps.get(0)?;
    let yaml = caps.get(1)?.as_str();
    Some(Frontmatter {
        yaml,
        body: &content[whole.end()..],
    })
}

/// A metadata value: text, nested mapping, or list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaValue {
    String(String),
    Mapping(Metadata),
    Sequence(Vec<MetaValue>),
}

impl MetaValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetaValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetaValue::String(s) => write!(f, "{}", s),
            MetaValue::Sequence(items) => {
                let parts: Vec<String> = items.iter().map(|i| i.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            MetaValue::Mapping(map) => write!(f, "{}", map),
        }
    }
}

/// Float text with a trailing `.0` for whole numbers, `inf` and `nan` spelled out
fn float_text(v: f64) -> String {
    if v.is_nan() {
        "nan".to_string()
    } else if v.is_infinite() {
        let text = if v > 0.0 { "inf" } else { "-inf" };
        text.to_string()
    } else if v.fract() == 0.0 && v.abs() < 1e16 {
        format!("{:.1}", v)
    } else {
        v.to_string()
    }
}

struct MetaValueVisitor;

// Scalars become text: booleans as `True`/`False`, null as `None`.
// Repeated mapping keys keep the last value. Tags are dropped.
impl<'de> Visitor<'de> for MetaValueVisitor {
    type Value = MetaValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a YAML value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<MetaValue, E> {
        Ok(MetaValue::String(if v { "True" } else { "False" }.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<MetaValue, E> {
        Ok(MetaValue::String(v.to_string()))
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<MetaValue, E> {
        Ok(MetaValue::String(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<MetaValue, E> {
        Ok(MetaValue::String(v.to_string()))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<MetaValue, E> {
        Ok(MetaValue::String(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<MetaValue, E> {
        Ok(MetaValue::String(float_text(v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<MetaValue, E> {
        Ok(MetaValue::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<MetaValue, E> {
        Ok(MetaValue::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<MetaValue, E> {
        Ok(MetaValue::String("None".to_string()))
    }

    fn visit_none<E: de::Error>(self) -> Result<MetaValue, E> {
        self.visit_unit()
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<MetaValue, D::Error> {
        MetaValue::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<MetaValue, A::Error> {
        let mut items = Vec::new();
        while let Some(item) = seq.next_element::<MetaValue>()? {
            items.push(item);
        }
        Ok(MetaValue::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<MetaValue, A::Error> {
        let mut entries = BTreeMap::new();
        while let Some((key, value)) = map.next_entry::<MetaValue, MetaValue>()? {
            entries.insert(key.to_string(), value);
        }
        Ok(MetaValue::Mapping(Metadata { entries }))
    }

    fn visit_enum<A: EnumAccess<'de>>(self, data: A) -> Result<MetaValue, A::Error> {
        let (_tag, variant) = data.variant::<String>()?;
        variant.newtype_variant::<MetaValue>()
    }
}

impl<'de> Deserialize<'de> for MetaValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MetaValueVisitor)
    }
}

/// Parsed frontmatter mapping. Unknown keys are kept, never rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: BTreeMap<String, MetaValue>,
}

impl Metadata {
    /// Parse the text of a frontmatter block into a mapping
    pub fn parse(yaml: &str) -> Result<Self, ValidationError> {
        let value: MetaValue = serde_yaml::from_str(yaml)
            .map_err(|e| ValidationError::MetadataSyntaxError(e.to_string()))?;

        match value {
            MetaValue::Mapping(map) => Ok(map),
            _ => Err(ValidationError::MetadataNotAMapping),
        }
    }

    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &MetaValue)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .entries
            .iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_frontmatter() {
        let content = r#"---
name: safe-file-reader
description: Read files without making changes
---

Only inspect files; do not modify.
"#;
        let fm = split_frontmatter(content).unwrap();
        assert_eq!(
            fm.yaml,
            "name: safe-file-reader\ndescription: Read files without making changes"
        );
        assert_eq!(fm.body, "\n\nOnly inspect files; do not modify.\n");
    }

    #[test]
    fn test_normalize_newlines() {
        assert_eq!(normalize_newlines("---\r\nname: a\r\n---\rbody"), "---\nname: a\n---\nbody");
        assert_eq!(normalize_newlines("plain\n"), "plain\n");
    }

    #[test]
    fn test_split_requires_leading_marker() {
        assert!(split_frontmatter("# Title\n---\nname: x\n---\n").is_none());
        assert!(split_frontmatter("---\nname: x\n").is_none());
        assert!(split_frontmatter("").is_none());
    }

    #[test]
    fn test_split_stops_at_first_closing_marker() {
        let content = "---\nname: a\n---\nbody\n---\nmore\n";
        let fm = split_frontmatter(content).unwrap();
        assert_eq!(fm.yaml, "name: a");
        assert_eq!(fm.body, "\nbody\n---\nmore\n");
    }

    #[test]
    fn test_parse_nested_values() {
        let yaml = r#"name: test-skill
description: A test skill
allowed-tools:
  - Read
  - Write
metadata:
  owner: docs-team
  version: 3
"#;
        let meta = Metadata::parse(yaml).unwrap();
        assert_eq!(meta.len(), 4);
        assert_eq!(meta.get("name").and_then(|v| v.as_str()), Some("test-skill"));
        assert_eq!(
            meta.get("allowed-tools"),
            Some(&MetaValue::Sequence(vec![
                MetaValue::String("Read".to_string()),
                MetaValue::String("Write".to_string()),
            ]))
        );
        let MetaValue::Mapping(inner) = meta.get("metadata").unwrap() else {
            panic!("expected mapping");
        };
        assert_eq!(inner.get("version").and_then(|v| v.as_str()), Some("3"));
    }

    #[test]
    fn test_scalars_become_text() {
        let meta =
            Metadata::parse("name: 123\nflag: true\noff: false\nempty:\nratio: 2.0\n").unwrap();
        assert_eq!(meta.get("name").unwrap().to_string(), "123");
        assert_eq!(meta.get("flag").unwrap().to_string(), "True");
        assert_eq!(meta.get("off").unwrap().to_string(), "False");
        assert_eq!(meta.get("empty").unwrap().to_string(), "None");
        assert_eq!(meta.get("ratio").unwrap().to_string(), "2.0");
    }

    #[test]
    fn test_duplicate_keys_keep_last() {
        let meta = Metadata::parse("name: first\ndescription: d\nname: second\n").unwrap();
        assert_eq!(meta.len(), 2);
        assert_eq!(meta.get("name").and_then(|v| v.as_str()), Some("second"));
    }

    #[test]
    fn test_tags_are_dropped() {
        let meta = Metadata::parse("name: !custom my-skill\n").unwrap();
        assert_eq!(meta.get("name").and_then(|v| v.as_str()), Some("my-skill"));
    }

    #[test]
    fn test_empty_block_is_not_a_mapping() {
        assert_eq!(Metadata::parse(""), Err(ValidationError::MetadataNotAMapping));
    }

    #[test]
    fn test_non_mapping_rejected() {
        assert_eq!(
            Metadata::parse("- a\n- b"),
            Err(ValidationError::MetadataNotAMapping)
        );
        assert_eq!(
            Metadata::parse("just words"),
            Err(ValidationError::MetadataNotAMapping)
        );
    }

    #[test]
    fn test_syntax_error_keeps_parser_message() {
        let err = Metadata::parse("name: [unclosed").unwrap_err();
        match err {
            ValidationError::MetadataSyntaxError(msg) => assert!(!msg.is_empty()),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_sequence_display() {
        let value = MetaValue::Sequence(vec![MetaValue::String("a".to_string())]);
        assert_eq!(value.to_string(), "[a]");
    }
}
