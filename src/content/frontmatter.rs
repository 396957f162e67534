//! Front-matter parsing
//!
//! A document starts with a `---` line, followed by a YAML mapping, closed by
//! a line holding `---` (or `...`). Everything after the closing line is the
//! Markdown body. A document that does not open with `---` has no
//! front-matter and its whole text is the body.

use serde::de::{self, DeserializeOwned, Deserializer, SeqAccess, Visitor};
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Why a front-matter block could not be turned into a typed record
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("front-matter block opened with `---` is never closed")]
    Unterminated,

    #[error("front-matter must be a mapping, found {0}")]
    NotAMapping(&'static str),

    #[error("invalid front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Split raw file text into the front-matter block (if any) and the body.
pub fn split(content: &str) -> Result<(Option<&str>, &str), FrontMatterError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let Some(rest) = strip_opening_line(content) else {
        return Ok((None, content));
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let marker = line.trim_end();
        if marker == "---" || marker == "..." {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Ok((Some(yaml), body));
        }
        offset += line.len();
    }

    Err(FrontMatterError::Unterminated)
}

/// Parse the front-matter of `content` into `T` and return it with the body.
///
/// Absent or empty front-matter yields `T::default()`.
pub fn parse<T>(content: &str) -> Result<(T, &str), FrontMatterError>
where
    T: DeserializeOwned + Default,
{
    let (yaml, body) = split(content)?;
    let data = match yaml {
        Some(yaml) => from_yaml(yaml)?,
        None => T::default(),
    };
    Ok((data, body))
}

fn from_yaml<T>(yaml: &str) -> Result<T, FrontMatterError>
where
    T: DeserializeOwned + Default,
{
    if yaml.trim().is_empty() {
        return Ok(T::default());
    }

    let value: serde_yaml::Value = serde_yaml::from_str(yaml)?;
    match value {
        serde_yaml::Value::Null => Ok(T::default()),
        serde_yaml::Value::Mapping(_) => Ok(serde_yaml::from_value(value)?),
        other => Err(FrontMatterError::NotAMapping(kind_of(&other))),
    }
}

fn strip_opening_line(content: &str) -> Option<&str> {
    let (first, rest) = match content.find('\n') {
        Some(pos) => (&content[..pos], &content[pos + 1..]),
        None => (content, ""),
    };
    (first.trim_end() == "---").then_some(rest)
}

fn kind_of(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "a boolean",
        serde_yaml::Value::Number(_) => "a number",
        serde_yaml::Value::String(_) => "a string",
        serde_yaml::Value::Sequence(_) => "a sequence",
        serde_yaml::Value::Mapping(_) => "a mapping",
        serde_yaml::Value::Tagged(_) => "a tagged value",
    }
}

/// Accepts any YAML scalar and keeps its text; null becomes the empty string.
///
/// Unquoted years and phone numbers come through YAML as numbers, but the
/// records store them as text.
struct ScalarVisitor;

impl<'de> Visitor<'de> for ScalarVisitor {
    type Value = String;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string, number or boolean")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(value.to_string())
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(value)
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
        Ok(value.to_string())
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(value.to_string())
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(value.to_string())
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        Ok(value.to_string())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(String::new())
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(String::new())
    }
}

struct ScalarString(String);

impl<'de> Deserialize<'de> for ScalarString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ScalarVisitor).map(ScalarString)
    }
}

/// Deserialize a scalar field as text
pub(crate) fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(ScalarVisitor)
}

/// Deserialize an optional scalar field as text; null stays `None`
pub(crate) fn optional_scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<ScalarString>::deserialize(deserializer)?.map(|s| s.0))
}

/// Deserialize a section that may be written as null (`personal: ~`) the
/// same way as an omitted one
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Custom deserializer that handles both a single string and a list of strings
pub(crate) fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<ScalarString>()? {
                vec.push(item.0);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Meta {
        #[serde(deserialize_with = "scalar_string")]
        title: String,
        #[serde(deserialize_with = "string_or_vec")]
        tags: Vec<String>,
        #[serde(deserialize_with = "optional_scalar_string")]
        year: Option<String>,
        featured: Option<bool>,
    }

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
tags:
  - rust
  - serde
---

This is the content.
"#;

        let (meta, body) = parse::<Meta>(content).unwrap();
        assert_eq!(meta.title, "Hello World");
        assert_eq!(meta.tags, vec!["rust", "serde"]);
        assert_eq!(body, "\nThis is the content.\n");
    }

    #[test]
    fn test_parse_single_string_tags() {
        let content = "---\ntitle: Single Tag Post\ntags: Notes\n---\nContent here.\n";

        let (meta, _) = parse::<Meta>(content).unwrap();
        assert_eq!(meta.tags, vec!["Notes"]);
    }

    #[test]
    fn test_numbers_kept_as_text() {
        let content = "---\ntitle: 1984\nyear: 2021\ntags: [rust, 2024]\n---\n";

        let (meta, body) = parse::<Meta>(content).unwrap();
        assert_eq!(meta.title, "1984");
        assert_eq!(meta.year.as_deref(), Some("2021"));
        assert_eq!(meta.tags, vec!["rust", "2024"]);
        assert_eq!(body, "");
    }

    #[test]
    fn test_null_fields_use_defaults() {
        let content = "---\ntitle:\ntags:\nyear:\n---\nbody";

        let (meta, _) = parse::<Meta>(content).unwrap();
        assert_eq!(meta.title, "");
        assert!(meta.tags.is_empty());
        assert_eq!(meta.year, None);
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "# Just Markdown\n\n---\n\nWith a rule.";

        let (meta, body) = parse::<Meta>(content).unwrap();
        assert_eq!(meta.title, "");
        assert_eq!(body, content);
    }

    #[test]
    fn test_empty_block() {
        let (meta, body) = parse::<Meta>("---\n---\nBody").unwrap();
        assert_eq!(meta.title, "");
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_comment_only_block() {
        let (meta, body) = parse::<Meta>("---\n# nothing yet\n---\nBody").unwrap();
        assert_eq!(meta.title, "");
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_dots_close_block_and_bom_is_skipped() {
        let content = "\u{feff}---\r\ntitle: Dots\r\n...\r\nBody";

        let (meta, body) = parse::<Meta>(content).unwrap();
        assert_eq!(meta.title, "Dots");
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_horizontal_rule_is_not_an_opening() {
        let content = "----\ntitle: no\n----\n";
        let (yaml, body) = split(content).unwrap();
        assert!(yaml.is_none());
        assert_eq!(body, content);
    }

    #[test]
    fn test_unterminated_block() {
        let err = parse::<Meta>("---\ntitle: Open\n\nNo closing line").unwrap_err();
        assert!(matches!(err, FrontMatterError::Unterminated));
    }

    #[test]
    fn test_sequence_is_not_a_mapping() {
        let err = parse::<Meta>("---\n- a\n- b\n---\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::NotAMapping("a sequence")));
    }

    #[test]
    fn test_wrong_field_type() {
        let err = parse::<Meta>("---\nfeatured: \"yes\"\n---\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::Yaml(_)));

        let err = parse::<Meta>("---\ntags:\n  a: 1\n---\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::Yaml(_)));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = parse::<Meta>("---\ntitle: [unclosed\n---\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::Yaml(_)));
    }
}
