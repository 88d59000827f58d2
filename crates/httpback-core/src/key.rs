//! Canonical request keys.
//!
//! A key is the compact JSON serialization of the request options with object keys in
//! sorted order and integral floats written as integers, so two structurally equal options
//! always produce the same key no matter how they were built.

use crate::options::RequestOptions;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::borrow::Borrow;
use std::fmt;

/// How the serialized options are normalized before being used as a key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KeyNormalization {
    /// Compact JSON with sorted object keys.
    #[default]
    Canonical,
    /// Canonical JSON with every whitespace character removed, string contents included.
    StripWhitespace,
}

impl KeyNormalization {
    /// Parse a setting value. Accepts camelCase, kebab-case and snake_case spellings.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().replace(['-', '_'], "").as_str() {
            "canonical" => Some(Self::Canonical),
            "stripwhitespace" => Some(Self::StripWhitespace),
            _ => None,
        }
    }
}

/// Lookup key of a mock store entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestKey(String);

impl RequestKey {
    pub fn from_options(options: &RequestOptions, normalization: KeyNormalization) -> Self {
        let serialized = canonicalize(options.as_value()).to_string();

        match normalization {
            KeyNormalization::Canonical => Self(serialized),
            KeyNormalization::StripWhitespace => {
                Self(serialized.chars().filter(|c| !c.is_whitespace()).collect())
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RequestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for RequestKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for RequestKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Rebuild a value with object entries inserted in sorted key order and integral floats
/// turned into integers.
///
/// Serialization then follows that order whether or not `serde_json` preserves insertion
/// order in its maps, and `1.0` serializes the same as `1`.
fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.clone(), canonicalize(v)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        Value::Number(n) => Value::Number(canonical_number(n)),
        other => other.clone(),
    }
}

fn canonical_number(n: &Number) -> Number {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.is_finite() && f.fract() == 0.0 => {
            // i64::MAX and u64::MAX round up when cast, so the upper bounds are exclusive
            if f >= i64::MIN as f64 && f < i64::MAX as f64 {
                Number::from(f as i64)
            } else if f >= 0.0 && f < u64::MAX as f64 {
                Number::from(f as u64)
            } else {
                n.clone()
            }
        }
        _ => n.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn key(options: Value, normalization: KeyNormalization) -> String {
        RequestKey::from_options(&RequestOptions::from(options), normalization).into_string()
    }

    #[rstest]
    fn test_key_is_compact_json() {
        assert_eq!(
            key(json!({"url": "/x", "method": "GET"}), KeyNormalization::Canonical),
            r#"{"method":"GET","url":"/x"}"#
        );
    }

    #[rstest]
    fn test_key_for_string_options() {
        assert_eq!(
            key(json!("http://localhost:3000/"), KeyNormalization::Canonical),
            r#""http://localhost:3000/""#
        );
    }

    #[rstest]
    #[case(KeyNormalization::Canonical)]
    #[case(KeyNormalization::StripWhitespace)]
    fn test_key_ignores_insertion_order(#[case] normalization: KeyNormalization) {
        let a: Value = serde_json::from_str(
            r#"{"method": "GET", "url": "/x", "headers": {"A": "1", "B": "2"}}"#,
        )
        .expect("Should parse");
        let b: Value = serde_json::from_str(
            r#"{"headers": {"B": "2", "A": "1"},
                "url": "/x",
                "method": "GET"}"#,
        )
        .expect("Should parse");

        assert_eq!(key(a, normalization), key(b, normalization));
    }

    #[rstest]
    fn test_key_sorts_nested_objects_in_arrays() {
        assert_eq!(
            key(json!({"items": [{"b": 1, "a": 2}]}), KeyNormalization::Canonical),
            r#"{"items":[{"a":2,"b":1}]}"#
        );
    }

    #[rstest]
    #[case(json!({"n": 1.0}), json!({"n": 1}))]
    #[case(json!({"n": -3.0}), json!({"n": -3}))]
    #[case(json!({"n": 0.0}), json!({"n": 0}))]
    #[case(json!({"n": 1e19}), json!({"n": 10_000_000_000_000_000_000u64}))]
    #[case(json!([{"n": 2.0}]), json!([{"n": 2}]))]
    fn test_integral_floats_match_integers(#[case] a: Value, #[case] b: Value) {
        assert_eq!(
            key(a, KeyNormalization::Canonical),
            key(b, KeyNormalization::Canonical)
        );
    }

    #[rstest]
    #[case(json!(1.5), "1.5")]
    #[case(json!(1e300), "1e300")]
    #[case(json!(7), "7")]
    fn test_other_numbers_keep_their_form(#[case] n: Value, #[case] expected: &str) {
        assert_eq!(key(n, KeyNormalization::Canonical), expected);
    }

    #[rstest]
    fn test_fractional_floats_stay_distinct() {
        assert_ne!(
            key(json!({"n": 1.5}), KeyNormalization::Canonical),
            key(json!({"n": 1}), KeyNormalization::Canonical)
        );
    }

    #[rstest]
    fn test_canonical_keeps_whitespace_in_values() {
        let spaced = key(json!({"body": "a b"}), KeyNormalization::Canonical);
        let tight = key(json!({"body": "ab"}), KeyNormalization::Canonical);
        assert_ne!(spaced, tight);
    }

    #[rstest]
    #[case(json!({"body": "a b"}), json!({"body": "ab"}))]
    #[case(json!({"body": "line\none"}), json!({"body": "line\none "}))]
    #[case(json!({"url": " /x "}), json!({"url": "/x"}))]
    fn test_strip_whitespace_merges_values(#[case] a: Value, #[case] b: Value) {
        assert_eq!(
            key(a, KeyNormalization::StripWhitespace),
            key(b, KeyNormalization::StripWhitespace)
        );
    }

    #[rstest]
    #[case("canonical", Some(KeyNormalization::Canonical))]
    #[case("Canonical", Some(KeyNormalization::Canonical))]
    #[case("stripWhitespace", Some(KeyNormalization::StripWhitespace))]
    #[case("strip-whitespace", Some(KeyNormalization::StripWhitespace))]
    #[case("strip_whitespace", Some(KeyNormalization::StripWhitespace))]
    #[case("raw", None)]
    #[case("", None)]
    fn test_normalization_parse(#[case] input: &str, #[case] expected: Option<KeyNormalization>) {
        assert_eq!(KeyNormalization::parse(input), expected);
    }

    #[rstest]
    fn test_normalization_serde() {
        let json = serde_json::to_string(&KeyNormalization::StripWhitespace)
            .expect("Should serialize");
        assert_eq!(json, r#""stripWhitespace""#);
    }
}
