//! Leaf coercions from untrusted JSON into typed values.
//!
//! Each function takes `Option<&Value>` so that an absent key and a
//! wrong-typed key go through the same fallback path. None of them fail.

use std::sync::LazyLock;

use serde_json::{Map, Value};
use url::Url;

use crate::compact::{parse_compact_number_or_zero, round_count, MAX_COUNT};

/// Fallback for descriptive text fields.
pub const UNKNOWN: &str = "unknown";

/// Fallback for URL fields that are missing or cannot be resolved.
pub const NO_URL: &str = "#";

static EMPTY_OBJECT: LazyLock<Map<String, Value>> = LazyLock::new(Map::new);

/// Returns the trimmed string if `value` is a string with visible content.
#[must_use]
pub fn non_blank(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_owned())
        }
        _ => None,
    }
}

#[must_use]
pub fn string_or(value: Option<&Value>, fallback: &str) -> String {
    non_blank(value).unwrap_or_else(|| fallback.to_owned())
}

/// Descriptive text, falling back to [`UNKNOWN`].
#[must_use]
pub fn text(value: Option<&Value>) -> String {
    string_or(value, UNKNOWN)
}

/// Booleans, truthy/falsy string tokens, and nonzero numbers.
#[must_use]
pub fn boolean(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes" | "y" | "on"
        ),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => false,
    }
}

/// Non-negative integer counts. Strings go through the compact parser.
#[must_use]
pub fn count(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => match n.as_u64() {
            Some(whole) => whole.min(MAX_COUNT),
            None => round_count(n.as_f64().unwrap_or(0.0)),
        },
        Some(Value::String(s)) => parse_compact_number_or_zero(Some(s)),
        _ => 0,
    }
}

/// Resolves a link against `base`, keeping only `http`/`https` results.
///
/// The literal `"#"` passes through untouched so that a normalized record
/// normalizes to itself.
#[must_use]
pub fn url(value: Option<&Value>, base: &Url) -> String {
    let Some(raw) = non_blank(value) else {
        return NO_URL.to_owned();
    };
    if raw == NO_URL {
        return raw;
    }
    match base.join(&raw) {
        Ok(resolved) if matches!(resolved.scheme(), "http" | "https") => resolved.into(),
        _ => NO_URL.to_owned(),
    }
}

/// Maps each element of an array through `f`, passing its position.
/// Anything other than an array yields an empty `Vec`.
pub fn array<T>(value: Option<&Value>, mut f: impl FnMut(usize, &Value) -> T) -> Vec<T> {
    match value {
        Some(Value::Array(items)) => items.iter().enumerate().map(|(i, v)| f(i, v)).collect(),
        _ => Vec::new(),
    }
}

/// Views `value` as an object, treating anything else as `{}`.
#[must_use]
pub fn object(value: Option<&Value>) -> &Map<String, Value> {
    match value {
        Some(Value::Object(map)) => map,
        _ => &*EMPTY_OBJECT,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn base() -> Url {
        Url::parse("https://www.instagram.com/").unwrap()
    }

    #[test]
    fn text_trims_and_falls_back() {
        assert_eq!(text(Some(&json!("  Jane  "))), "Jane");
        assert_eq!(text(Some(&json!("   "))), UNKNOWN);
        assert_eq!(text(Some(&json!(42))), UNKNOWN);
        assert_eq!(text(Some(&Value::Null)), UNKNOWN);
        assert_eq!(text(None), UNKNOWN);
    }

    #[test]
    fn boolean_accepts_tokens_and_numbers() {
        let truthy_values = [
            json!(true),
            json!("Yes"),
            json!("ON"),
            json!("1"),
            json!("y"),
            json!(3),
        ];
        for truthy in truthy_values {
            assert!(boolean(Some(&truthy)), "expected {truthy} to be true");
        }
        let falsy_values = [
            json!(false),
            json!("no"),
            json!("off"),
            json!("0"),
            json!(0),
            json!("maybe"),
            json!([]),
        ];
        for falsy in falsy_values {
            assert!(!boolean(Some(&falsy)), "expected {falsy} to be false");
        }
        assert!(!boolean(None));
    }

    #[test]
    fn count_accepts_numbers_and_compact_strings() {
        assert_eq!(count(Some(&json!(42))), 42);
        assert_eq!(count(Some(&json!(41.6))), 42);
        assert_eq!(count(Some(&json!("1.2k"))), 1_200);
        assert_eq!(count(Some(&json!(-5))), 0);
        assert_eq!(count(Some(&json!("n/a"))), 0);
        assert_eq!(count(Some(&json!({"value": 3}))), 0);
        assert_eq!(count(None), 0);
    }

    #[test]
    fn count_saturates_large_integers() {
        assert_eq!(count(Some(&json!(u64::MAX))), MAX_COUNT);
    }

    #[test]
    fn url_resolves_relative_paths() {
        assert_eq!(
            url(Some(&json!("/reel/abc/")), &base()),
            "https://www.instagram.com/reel/abc/"
        );
        assert_eq!(
            url(Some(&json!("https://cdn.example.com/p.jpg")), &base()),
            "https://cdn.example.com/p.jpg"
        );
    }

    #[test]
    fn url_falls_back_to_hash() {
        assert_eq!(url(None, &base()), NO_URL);
        assert_eq!(url(Some(&json!("")), &base()), NO_URL);
        assert_eq!(url(Some(&json!("#")), &base()), NO_URL);
        assert_eq!(url(Some(&json!("javascript:void(0)")), &base()), NO_URL);
        assert_eq!(url(Some(&json!(7)), &base()), NO_URL);
    }

    #[test]
    fn url_is_stable_when_reapplied() {
        let once = url(Some(&json!("/p/xyz?img_index=1")), &base());
        let twice = url(Some(&json!(once.clone())), &base());
        assert_eq!(once, twice);
    }

    #[test]
    fn array_rejects_non_arrays() {
        let doubled = array(Some(&json!([1, 2, "x"])), |_, v| count(Some(v)) * 2);
        assert_eq!(doubled, vec![2, 4, 0]);
        assert!(array(Some(&json!({"0": 1})), |_, v| v.clone()).is_empty());
        assert!(array(None, |_, v| v.clone()).is_empty());
    }

    #[test]
    fn object_treats_non_objects_as_empty() {
        assert!(object(Some(&json!("nope"))).is_empty());
        assert!(object(None).is_empty());
        assert_eq!(object(Some(&json!({"a": 1}))).len(), 1);
    }
}
