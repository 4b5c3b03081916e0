//! CSV and JSON export of scraped records.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde_json::{json, Number, Value};

use crate::error::CoreError;
use crate::profile::NormalizedProfile;

/// Serializes `rows` as CSV.
///
/// The header is the union of keys across all rows in first-seen order.
/// Missing and `null` cells are empty, nested objects and arrays are written
/// as compact JSON, and cells containing a comma, quote or line break are
/// quoted with inner quotes doubled. Rows are joined with `\n` and there is
/// no trailing newline. Rows that are not JSON objects contribute no keys and
/// render as all-empty lines.
#[must_use]
pub fn to_delimited_text(rows: &[Value]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let mut seen: HashSet<&str> = HashSet::new();
    let mut headers: Vec<&str> = Vec::new();
    for row in rows {
        if let Value::Object(map) = row {
            for key in map.keys() {
                if seen.insert(key.as_str()) {
                    headers.push(key.as_str());
                }
            }
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        headers
            .iter()
            .map(|h| escape_cell(h))
            .collect::<Vec<_>>()
            .join(","),
    );
    for row in rows {
        let line = headers
            .iter()
            .map(|h| render_cell(row.get(*h)))
            .collect::<Vec<_>>()
            .join(",");
        lines.push(line);
    }
    lines.join("\n")
}

fn render_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => escape_cell(s),
        Some(Value::Number(n)) => number_cell(n),
        // Objects and arrays render as compact JSON, booleans as their literal.
        Some(other) => escape_cell(&other.to_string()),
    }
}

/// Integral floats below 1e21 drop the trailing `.0`; larger exponents carry
/// an explicit sign (`1e+21`).
fn number_cell(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => {
            if f == 0.0 {
                "0".to_owned()
            } else {
                format!("{f:.0}")
            }
        }
        _ => {
            let literal = n.to_string();
            if literal.contains('e') && !literal.contains("e-") && !literal.contains("e+") {
                literal.replacen('e', "e+", 1)
            } else {
                literal
            }
        }
    }
}

fn escape_cell(field: &str) -> String {
    let must_quote = field.contains([',', '"', '\n', '\r']);
    let escaped = field.replace('"', "\"\"");
    if must_quote {
        format!("\"{escaped}\"")
    } else {
        escaped
    }
}

/// Flattens a profile into one export row.
///
/// Scalars get their own column; links and niches stay as nested JSON.
#[must_use]
pub fn profile_row(profile: &NormalizedProfile) -> Value {
    let about = &profile.about;
    json!({
        "username": about.username,
        "fullName": about.full_name,
        "category": about.category,
        "bio": about.bio,
        "isVerified": about.is_verified,
        "profilePic": about.profile_pic,
        "links": about.links,
        "posts": profile.stats.posts.value,
        "followers": profile.stats.followers.value,
        "following": profile.stats.following.value,
        "reelsCount": profile.reels.count,
        "gender": profile.manual.gender,
        "niches": profile.manual.niches,
        "location": profile.manual.location,
        "aestheticsScore": profile.manual.aesthetics_score,
        "schemaVersion": profile.schema_version,
    })
}

/// Pretty-printed JSON array with two-space indentation.
///
/// # Errors
///
/// Returns [`CoreError::Json`] if serialization fails.
pub fn to_pretty_json(rows: &[Value]) -> Result<String, CoreError> {
    serde_json::to_string_pretty(rows).map_err(|e| CoreError::Json {
        context: "export rows".to_owned(),
        source: e,
    })
}

/// File name for an export written at `now`, e.g.
/// `igleads-export-2025-03-04-17-05-09.csv`.
#[must_use]
pub fn export_file_name(now: DateTime<Utc>, extension: &str) -> String {
    format!(
        "igleads-export-{}.{extension}",
        now.format("%Y-%m-%d-%H-%M-%S")
    )
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::normalize::normalize;

    #[test]
    fn header_is_union_in_first_seen_order() {
        let rows = vec![json!({"a": 1, "b": 2}), json!({"a": 3})];
        assert_eq!(to_delimited_text(&rows), "a,b\n1,2\n3,");
    }

    #[test]
    fn later_keys_append_to_header() {
        let rows = vec![json!({"b": 1}), json!({"a": 2, "b": 3})];
        assert_eq!(to_delimited_text(&rows), "b,a\n1,\n3,2");
    }

    #[test]
    fn comma_and_quote_are_escaped() {
        let rows = vec![json!({"v": "a,b\"c"})];
        assert_eq!(to_delimited_text(&rows), "v\n\"a,b\"\"c\"");
    }

    #[test]
    fn line_breaks_force_quoting() {
        let rows = vec![json!({"bio": "line one\nline two", "cr": "x\ry"})];
        assert_eq!(
            to_delimited_text(&rows),
            "bio,cr\n\"line one\nline two\",\"x\ry\""
        );
    }

    #[test]
    fn bare_quote_is_doubled_and_wrapped() {
        assert_eq!(escape_cell("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_cell("plain"), "plain");
    }

    #[test]
    fn null_renders_empty() {
        let rows = vec![json!({"a": null, "b": false})];
        assert_eq!(to_delimited_text(&rows), "a,b\n,false");
    }

    #[test]
    fn nested_values_render_as_json() {
        let rows = vec![json!({"niches": ["Food", "Travel"], "m": {"k": 1}})];
        assert_eq!(
            to_delimited_text(&rows),
            "niches,m\n\"[\"\"Food\"\",\"\"Travel\"\"]\",\"{\"\"k\"\":1}\""
        );
    }

    #[test]
    fn empty_input_is_empty_string() {
        assert_eq!(to_delimited_text(&[]), "");
    }

    #[test]
    fn non_object_rows_render_blank() {
        let rows = vec![json!({"a": 1}), json!(42)];
        assert_eq!(to_delimited_text(&rows), "a\n1\n");
    }

    #[test]
    fn profile_row_keeps_column_order() {
        let profile = normalize(&json!({
            "about": { "username": "ana" },
            "stats": { "followers": "2k" },
            "manual": { "niches": ["Art"] }
        }));
        let csv = to_delimited_text(&[profile_row(&profile)]);
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some(
                "username,fullName,category,bio,isVerified,profilePic,links,posts,followers,\
                 following,reelsCount,gender,niches,location,aestheticsScore,schemaVersion"
            )
        );
        assert_eq!(
            lines.next(),
            Some(
                "ana,unknown,unknown,unknown,false,#,[],0,2000,0,0,unknown,\
                 \"[\"\"Art\"\"]\",unknown,0,3"
            )
        );
    }

    #[test]
    fn integral_floats_render_without_fraction() {
        let rows = vec![json!({"a": 1.0, "b": 2.5, "c": -0.0, "d": 1e21, "e": 7})];
        assert_eq!(to_delimited_text(&rows), "a,b,c,d,e\n1,2.5,0,1e+21,7");
    }

    #[test]
    fn pretty_json_uses_two_space_indent() {
        let out = to_pretty_json(&[json!({"a": 1})]).unwrap();
        assert_eq!(out, "[\n  {\n    \"a\": 1\n  }\n]");
    }

    #[test]
    fn export_file_name_is_timestamped() {
        let now = Utc.with_ymd_and_hms(2025, 3, 4, 17, 5, 9).unwrap();
        assert_eq!(
            export_file_name(now, "csv"),
            "igleads-export-2025-03-04-17-05-09.csv"
        );
    }
}
