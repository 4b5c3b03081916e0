//! Parsing of abbreviated display counts such as `"12.3k"`, `"4.5M"` or `"4,500"`.
//!
//! Two variants are exposed. [`parse_compact_number`] distinguishes "no
//! number found" (`None`) from zero, which matters when reading counts off a
//! page header. [`parse_compact_number_or_zero`] collapses that distinction
//! for normalization, where every count must end up as a plain integer.

use std::sync::LazyLock;

use regex::Regex;

/// Largest value a count may take (2^53 - 1). Larger inputs saturate here so
/// that every count survives a round-trip through a JSON number.
pub const MAX_COUNT: u64 = (1 << 53) - 1;

static COMPACT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^([0-9.]+)([kmb]?)$").expect("valid compact-number regex"));

/// Parses a compact count into an integer, returning `None` when no number
/// can be extracted.
///
/// Whitespace and thousands separators are stripped first. A decimal mantissa
/// with an optional `k`/`m`/`b` suffix (case-insensitive) is scaled by 10³,
/// 10⁶ or 10⁹. Anything else falls back to keeping only digits and dots and
/// parsing what remains. The result is rounded to the nearest integer.
///
/// ```
/// use igleads_core::parse_compact_number;
///
/// assert_eq!(parse_compact_number("12.3k"), Some(12_300));
/// assert_eq!(parse_compact_number("1,234"), Some(1_234));
/// assert_eq!(parse_compact_number("abc"), None);
/// ```
#[must_use]
pub fn parse_compact_number(input: &str) -> Option<u64> {
    let cleaned: String = input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    if let Some(caps) = COMPACT_RE.captures(&cleaned) {
        let mantissa: f64 = caps[1].parse().ok()?;
        let multiplier = match caps[2].to_ascii_lowercase().as_str() {
            "k" => 1e3,
            "m" => 1e6,
            "b" => 1e9,
            _ => 1.0,
        };
        return Some(round_count(mantissa * multiplier));
    }

    let digits: String = cleaned
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if !digits.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<f64>().ok().map(round_count)
}

/// Zero-defaulting variant of [`parse_compact_number`] for normalization.
///
/// Absent input and input with no extractable digits both yield `0`.
#[must_use]
pub fn parse_compact_number_or_zero(input: Option<&str>) -> u64 {
    input.and_then(parse_compact_number).unwrap_or(0)
}

/// Rounds a raw float to a non-negative count, saturating at [`MAX_COUNT`].
///
/// Non-finite and negative inputs map to `0`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub(crate) fn round_count(raw: f64) -> u64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 0;
    }
    let rounded = raw.round();
    if rounded >= MAX_COUNT as f64 {
        MAX_COUNT
    } else {
        rounded as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_separator_is_stripped() {
        assert_eq!(parse_compact_number("1,234"), Some(1_234));
    }

    #[test]
    fn k_suffix_scales_by_thousand() {
        assert_eq!(parse_compact_number("12.3k"), Some(12_300));
    }

    #[test]
    fn m_suffix_is_case_insensitive() {
        assert_eq!(parse_compact_number("4.5M"), Some(4_500_000));
        assert_eq!(parse_compact_number("4.5m"), Some(4_500_000));
    }

    #[test]
    fn b_suffix_scales_by_billion() {
        assert_eq!(parse_compact_number("1.2B"), Some(1_200_000_000));
    }

    #[test]
    fn plain_integer_passes_through() {
        assert_eq!(parse_compact_number("999"), Some(999));
    }

    #[test]
    fn inner_whitespace_is_ignored() {
        assert_eq!(parse_compact_number(" 3 k "), Some(3_000));
        assert_eq!(parse_compact_number("1\u{a0}200"), Some(1_200));
    }

    #[test]
    fn fractional_result_is_rounded() {
        assert_eq!(parse_compact_number("1.2346k"), Some(1_235));
        assert_eq!(parse_compact_number("2.5"), Some(3));
    }

    #[test]
    fn trailing_words_fall_back_to_digit_stripping() {
        assert_eq!(parse_compact_number("1,234 followers"), Some(1_234));
        assert_eq!(parse_compact_number("12 posts"), Some(12));
    }

    #[test]
    fn empty_and_non_numeric_are_none() {
        assert_eq!(parse_compact_number(""), None);
        assert_eq!(parse_compact_number("   "), None);
        assert_eq!(parse_compact_number("abc"), None);
        assert_eq!(parse_compact_number("."), None);
    }

    #[test]
    fn zero_variant_defaults_to_zero() {
        assert_eq!(parse_compact_number_or_zero(None), 0);
        assert_eq!(parse_compact_number_or_zero(Some("")), 0);
        assert_eq!(parse_compact_number_or_zero(Some("abc")), 0);
        assert_eq!(parse_compact_number_or_zero(Some("4.5M")), 4_500_000);
    }

    #[test]
    fn huge_values_saturate() {
        assert_eq!(parse_compact_number("99999999b"), Some(MAX_COUNT));
    }

    #[test]
    fn round_count_rejects_negative_and_nan() {
        assert_eq!(round_count(-4.0), 0);
        assert_eq!(round_count(f64::NAN), 0);
        assert_eq!(round_count(f64::INFINITY), 0);
    }
}
