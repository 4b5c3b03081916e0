//! Normalization from an untrusted profile scrape to [`NormalizedProfile`].
//!
//! The scrape comes from positional DOM lookups and changes shape whenever the
//! page markup does, so nothing here returns an error: every leaf goes through
//! a [`crate::coerce`] helper with a fixed fallback. Normalizing a record that
//! was already normalized (after serializing it back to JSON) yields the same
//! record.

use serde_json::{Map, Value};
use url::Url;

use crate::coerce::{self, UNKNOWN};
use crate::compact::parse_compact_number;
use crate::error::CoreError;
use crate::profile::{
    About, CountPair, Gender, Manual, NormalizedProfile, ProfileActions, ProfileLink, ReelItem,
    ReelOverlays, Reels, Stats,
};
use crate::schema::SchemaVersion;

/// Origin that relative links and image paths are resolved against.
pub const DEFAULT_PROFILE_BASE_URL: &str = "https://www.instagram.com/";

/// Keys the aesthetics score has been stored under across schema revisions,
/// in lookup order.
const SCORE_KEYS: &[&str] = &["aestheticsScore", "aestheticScore", "rating", "stars"];

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizeOptions {
    /// Schema revision the output `manual` block is expressed in.
    pub schema: SchemaVersion,
    pub base_url: Url,
}

impl NormalizeOptions {
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn new(schema: SchemaVersion, base_url: &str) -> Result<Self, CoreError> {
        let base_url = Url::parse(base_url).map_err(|e| CoreError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(Self { schema, base_url })
    }
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            schema: SchemaVersion::CANONICAL,
            base_url: Url::parse(DEFAULT_PROFILE_BASE_URL).expect("valid default base URL"),
        }
    }
}

/// Normalizes `raw` with the canonical schema and default base origin.
#[must_use]
pub fn normalize(raw: &Value) -> NormalizedProfile {
    normalize_with(raw, &NormalizeOptions::default())
}

/// Normalizes `raw` into a fully populated profile.
///
/// `about.username` falls back to a top-level `username`, which is the flat
/// shape older popup builds stored.
#[must_use]
pub fn normalize_with(raw: &Value, options: &NormalizeOptions) -> NormalizedProfile {
    let root = coerce::object(Some(raw));
    let about_raw = coerce::object(root.get("about"));

    let mut about = normalize_about(about_raw, &options.base_url);
    if about.username == UNKNOWN {
        about.username = coerce::text(root.get("username"));
    }

    NormalizedProfile {
        schema_version: options.schema,
        about,
        stats: normalize_stats(coerce::object(root.get("stats"))),
        reels: normalize_reels(coerce::object(root.get("reels")), &options.base_url),
        manual: normalize_manual(raw, options),
    }
}

/// Normalizes only the `manual` block of `raw`.
///
/// The source schema is read from `raw.schemaVersion`. When it names a
/// different revision than `options.schema` the score is rescaled. When it is
/// absent or unrecognized the score is taken to be on the target scale.
#[must_use]
pub fn normalize_manual(raw: &Value, options: &NormalizeOptions) -> Manual {
    let root = coerce::object(Some(raw));
    let manual = coerce::object(root.get("manual"));

    let gender = match manual.get("gender") {
        Some(Value::String(s)) => Gender::parse(s),
        _ => Gender::Unknown,
    };

    let source_schema = root
        .get("schemaVersion")
        .and_then(Value::as_u64)
        .and_then(|tag| u8::try_from(tag).ok())
        .and_then(SchemaVersion::from_tag)
        .unwrap_or(options.schema);
    let raw_score = SCORE_KEYS
        .iter()
        .find_map(|key| manual.get(*key).filter(|v| v.is_number() || v.is_string()))
        .map_or(0.0, score_input);

    Manual {
        gender,
        niches: normalize_niches(manual.get("niches")),
        location: coerce::text(manual.get("location")),
        aesthetics_score: source_schema.migrate_score(raw_score, options.schema),
    }
}

fn normalize_about(about: &Map<String, Value>, base: &Url) -> About {
    let actions = coerce::object(about.get("actions"));
    About {
        username: coerce::text(about.get("username")),
        full_name: coerce::text(about.get("fullName")),
        profile_pic: coerce::url(about.get("profilePic"), base),
        is_verified: coerce::boolean(about.get("isVerified")),
        category: coerce::text(about.get("category")),
        bio: coerce::text(about.get("bio")),
        links: coerce::array(about.get("links"), |_, link| {
            let link = coerce::object(Some(link));
            ProfileLink {
                text: coerce::text(link.get("text")),
                url: coerce::url(link.get("url"), base),
            }
        }),
        mutuals_text: coerce::text(about.get("mutualsText")),
        actions: ProfileActions {
            has_follow_button: coerce::boolean(actions.get("hasFollowButton")),
            has_message_button: coerce::boolean(actions.get("hasMessageButton")),
        },
    }
}

fn normalize_stats(stats: &Map<String, Value>) -> Stats {
    Stats {
        posts: count_pair(stats.get("posts")),
        followers: count_pair(stats.get("followers")),
        following: count_pair(stats.get("following")),
    }
}

fn normalize_reels(reels: &Map<String, Value>, base: &Url) -> Reels {
    Reels {
        count: coerce::count(reels.get("count")),
        items: coerce::array(reels.get("items"), |position, item| {
            reel_item(position, item, base)
        }),
    }
}

fn reel_item(position: usize, item: &Value, base: &Url) -> ReelItem {
    let item = coerce::object(Some(item));
    let overlays = coerce::object(item.get("overlays"));
    // A missing index falls back to the item's position in the list.
    let index = match item.get("index") {
        Some(v @ (Value::Number(_) | Value::String(_))) => coerce::count(Some(v)),
        _ => position as u64,
    };
    ReelItem {
        index,
        url: coerce::url(item.get("url"), base),
        thumbnail: coerce::url(item.get("thumbnail"), base),
        cover_size_hint: coerce::text(item.get("cover_size_hint")),
        overlays: ReelOverlays {
            has_hover_overlay: coerce::boolean(overlays.get("has_hover_overlay")),
            likes: count_pair(overlays.get("likes")),
            comments: count_pair(overlays.get("comments")),
        },
        views: count_pair(item.get("views")),
        pinned: coerce::boolean(item.get("pinned")),
    }
}

/// Accepts `{text, value}`, a bare display string, or a bare number.
///
/// `value` wins when present; otherwise the text is parsed. Missing text is
/// rebuilt from an explicit value, or becomes `"unknown"`.
fn count_pair(value: Option<&Value>) -> CountPair {
    let (text, explicit) = match value {
        Some(Value::Object(map)) => {
            let explicit = match map.get("value") {
                Some(Value::Number(_)) => Some(coerce::count(map.get("value"))),
                Some(Value::String(s)) => parse_compact_number(s),
                _ => None,
            };
            (coerce::non_blank(map.get("text")), explicit)
        }
        Some(Value::String(_)) => (coerce::non_blank(value), None),
        Some(Value::Number(_)) => (None, Some(coerce::count(value))),
        _ => (None, None),
    };

    let parsed = explicit.or_else(|| text.as_deref().and_then(parse_compact_number));
    let value = parsed.unwrap_or(0);
    let text = text
        .or_else(|| explicit.map(|v| v.to_string()))
        .unwrap_or_else(|| UNKNOWN.to_owned());
    CountPair { text, value }
}

/// Trimmed, non-blank, de-duplicated niche tags in first-seen order.
fn normalize_niches(value: Option<&Value>) -> Vec<String> {
    let mut niches: Vec<String> = Vec::new();
    for niche in coerce::array(value, |_, v| coerce::non_blank(Some(v)))
        .into_iter()
        .flatten()
    {
        if !niches.contains(&niche) {
            niches.push(niche);
        }
    }
    niches
}

#[allow(clippy::cast_precision_loss)]
fn score_input(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => parse_compact_number(s).map_or(0.0, |v| v as f64),
        _ => 0.0,
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
