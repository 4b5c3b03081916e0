use std::fmt;

use serde::{Deserialize, Serialize};

use crate::schema::SchemaVersion;

/// A scraped profile after normalization.
///
/// Every field is populated: text falls back to `"unknown"`, URLs to `"#"`,
/// counts to `0`, lists to empty. Build one with
/// [`crate::normalize::normalize`] rather than by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedProfile {
    /// Manual-annotation schema revision the `manual` block is expressed in.
    pub schema_version: SchemaVersion,
    pub about: About,
    pub stats: Stats,
    pub reels: Reels,
    pub manual: Manual,
}

impl NormalizedProfile {
    #[must_use]
    pub fn username(&self) -> &str {
        &self.about.username
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct About {
    pub username: String,
    pub full_name: String,
    /// Absolute URL of the avatar image, or `"#"`.
    pub profile_pic: String,
    pub is_verified: bool,
    pub category: String,
    pub bio: String,
    pub links: Vec<ProfileLink>,
    /// The "followed by x, y and N others" line, verbatim.
    pub mutuals_text: String,
    pub actions: ProfileActions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileLink {
    pub text: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileActions {
    pub has_follow_button: bool,
    pub has_message_button: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub posts: CountPair,
    pub followers: CountPair,
    pub following: CountPair,
}

/// A displayed metric alongside its parsed value, e.g. `"12.3k"` / `12300`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountPair {
    pub text: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reels {
    pub count: u64,
    pub items: Vec<ReelItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReelItem {
    pub index: u64,
    pub url: String,
    pub thumbnail: String,
    pub cover_size_hint: String,
    pub overlays: ReelOverlays,
    pub views: CountPair,
    pub pinned: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReelOverlays {
    pub has_hover_overlay: bool,
    pub likes: CountPair,
    pub comments: CountPair,
}

/// Operator-supplied judgments layered on top of the scrape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manual {
    pub gender: Gender,
    /// Distinct niche tags in the order they were chosen.
    pub niches: Vec<String>,
    pub location: String,
    /// Score on the scale given by the profile's `schema_version`.
    pub aesthetics_score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
    #[default]
    Unknown,
}

impl Gender {
    /// Lenient parse used by the normalizer; unrecognized input is `Unknown`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "male" | "m" | "man" => Self::Male,
            "female" | "f" | "woman" => Self::Female,
            "other" | "non-binary" | "nonbinary" | "nb" => Self::Other,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
            Gender::Other => write!(f, "other"),
            Gender::Unknown => write!(f, "unknown"),
        }
    }
}
