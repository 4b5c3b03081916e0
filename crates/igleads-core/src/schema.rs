//! Revisions of the manual-annotation schema.
//!
//! The operator-facing rating has shipped on three scales: five stars, ten
//! half-stars, and a 0-100 slider. Records carry a `schemaVersion` tag so a
//! score written under one scale can be rescaled into another. The slider
//! ([`SchemaVersion::Slider100`]) is canonical.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::compact::round_count;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum SchemaVersion {
    /// Whole stars, `0..=5`.
    Stars5 = 1,
    /// Half-star steps stored as integers, `0..=10`.
    HalfStars10 = 2,
    /// Slider, `0..=100`.
    #[default]
    Slider100 = 3,
}

impl SchemaVersion {
    pub const CANONICAL: Self = Self::Slider100;

    #[must_use]
    pub fn tag(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(Self::Stars5),
            2 => Some(Self::HalfStars10),
            3 => Some(Self::Slider100),
            _ => None,
        }
    }

    /// Inclusive upper bound of the aesthetics score under this revision.
    #[must_use]
    pub fn score_max(self) -> u32 {
        match self {
            Self::Stars5 => 5,
            Self::HalfStars10 => 10,
            Self::Slider100 => 100,
        }
    }

    /// Rounds `raw` and clamps it into `0..=score_max()`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn clamp_score(self, raw: f64) -> u32 {
        // round_count already maps NaN and negatives to 0.
        round_count(raw).min(u64::from(self.score_max())) as u32
    }

    /// Rescales a score written under `self` into the range of `target`.
    ///
    /// The source score is clamped to its own range first, so an out-of-range
    /// legacy value cannot overflow the target scale.
    #[must_use]
    pub fn migrate_score(self, raw: f64, target: Self) -> u32 {
        if self == target {
            return target.clamp_score(raw);
        }
        let source = f64::from(self.clamp_score(raw));
        let rescaled = source * f64::from(target.score_max()) / f64::from(self.score_max());
        target.clamp_score(rescaled)
    }
}

impl From<SchemaVersion> for u8 {
    fn from(version: SchemaVersion) -> Self {
        version.tag()
    }
}

impl TryFrom<u8> for SchemaVersion {
    type Error = String;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        Self::from_tag(tag).ok_or_else(|| format!("unknown schema version {tag}"))
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stars5 => write!(f, "stars5"),
            Self::HalfStars10 => write!(f, "halfstars10"),
            Self::Slider100 => write!(f, "slider100"),
        }
    }
}

impl FromStr for SchemaVersion {
    type Err = String;

    /// Accepts either the numeric tag or the display name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "stars5" => Ok(Self::Stars5),
            "2" | "halfstars10" => Ok(Self::HalfStars10),
            "3" | "slider100" => Ok(Self::Slider100),
            other => Err(format!("unknown schema version '{other}'")),
        }
    }
}
