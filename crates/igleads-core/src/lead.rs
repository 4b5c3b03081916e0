//! Lead quality scoring and the accept/reject gate applied after a scrape.

use std::fmt;

use crate::coerce::UNKNOWN;
use crate::profile::NormalizedProfile;

/// Highest score [`score`] can return.
pub const MAX_SCORE: f64 = 4.0;

/// Bio length (in characters) a profile must exceed to earn the bio point.
const MIN_BIO_CHARS: usize = 10;

/// Heuristic lead quality in `0.0..=4.0`.
///
/// One point each, capped: posts (full at 50), reels (full at 20), a bio
/// longer than ten characters, and a category. Placeholder `"unknown"` text
/// counts as absent.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn score(profile: &NormalizedProfile) -> f64 {
    let posts = (profile.stats.posts.value as f64 / 50.0).min(1.0);
    let reels = (profile.reels.count as f64 / 20.0).min(1.0);

    let bio = &profile.about.bio;
    let bio_point = if is_present(bio) && bio.chars().count() > MIN_BIO_CHARS {
        1.0
    } else {
        0.0
    };
    let category_point = if is_present(&profile.about.category) {
        1.0
    } else {
        0.0
    };

    posts + reels + bio_point + category_point
}

fn is_present(text: &str) -> bool {
    let trimmed = text.trim();
    !trimmed.is_empty() && trimmed != UNKNOWN
}

/// Bounds a scraped profile must satisfy before it is worth annotating.
#[derive(Debug, Clone, PartialEq)]
pub struct GatePolicy {
    pub min_followers: u64,
    pub max_followers: u64,
    /// Profiles scoring at or below this are rejected.
    pub min_score: f64,
}

impl Default for GatePolicy {
    fn default() -> Self {
        Self {
            min_followers: 1_000,
            max_followers: 500_000,
            min_score: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GateOutcome {
    Accepted { score: f64 },
    Rejected(Rejection),
}

impl GateOutcome {
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, GateOutcome::Accepted { .. })
    }
}

/// Why a profile was turned away. Neither case is an error: the operator is
/// expected to move on to another profile.
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    FollowersOutOfRange { followers: u64, min: u64, max: u64 },
    LowQuality { score: f64, threshold: f64 },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::FollowersOutOfRange {
                followers,
                min,
                max,
            } => write!(
                f,
                "follower count {followers} is outside {min}..={max}; pick another profile"
            ),
            Rejection::LowQuality { score, threshold } => write!(
                f,
                "lead score {score:.2} is not above {threshold:.2}; pick another profile"
            ),
        }
    }
}

/// Applies `policy` to `profile`.
///
/// The follower bounds are checked first, so an out-of-range profile is never
/// scored.
#[must_use]
pub fn evaluate(profile: &NormalizedProfile, policy: &GatePolicy) -> GateOutcome {
    let followers = profile.stats.followers.value;
    if followers < policy.min_followers || followers > policy.max_followers {
        tracing::debug!(
            username = %profile.username(),
            followers,
            "rejected: follower count out of range"
        );
        return GateOutcome::Rejected(Rejection::FollowersOutOfRange {
            followers,
            min: policy.min_followers,
            max: policy.max_followers,
        });
    }

    let score = score(profile);
    if score <= policy.min_score {
        tracing::debug!(username = %profile.username(), score, "rejected: low lead score");
        return GateOutcome::Rejected(Rejection::LowQuality {
            score,
            threshold: policy.min_score,
        });
    }

    tracing::debug!(username = %profile.username(), score, "accepted");
    GateOutcome::Accepted { score }
}
