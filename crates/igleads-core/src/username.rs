/// Profile URL prefix the extension recognizes.
const PROFILE_PREFIX: &str = "https://www.instagram.com/";

/// First path segments that are site sections rather than profiles.
const RESERVED_SEGMENTS: &[&str] = &["reels", "explore", "direct", "accounts", "stories", "p"];

/// Extracts the profile handle from an Instagram profile URL.
///
/// Returns `None` for other hosts, bare origins, and section pages such as
/// `/explore/` or `/p/<id>/`.
#[must_use]
pub fn extract_username(url: &str) -> Option<String> {
    let rest = url.trim().strip_prefix(PROFILE_PREFIX)?;
    let segment = rest
        .split(['/', '?', '#'])
        .next()
        .filter(|s| !s.is_empty())?;
    if RESERVED_SEGMENTS.contains(&segment) {
        return None;
    }
    Some(segment.to_owned())
}
