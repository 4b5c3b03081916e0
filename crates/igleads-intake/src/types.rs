use igleads_core::NormalizedProfile;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Platform tag the intake service files submissions under.
pub const SOCIAL_TYPE: &str = "instagram";

/// Reply to an existence check.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CheckResponse {
    #[serde(default)]
    pub exists: bool,
    /// Whatever else the service sent back.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Submission body: the profile with a `socialType` tag spliced in at the
/// top level.
#[derive(Debug, Serialize)]
pub struct SubmitPayload<'a> {
    #[serde(rename = "socialType")]
    pub social_type: &'static str,
    #[serde(flatten)]
    pub profile: &'a NormalizedProfile,
}

impl<'a> SubmitPayload<'a> {
    #[must_use]
    pub fn new(profile: &'a NormalizedProfile) -> Self {
        Self {
            social_type: SOCIAL_TYPE,
            profile,
        }
    }
}

#[cfg(test)]
mod tests {
    use igleads_core::normalize;
    use serde_json::json;

    use super::*;

    #[test]
    fn payload_flattens_profile_beside_social_type() {
        let profile = normalize(&json!({ "about": { "username": "ana" } }));
        let value = serde_json::to_value(SubmitPayload::new(&profile)).unwrap();

        assert_eq!(value["socialType"], "instagram");
        assert_eq!(value["about"]["username"], "ana");
        assert_eq!(value["schemaVersion"], 3);
        assert!(value.get("profile").is_none());
    }

    #[test]
    fn check_response_defaults_exists_to_false() {
        let parsed: CheckResponse = serde_json::from_value(json!({ "message": "ok" })).unwrap();
        assert!(!parsed.exists);
        assert_eq!(parsed.extra.get("message"), Some(&json!("ok")));
    }
}
