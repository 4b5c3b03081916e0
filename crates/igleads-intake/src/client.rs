//! HTTP client for the lead intake service.
//!
//! Two calls: an existence check by username and a submission of the
//! annotated profile. Both send the tenant id in `X-USER-ID` and treat any
//! non-2xx status as [`IntakeError::Status`]. Nothing is retried; the caller
//! keeps the record and decides whether to try again.

use std::time::Duration;

use igleads_core::NormalizedProfile;
use reqwest::{Client, Response, Url};

use crate::error::IntakeError;
use crate::types::{CheckResponse, SubmitPayload};

/// Endpoint path under the intake root, without a leading slash so that it
/// joins beneath any path prefix (e.g. `/dev`).
const INSTAGRAM_ENDPOINT: &str = "discovery/extension/instagram";

const USER_ID_HEADER: &str = "X-USER-ID";

pub struct IntakeClient {
    client: Client,
    user_id: String,
    endpoint: Url,
}

impl IntakeClient {
    /// Creates a client for the intake service rooted at `root`.
    ///
    /// `root` may carry a path prefix such as `https://be.trendly.now/dev`.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`IntakeError::InvalidBaseUrl`] if `root`
    /// is not a valid URL.
    pub fn new(root: &str, user_id: &str, timeout_secs: u64) -> Result<Self, IntakeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("igleads/0.1 (lead-intake)")
            .build()?;

        // Ensure exactly one trailing slash so the endpoint joins beneath the
        // prefix instead of replacing its last segment.
        let normalised = format!("{}/", root.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join(INSTAGRAM_ENDPOINT))
            .map_err(|e| IntakeError::InvalidBaseUrl {
                url: root.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            user_id: user_id.to_owned(),
            endpoint,
        })
    }

    /// Asks the service whether a record for `username` already exists.
    ///
    /// # Errors
    ///
    /// - [`IntakeError::Status`] on a non-2xx response.
    /// - [`IntakeError::Http`] on network failure.
    /// - [`IntakeError::Deserialize`] if the body is not the expected JSON.
    pub async fn check_exists(&self, username: &str) -> Result<CheckResponse, IntakeError> {
        let url = self.check_url(username);
        tracing::debug!(%url, "checking intake for existing profile");

        let response = self
            .client
            .get(url.clone())
            .header(USER_ID_HEADER, &self.user_id)
            .send()
            .await?;
        let body = Self::success_body(response, &url).await?;

        serde_json::from_str(&body).map_err(|e| IntakeError::Deserialize {
            context: format!("check(username={username})"),
            source: e,
        })
    }

    /// Submits an annotated profile.
    ///
    /// Returns the service's JSON reply, or `Value::Null` for an empty body.
    ///
    /// # Errors
    ///
    /// - [`IntakeError::Status`] on a non-2xx response.
    /// - [`IntakeError::Http`] on network failure.
    /// - [`IntakeError::Deserialize`] if a non-empty body is not valid JSON.
    pub async fn submit(
        &self,
        profile: &NormalizedProfile,
    ) -> Result<serde_json::Value, IntakeError> {
        let url = self.endpoint.clone();
        tracing::debug!(%url, username = %profile.username(), "submitting profile");

        let response = self
            .client
            .post(url.clone())
            .header(USER_ID_HEADER, &self.user_id)
            .json(&SubmitPayload::new(profile))
            .send()
            .await?;
        let body = Self::success_body(response, &url).await?;

        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| IntakeError::Deserialize {
            context: format!("submit(username={})", profile.username()),
            source: e,
        })
    }

    fn check_url(&self, username: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("username", username);
        url
    }

    /// Returns the body text of a 2xx response, or [`IntakeError::Status`].
    async fn success_body(response: Response, url: &Url) -> Result<String, IntakeError> {
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "intake request failed");
            return Err(IntakeError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(root: &str) -> IntakeClient {
        IntakeClient::new(root, "tenant-1", 30).expect("client construction should not fail")
    }

    #[test]
    fn endpoint_joins_beneath_root() {
        let client = test_client("https://be.trendly.now");
        assert_eq!(
            client.endpoint.as_str(),
            "https://be.trendly.now/discovery/extension/instagram"
        );
    }

    #[test]
    fn endpoint_keeps_path_prefix() {
        let client = test_client("https://be.trendly.now/dev/");
        assert_eq!(
            client.endpoint.as_str(),
            "https://be.trendly.now/dev/discovery/extension/instagram"
        );
    }

    #[test]
    fn check_url_encodes_username() {
        let client = test_client("https://be.trendly.now");
        let url = client.check_url("ana & co");
        assert_eq!(
            url.as_str(),
            "https://be.trendly.now/discovery/extension/instagram?username=ana+%26+co"
        );
    }

    #[test]
    fn invalid_root_is_rejected() {
        let err = IntakeClient::new("not a url", "tenant-1", 30)
            .err()
            .expect("expected an error");
        assert!(matches!(err, IntakeError::InvalidBaseUrl { .. }));
    }
}
