use std::path::PathBuf;

use url::Url;

use crate::error::ConfigError;
use crate::lead::GatePolicy;
use crate::normalize::NormalizeOptions;
use crate::schema::SchemaVersion;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    /// Tenant id sent to the intake service as `X-USER-ID`.
    pub user_id: Option<String>,
    pub intake_base_url: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub schema_version: SchemaVersion,
    pub profile_base_url: Url,
    pub draft_path: PathBuf,
    pub min_followers: u64,
    pub max_followers: u64,
}

impl AppConfig {
    /// Intake origin including the environment prefix. Development builds
    /// talk to the `/dev` deployment.
    #[must_use]
    pub fn intake_root(&self) -> String {
        let base = self.intake_base_url.trim_end_matches('/');
        match self.env {
            Environment::Development => format!("{base}/dev"),
            Environment::Test | Environment::Production => base.to_owned(),
        }
    }

    /// Tenant id for calls to the intake service.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] if `IGLEADS_USER_ID` is unset.
    pub fn require_user_id(&self) -> Result<&str, ConfigError> {
        self.user_id
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("IGLEADS_USER_ID".to_string()))
    }

    #[must_use]
    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            schema: self.schema_version,
            base_url: self.profile_base_url.clone(),
        }
    }

    #[must_use]
    pub fn gate_policy(&self) -> GatePolicy {
        GatePolicy {
            min_followers: self.min_followers,
            max_followers: self.max_followers,
            ..GatePolicy::default()
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("user_id", &self.user_id.as_ref().map(|_| "[redacted]"))
            .field("intake_base_url", &self.intake_base_url)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("schema_version", &self.schema_version)
            .field("profile_base_url", &self.profile_base_url.as_str())
            .field("draft_path", &self.draft_path)
            .field("min_followers", &self.min_followers)
            .field("max_followers", &self.max_followers)
            .finish()
    }
}
