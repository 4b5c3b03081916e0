use std::path::PathBuf;

use url::Url;

use crate::app_config::{AppConfig, Environment};
use crate::normalize::DEFAULT_PROFILE_BASE_URL;
use crate::schema::SchemaVersion;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("IGLEADS_ENV", "development"))?;

    // An empty tenant id is treated as unset.
    let user_id = lookup("IGLEADS_USER_ID")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let intake_base_url = or_default("IGLEADS_INTAKE_BASE_URL", "https://be.trendly.now");
    Url::parse(&intake_base_url).map_err(|e| ConfigError::InvalidEnvVar {
        var: "IGLEADS_INTAKE_BASE_URL".to_string(),
        reason: e.to_string(),
    })?;

    let log_level = or_default("IGLEADS_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("IGLEADS_REQUEST_TIMEOUT_SECS", "30")?;

    let schema_version = or_default("IGLEADS_SCHEMA_VERSION", "3")
        .parse::<SchemaVersion>()
        .map_err(|reason| ConfigError::InvalidEnvVar {
            var: "IGLEADS_SCHEMA_VERSION".to_string(),
            reason,
        })?;

    let profile_base_url = Url::parse(&or_default(
        "IGLEADS_PROFILE_BASE_URL",
        DEFAULT_PROFILE_BASE_URL,
    ))
    .map_err(|e| ConfigError::InvalidEnvVar {
        var: "IGLEADS_PROFILE_BASE_URL".to_string(),
        reason: e.to_string(),
    })?;

    let draft_path = PathBuf::from(or_default("IGLEADS_DRAFT_PATH", "./igleads-draft.json"));

    let min_followers = parse_u64("IGLEADS_MIN_FOLLOWERS", "1000")?;
    let max_followers = parse_u64("IGLEADS_MAX_FOLLOWERS", "500000")?;
    if min_followers > max_followers {
        return Err(ConfigError::InvalidEnvVar {
            var: "IGLEADS_MIN_FOLLOWERS".to_string(),
            reason: format!("{min_followers} exceeds IGLEADS_MAX_FOLLOWERS ({max_followers})"),
        });
    }

    Ok(AppConfig {
        env,
        user_id,
        intake_base_url,
        log_level,
        request_timeout_secs,
        schema_version,
        profile_base_url,
        draft_path,
        min_followers,
        max_followers,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s.trim() {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "IGLEADS_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
