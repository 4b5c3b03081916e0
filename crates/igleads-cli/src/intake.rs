//! Intake service command handlers.
//!
//! A failed submission leaves the draft in place so it can be retried.

use igleads_core::{extract_username, AppConfig};
use igleads_intake::IntakeClient;

use crate::draft::draft_store;
use crate::session::Session;

fn build_client(config: &AppConfig) -> anyhow::Result<IntakeClient> {
    let user_id = config
        .require_user_id()
        .map_err(|e| anyhow::anyhow!("{e}; cannot reach the intake service"))?;

    IntakeClient::new(&config.intake_root(), user_id, config.request_timeout_secs)
        .map_err(|e| anyhow::anyhow!("failed to build intake client: {e}"))
}

/// Accepts a bare handle, an `@handle`, or a profile URL.
pub(crate) fn resolve_username(target: &str) -> anyhow::Result<String> {
    let target = target.trim();
    if target.starts_with("http://") || target.starts_with("https://") {
        return extract_username(target)
            .ok_or_else(|| anyhow::anyhow!("'{target}' is not an Instagram profile URL"));
    }

    let handle = target.trim_start_matches('@');
    if handle.is_empty() {
        anyhow::bail!("username must not be empty");
    }
    Ok(handle.to_owned())
}

/// Report whether the intake service already has `target`.
///
/// # Errors
///
/// Returns an error if the user id is unset, `target` is not a username or
/// profile URL, or the request fails.
pub(crate) async fn run_check(config: &AppConfig, target: &str) -> anyhow::Result<()> {
    let username = resolve_username(target)?;
    let client = build_client(config)?;

    if client.check_exists(&username).await?.exists {
        println!("@{username} already exists on the server; try another profile");
    } else {
        println!("@{username} is new");
    }
    Ok(())
}

/// Submit the draft and discard it on success.
///
/// # Errors
///
/// Returns an error if there is no draft, the profile has no username, the
/// profile already exists (with `check`), or the request fails.
pub(crate) async fn run_submit(config: &AppConfig, check: bool) -> anyhow::Result<()> {
    let mut store = draft_store(config);
    let session = Session::resume(&store, config.normalize_options())?
        .ok_or_else(|| anyhow::anyhow!("no draft to submit; run `evaluate` first"))?;

    let username = session.profile().username().to_owned();
    if username == igleads_core::coerce::UNKNOWN {
        anyhow::bail!("draft has no username; re-scrape the profile");
    }

    let client = build_client(config)?;
    if check && client.check_exists(&username).await?.exists {
        anyhow::bail!("@{username} already exists on the server; try another profile");
    }

    let reply = client.submit(session.profile()).await?;
    tracing::info!(%username, "profile submitted");
    println!("submitted @{username}");
    if !reply.is_null() {
        println!("{}", serde_json::to_string_pretty(&reply)?);
    }

    session.clear(&mut store)?;
    Ok(())
}
