//! Draft inspection commands.

use clap::Subcommand;
use igleads_core::{AppConfig, FileDraftStore};

use crate::session::Session;

/// Sub-commands available under `draft`.
#[derive(Debug, Subcommand)]
pub enum DraftCommands {
    /// Print the saved draft as JSON
    Show,
    /// Discard the saved draft
    Clear,
}

pub(crate) fn draft_store(config: &AppConfig) -> FileDraftStore {
    FileDraftStore::new(&config.draft_path, config.normalize_options())
}

/// Print the saved draft, re-normalized to the configured schema.
///
/// # Errors
///
/// Returns an error if the draft file cannot be read or serialized.
pub(crate) fn run_draft_show(config: &AppConfig) -> anyhow::Result<()> {
    let store = draft_store(config);
    let Some(session) = Session::resume(&store, config.normalize_options())? else {
        println!("no draft saved at {}", store.path().display());
        return Ok(());
    };

    println!("{}", serde_json::to_string_pretty(session.profile())?);
    println!("lead score: {:.2}", session.score());
    Ok(())
}

/// Discard the saved draft.
///
/// # Errors
///
/// Returns an error if the draft file cannot be read or rewritten.
pub(crate) fn run_draft_clear(config: &AppConfig) -> anyhow::Result<()> {
    let mut store = draft_store(config);
    match Session::resume(&store, config.normalize_options())? {
        Some(session) => {
            let username = session.profile().username().to_owned();
            session.clear(&mut store)?;
            println!("draft for @{username} discarded");
        }
        None => println!("no draft to discard"),
    }
    Ok(())
}
