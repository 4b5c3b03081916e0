//! Gate and annotation command handlers.

use std::path::Path;

use igleads_core::{normalize_with, AppConfig, JsonFileProvider, RawScrapeProvider};

use crate::draft::draft_store;
use crate::session::{ManualInput, Session};

/// Normalize every record in `file` and report the gate decision for each.
///
/// When the file holds exactly one accepted profile it becomes the draft,
/// replacing any previous one, unless `no_draft` is set.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the draft cannot be saved.
/// Gate rejections are reported, not propagated.
pub(crate) fn run_evaluate(config: &AppConfig, file: &Path, no_draft: bool) -> anyhow::Result<()> {
    let records = JsonFileProvider::new(file).scrape_all()?;
    if records.is_empty() {
        println!("no records in {}", file.display());
        return Ok(());
    }

    let options = config.normalize_options();
    let policy = config.gate_policy();
    let single = records.len() == 1;
    let mut accepted = 0usize;

    for raw in &records {
        let profile = normalize_with(raw, &options);
        let handle = format!("@{}", profile.username());
        match Session::from_profile(profile, options.clone(), &policy) {
            Ok(session) => {
                accepted += 1;
                println!("{handle:<32}accepted  score {:.2}", session.score());
                if single && !no_draft {
                    let mut store = draft_store(config);
                    session.save(&mut store)?;
                    println!("draft saved to {}", store.path().display());
                }
            }
            Err(rejection) => {
                tracing::info!(%handle, %rejection, "profile rejected");
                println!("{handle:<32}rejected  {rejection}");
            }
        }
    }

    if !single {
        println!("{accepted} of {} profiles accepted", records.len());
    }
    Ok(())
}

/// Merge `input` into the draft and save it.
///
/// With `from`, a new session is opened from that scrape file first; the
/// gate applies and a rejection aborts the command.
///
/// # Errors
///
/// Returns an error if there is no draft to annotate, the scrape is rejected,
/// or the draft cannot be read or written.
pub(crate) fn run_annotate(
    config: &AppConfig,
    from: Option<&Path>,
    input: &ManualInput,
) -> anyhow::Result<()> {
    let options = config.normalize_options();
    let mut store = draft_store(config);

    let mut session = match from {
        Some(path) => {
            let raw = JsonFileProvider::new(path).scrape()?;
            Session::from_scrape(&raw, options, &config.gate_policy())
                .map_err(|rejection| anyhow::anyhow!("{rejection}"))?
        }
        None => Session::resume(&store, options)?.ok_or_else(|| {
            anyhow::anyhow!(
                "no draft at {}; run `evaluate` or pass --from",
                store.path().display()
            )
        })?,
    };

    let profile = session.annotate(input);
    println!("{}", serde_json::to_string_pretty(&profile.manual)?);
    session.save(&mut store)?;
    println!("draft for @{} saved", session.profile().username());
    Ok(())
}
