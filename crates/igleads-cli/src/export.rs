//! Export command handler.

use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::ValueEnum;
use igleads_core::{
    export_file_name, normalize_with, profile_row, to_delimited_text, to_pretty_json, AppConfig,
    JsonFileProvider, RawScrapeProvider,
};
use serde_json::Value;

use crate::draft::draft_store;
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// One export row per record across `files`, or the draft alone when
/// `files` is empty.
fn collect_rows(config: &AppConfig, files: &[PathBuf]) -> anyhow::Result<Vec<Value>> {
    let options = config.normalize_options();

    if files.is_empty() {
        let session = Session::resume(&draft_store(config), options)?
            .ok_or_else(|| anyhow::anyhow!("no files given and no draft saved"))?;
        return Ok(vec![profile_row(&session.into_profile())]);
    }

    let mut rows = Vec::new();
    for file in files {
        for raw in JsonFileProvider::new(file).scrape_all()? {
            rows.push(profile_row(&normalize_with(&raw, &options)));
        }
    }
    Ok(rows)
}

pub(crate) fn render(rows: &[Value], format: ExportFormat) -> anyhow::Result<String> {
    Ok(match format {
        ExportFormat::Csv => to_delimited_text(rows),
        ExportFormat::Json => to_pretty_json(rows)?,
    })
}

/// Write the rendered export to `out`, to stdout for `-`, or to a
/// timestamped file in the working directory.
///
/// # Errors
///
/// Returns an error if an input cannot be read or the output cannot be
/// written.
pub(crate) fn run_export(
    config: &AppConfig,
    files: &[PathBuf],
    format: ExportFormat,
    out: Option<PathBuf>,
) -> anyhow::Result<()> {
    let rows = collect_rows(config, files)?;
    let body = render(&rows, format)?;

    let path =
        out.unwrap_or_else(|| PathBuf::from(export_file_name(Utc::now(), format.extension())));
    if path == Path::new("-") {
        println!("{body}");
        return Ok(());
    }

    std::fs::write(&path, body)
        .map_err(|e| anyhow::anyhow!("failed to write {}: {e}", path.display()))?;
    tracing::info!(path = %path.display(), rows = rows.len(), "export written");
    println!("exported {} rows to {}", rows.len(), path.display());
    Ok(())
}
