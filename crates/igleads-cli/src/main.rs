mod draft;
mod export;
mod intake;
mod lead;
mod session;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use igleads_core::Gender;
use tracing_subscriber::EnvFilter;

use crate::draft::DraftCommands;
use crate::export::ExportFormat;
use crate::session::ManualInput;

#[derive(Debug, Parser)]
#[command(name = "igleads")]
#[command(about = "Instagram lead capture: gate, annotate, submit, export")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Normalize scraped profiles and apply the lead gate
    Evaluate {
        /// JSON file holding one scrape or an array of scrapes
        file: PathBuf,
        /// Report only; do not save an accepted profile as the draft
        #[arg(long)]
        no_draft: bool,
    },
    /// Add manual annotations to the draft profile
    Annotate {
        /// Start from this scrape instead of the saved draft
        #[arg(long)]
        from: Option<PathBuf>,
        /// male, female, other
        #[arg(long)]
        gender: Option<String>,
        /// Niche tag; repeat for several. Replaces the current list.
        #[arg(long = "niche")]
        niches: Vec<String>,
        #[arg(long)]
        location: Option<String>,
        /// Aesthetics score on the configured schema scale
        #[arg(long)]
        aesthetics: Option<f64>,
    },
    /// Inspect or discard the saved draft
    Draft {
        #[command(subcommand)]
        command: DraftCommands,
    },
    /// Ask the intake service whether a profile is already recorded
    Check {
        /// Username or profile URL
        target: String,
    },
    /// Submit the draft profile to the intake service
    Submit {
        /// Skip submission when the profile already exists
        #[arg(long)]
        check: bool,
    },
    /// Export profiles as CSV or JSON
    Export {
        /// Scrape files to export; the draft is exported when none are given
        files: Vec<PathBuf>,
        #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
        /// Output path, or `-` for stdout. Defaults to a timestamped file name.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the username in an Instagram profile URL
    Username { url: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = igleads_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Some(Commands::Evaluate { file, no_draft }) => {
            lead::run_evaluate(&config, &file, no_draft)?;
        }
        Some(Commands::Annotate {
            from,
            gender,
            niches,
            location,
            aesthetics,
        }) => {
            let input = ManualInput {
                gender: gender.as_deref().map(Gender::parse),
                niches: (!niches.is_empty()).then_some(niches),
                location,
                aesthetics_score: aesthetics,
            };
            lead::run_annotate(&config, from.as_deref(), &input)?;
        }
        Some(Commands::Draft { command }) => match command {
            DraftCommands::Show => draft::run_draft_show(&config)?,
            DraftCommands::Clear => draft::run_draft_clear(&config)?,
        },
        Some(Commands::Check { target }) => intake::run_check(&config, &target).await?,
        Some(Commands::Submit { check }) => intake::run_submit(&config, check).await?,
        Some(Commands::Export { files, format, out }) => {
            export::run_export(&config, &files, format, out)?;
        }
        Some(Commands::Username { url }) => match igleads_core::extract_username(&url) {
            Some(username) => println!("{username}"),
            None => anyhow::bail!("'{url}' is not an Instagram profile URL"),
        },
        None => println!("igleads ready; run with --help for commands"),
    }

    Ok(())
}
