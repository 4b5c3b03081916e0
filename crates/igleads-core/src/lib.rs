pub mod app_config;
pub mod coerce;
pub mod compact;
pub mod config;
pub mod draft;
pub mod error;
pub mod export;
pub mod lead;
pub mod normalize;
pub mod profile;
pub mod provider;
pub mod schema;
pub mod username;

pub use app_config::{AppConfig, Environment};
pub use compact::{parse_compact_number, parse_compact_number_or_zero};
pub use config::{load_app_config, load_app_config_from_env};
pub use draft::{DraftStore, FileDraftStore, MemoryDraftStore, DRAFT_KEY};
pub use error::{ConfigError, CoreError};
pub use export::{export_file_name, profile_row, to_delimited_text, to_pretty_json};
pub use lead::{evaluate, score, GateOutcome, GatePolicy, Rejection};
pub use normalize::{normalize, normalize_manual, normalize_with, NormalizeOptions};
pub use profile::{
    About, CountPair, Gender, Manual, NormalizedProfile, ProfileActions, ProfileLink, ReelItem,
    ReelOverlays, Reels, Stats,
};
pub use provider::{JsonFileProvider, RawScrapeProvider};
pub use schema::SchemaVersion;
pub use username::extract_username;
