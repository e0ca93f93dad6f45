//! Roster engine: enrichment, export and the end-to-end harvest run.
mod config;
mod dates;
mod enrich;
mod export;
mod harvest;
mod persist;
mod sink;
mod types;
mod url_list;

pub mod columns;

pub use config::{load_config, parse_config, ConfigError, HarvestConfig, ListKind};
pub use dates::{
    parse_date_range, parse_month_year, total_experience, DateRange, ExperienceTotal, MonthYear,
    RangeEnd,
};
pub use enrich::{EnrichError, ExperienceEntry, ProfileDetails, ProfileEnricher};
pub use export::{
    render_table, timestamped_filename, write_export, ColumnSelection, ExportError,
    ExportOptions, ExportSummary, IncrementalExport, ProfileRow,
};
pub use harvest::{system_clock, Clock, Harvest, HarvestError, HarvestSummary};
pub use persist::{OutputDir, PersistError};
pub use sink::{ChannelProgressSink, NoopProgressSink, ProgressSink};
pub use types::{EngineEvent, HarvestProgress, ProfileOutcome, Stage};
pub use url_list::{load_profile_urls, UrlListError};
