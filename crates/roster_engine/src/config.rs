use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use roster_core::{CollectorSettings, TargetWindow, WindowError};
use roster_logging::roster_info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::columns;
use crate::{ColumnSelection, ExportOptions};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("invalid connection range: {0}")]
    InvalidRange(#[from] WindowError),
}

/// Which LinkedIn list the source is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListKind {
    /// Sent invitations still awaiting an answer. One node per profile.
    #[default]
    PendingInvitations,
    /// Followers page. Each profile renders as two adjacent nodes.
    Followers,
}

/// Everything one harvest run needs, usually read from a RON file.
///
/// ```text
/// (
///     output_file: "linkedin_output.csv",
///     include_columns: ["fullName", "headline", "message", "sent time"],
///     list: Followers,
///     connection_range: (92, 94),
///     collector: (max_stall_retries: 3),
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
    pub output_file: String,
    pub output_dir: PathBuf,
    pub include_columns: Vec<String>,
    pub list: ListKind,
    /// 1-indexed inclusive positions of the pending list to harvest.
    pub connection_range: (u32, u32),
    /// CSV with a `URL` column. When set, only these profiles are harvested
    /// and `connection_range` is ignored.
    pub url_list: Option<PathBuf>,
    pub write_manifest: bool,
    pub collector: CollectorSettings,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        let export = ExportOptions::default();
        Self {
            output_file: export.output_file,
            output_dir: export.output_dir,
            include_columns: [
                columns::FULL_NAME,
                columns::SUMMARY,
                columns::HEADLINE,
                columns::PROFILE_URL,
                columns::MESSAGE,
                columns::SENT_TIME,
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            list: ListKind::default(),
            connection_range: (1, 10),
            url_list: None,
            write_manifest: export.write_manifest,
            collector: CollectorSettings::default(),
        }
    }
}

impl HarvestConfig {
    pub fn window(&self) -> Result<TargetWindow, WindowError> {
        let (start, end) = self.connection_range;
        TargetWindow::new(start, end)
    }

    pub fn column_selection(&self) -> ColumnSelection {
        ColumnSelection::new(self.include_columns.iter().cloned())
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            output_dir: self.output_dir.clone(),
            output_file: self.output_file.clone(),
            write_manifest: self.write_manifest,
        }
    }
}

/// Parses and validates a RON config. Missing fields take their defaults.
pub fn parse_config(text: &str) -> Result<HarvestConfig, ConfigError> {
    let config: HarvestConfig = ron::from_str(text)?;
    config.window()?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<HarvestConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&text)?;
    roster_info!("Loaded config from {:?}", path);
    Ok(config)
}
