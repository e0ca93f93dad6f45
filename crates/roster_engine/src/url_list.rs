use std::collections::HashSet;
use std::path::{Path, PathBuf};

use roster_core::normalize_identity_key;
use roster_logging::roster_info;
use thiserror::Error;

/// Header of the column holding profile URLs.
pub const URL_COLUMN: &str = "URL";

#[derive(Debug, Error)]
pub enum UrlListError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("{path:?} has no 'URL' column")]
    MissingColumn { path: PathBuf },
}

/// Reads the `URL` column of a CSV file as identity keys.
///
/// Blank cells and cells that normalise to nothing (e.g. `/`) are skipped,
/// and repeated URLs are kept once, in file order.
pub fn load_profile_urls(path: &Path) -> Result<Vec<String>, UrlListError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let column = reader
        .headers()?
        .iter()
        .position(|header| header.trim() == URL_COLUMN)
        .ok_or_else(|| UrlListError::MissingColumn {
            path: path.to_path_buf(),
        })?;

    let mut seen = HashSet::new();
    let mut urls = Vec::new();
    for record in reader.records() {
        let record = record?;
        let Some(cell) = record.get(column).map(str::trim) else {
            continue;
        };
        if cell.is_empty() {
            continue;
        }
        let key = normalize_identity_key(cell);
        if !key.is_empty() && seen.insert(key.clone()) {
            urls.push(key);
        }
    }

    roster_info!("Loaded {} profile URLs from {:?}", urls.len(), path);
    Ok(urls)
}
