use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use roster_logging::{roster_debug, roster_info};
use serde_json::json;

use crate::columns::MISSING_CELL;
use crate::persist::{OutputDir, PersistError};

const TIMESTAMP_FORMAT: &str = "%Y_%m_%d_%H_%M_%S";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
    #[error("manifest error: {0}")]
    Manifest(#[from] serde_json::Error),
}

/// Ordered, caller-chosen list of columns to export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSelection {
    columns: Vec<String>,
}

impl ColumnSelection {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Selected columns that at least one row has a value for, in selection order.
    pub fn header_for<'a>(&'a self, rows: &[ProfileRow]) -> Vec<&'a str> {
        self.columns
            .iter()
            .filter(|column| rows.iter().any(|row| row.get(column).is_some()))
            .map(String::as_str)
            .collect()
    }
}

/// One exported profile: column name to cell text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileRow {
    cells: BTreeMap<String, String>,
}

impl ProfileRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.cells.insert(column.into(), value.into());
    }

    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(column, value);
        self
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }
}

/// Renders rows as CSV under the header chosen by `selection`.
pub fn render_table(selection: &ColumnSelection, rows: &[ProfileRow]) -> Result<Vec<u8>, ExportError> {
    let header = selection.header_for(rows);
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&header)?;
    for row in rows {
        writer.write_record(
            header
                .iter()
                .map(|column| row.get(column).unwrap_or(MISSING_CELL)),
        )?;
    }
    writer.into_inner().map_err(|e| ExportError::Io(e.into_error()))
}

/// `linkedin_output.csv` at 2024-05-01 09:03:07 becomes
/// `linkedin_output_2024_05_01_09_03_07.csv`.
pub fn timestamped_filename(output_file: &str, at: NaiveDateTime) -> String {
    let stem = Path::new(output_file)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("export");
    format!("{stem}_{}.csv", at.format(TIMESTAMP_FORMAT))
}

fn manifest_filename(output_file: &str) -> String {
    let stem = Path::new(output_file)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("export");
    format!("{stem}.manifest.json")
}

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub output_dir: PathBuf,
    pub output_file: String,
    pub write_manifest: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            output_file: "linkedin_output.csv".to_string(),
            write_manifest: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub row_count: usize,
    pub columns: Vec<String>,
    pub output_path: PathBuf,
    pub manifest_path: Option<PathBuf>,
}

/// Writes the table as a timestamped snapshot, plus the manifest if enabled.
pub fn write_export(
    rows: &[ProfileRow],
    selection: &ColumnSelection,
    options: &ExportOptions,
    at: NaiveDateTime,
) -> Result<ExportSummary, ExportError> {
    let dir = OutputDir::new(options.output_dir.clone());
    let table = render_table(selection, rows)?;
    let filename = timestamped_filename(&options.output_file, at);
    let output_path = dir.write_atomic(&filename, &table)?;
    let columns: Vec<String> = selection
        .header_for(rows)
        .into_iter()
        .map(ToOwned::to_owned)
        .collect();

    let manifest_path = if options.write_manifest {
        let manifest = json!({
            "file": filename,
            "row_count": rows.len(),
            "columns": columns,
            "generated": at.format("%Y-%m-%dT%H:%M:%S").to_string(),
        });
        let body = serde_json::to_string_pretty(&manifest)?;
        Some(dir.write_atomic(&manifest_filename(&options.output_file), body.as_bytes())?)
    } else {
        None
    };

    roster_debug!("Wrote {} rows to {:?}", rows.len(), output_path);
    Ok(ExportSummary {
        row_count: rows.len(),
        columns,
        output_path,
        manifest_path,
    })
}

/// Export that is rewritten in full after every added row.
///
/// Each snapshot gets a fresh timestamped name; the previous snapshot is
/// removed once the new one is on disk, so at most one table exists.
#[derive(Debug)]
pub struct IncrementalExport {
    options: ExportOptions,
    selection: ColumnSelection,
    rows: Vec<ProfileRow>,
    last: Option<ExportSummary>,
}

impl IncrementalExport {
    pub fn new(options: ExportOptions, selection: ColumnSelection) -> Self {
        Self {
            options,
            selection,
            rows: Vec::new(),
            last: None,
        }
    }

    /// Adds `row` and rewrites the export. On error the row is not kept, so
    /// `rows` always matches the last snapshot on disk.
    pub fn push(&mut self, row: ProfileRow, at: NaiveDateTime) -> Result<&ExportSummary, ExportError> {
        self.rows.push(row);
        let summary = match write_export(&self.rows, &self.selection, &self.options, at) {
            Ok(summary) => summary,
            Err(err) => {
                self.rows.pop();
                return Err(err);
            }
        };

        if let Some(previous) = &self.last {
            if previous.output_path != summary.output_path {
                let dir = OutputDir::new(self.options.output_dir.clone());
                if dir.remove(&previous.output_path)? {
                    roster_info!("Old file {:?} deleted.", previous.output_path);
                }
            }
        }

        Ok(&*self.last.insert(summary))
    }

    pub fn rows(&self) -> &[ProfileRow] {
        &self.rows
    }

    pub fn last_summary(&self) -> Option<&ExportSummary> {
        self.last.as_ref()
    }

    pub fn into_summary(self) -> Option<ExportSummary> {
        self.last
    }
}
