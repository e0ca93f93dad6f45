use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use roster_core::{
    normalize_identity_key, Collector, DetailLedger, ListItem, ListSource, PairedNodes,
    TargetWindow, WindowError,
};
use roster_logging::{roster_info, roster_warn};
use thiserror::Error;

use crate::columns::{
    CURRENT_FIRM_EXPERIENCE, MESSAGE, MISSING_CELL, PROFILE_URL, SENT_TIME, TOTAL_EXPERIENCE,
};
use crate::{
    load_profile_urls, parse_date_range, total_experience, EngineEvent, ExportError,
    ExportSummary, HarvestConfig, HarvestProgress, IncrementalExport, ListKind, MonthYear,
    ProfileDetails, ProfileEnricher, ProfileOutcome, ProfileRow, ProgressSink, Stage,
    UrlListError,
};

/// Source of "now" for export timestamps and ongoing experience ranges.
pub type Clock = Arc<dyn Fn() -> NaiveDateTime + Send + Sync>;

pub fn system_clock() -> Clock {
    Arc::new(|| Local::now().naive_local())
}

#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("invalid connection range: {0}")]
    InvalidRange(#[from] WindowError),
    #[error("failed to load profile URL list: {0}")]
    UrlList(#[from] UrlListError),
    #[error("export failed: {0}")]
    Export(#[from] ExportError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarvestSummary {
    pub collected: usize,
    pub enriched: usize,
    pub failed: usize,
    pub skipped: usize,
    /// Last snapshot written; `None` when no profile was enriched.
    pub export: Option<ExportSummary>,
}

enum Target {
    /// Positions of the list, in discovery order.
    Window(TargetWindow),
    /// Only these identity keys, wherever they appear in the list.
    Listed(Vec<String>),
}

/// One end-to-end run: collect the configured list, enrich each profile once,
/// and keep the export on disk up to date after every profile.
pub struct Harvest {
    config: HarvestConfig,
    target: Target,
    collector: Collector,
    clock: Clock,
}

impl Harvest {
    pub fn new(config: HarvestConfig) -> Result<Self, HarvestError> {
        let target = match &config.url_list {
            Some(path) => Target::Listed(load_profile_urls(path)?),
            None => Target::Window(config.window()?),
        };
        let collector = Collector::new(config.collector.clone());
        Ok(Self {
            config,
            target,
            collector,
            clock: system_clock(),
        })
    }

    pub fn with_collector(mut self, collector: Collector) -> Self {
        self.collector = collector;
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Restricts the run to the given profile URLs, replacing any window.
    pub fn with_profile_urls<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let keys = urls
            .into_iter()
            .map(|url| normalize_identity_key(url.as_ref()))
            .filter(|key| !key.is_empty() && seen.insert(key.clone()))
            .collect();
        self.target = Target::Listed(keys);
        self
    }

    fn target_count(&self) -> usize {
        match &self.target {
            Target::Window(window) => window.target_count(),
            Target::Listed(keys) => keys.len(),
        }
    }

    pub fn collect<S>(&self, source: &mut S) -> Vec<ListItem>
    where
        S: ListSource + ?Sized,
    {
        match self.config.list {
            ListKind::PendingInvitations => self.collect_from(source),
            ListKind::Followers => self.collect_from(&mut PairedNodes::new(source)),
        }
    }

    fn collect_from<S>(&self, source: &mut S) -> Vec<ListItem>
    where
        S: ListSource + ?Sized,
    {
        match &self.target {
            Target::Window(window) => {
                roster_info!(
                    "Retrieving {:?} {} to {}",
                    self.config.list,
                    window.start(),
                    window.end()
                );
                self.collector.collect_window(source, *window)
            }
            Target::Listed(keys) => {
                if keys.is_empty() {
                    roster_warn!("No URLs found in the profile list.");
                    return Vec::new();
                }
                roster_info!("Looking for {} listed profiles", keys.len());
                let wanted: HashSet<&str> = keys.iter().map(String::as_str).collect();
                self.collector
                    .collect_where(source, wanted.len(), |item| wanted.contains(item.key()))
            }
        }
    }

    pub fn run<S, E>(
        &self,
        source: &mut S,
        enricher: &mut E,
        sink: &dyn ProgressSink,
    ) -> Result<HarvestSummary, HarvestError>
    where
        S: ListSource + ?Sized,
        E: ProfileEnricher + ?Sized,
    {
        sink.emit(progress(Stage::Collecting, 0, self.target_count()));
        let items = self.collect(source);
        let total = items.len();
        sink.emit(progress(Stage::Enriching, 0, total));

        let mut ledger = DetailLedger::new();
        let mut export =
            IncrementalExport::new(self.config.export_options(), self.config.column_selection());
        let mut summary = HarvestSummary {
            collected: total,
            ..HarvestSummary::default()
        };

        for (index, item) in items.iter().enumerate() {
            if !ledger.mark(item.key()) {
                roster_info!("Skipping duplicate URL: {}", item.key());
                summary.skipped += 1;
                continue;
            }

            roster_info!("Scraping profile: {}", item.key());
            let result = match enricher.enrich(item) {
                Ok(details) => {
                    let now = (self.clock)();
                    let row = build_row(item, details, MonthYear::from_date(now.date()));
                    let written = export.push(row, now)?;
                    summary.enriched += 1;
                    Ok(ProfileOutcome {
                        row: written.row_count,
                        export_path: written.output_path.clone(),
                    })
                }
                Err(err) => {
                    roster_warn!("Error scraping {}: {}", item.key(), err);
                    summary.failed += 1;
                    Err(err)
                }
            };
            sink.emit(EngineEvent::ProfileCompleted {
                key: item.key().to_string(),
                result,
            });
            sink.emit(progress(Stage::Enriching, index + 1, total));
        }

        summary.export = export.into_summary();
        sink.emit(progress(Stage::Done, total, total));
        roster_info!(
            "Harvest finished: {} collected, {} enriched, {} failed",
            summary.collected,
            summary.enriched,
            summary.failed
        );
        Ok(summary)
    }
}

fn progress(stage: Stage, done: usize, total: usize) -> EngineEvent {
    EngineEvent::Progress(HarvestProgress { stage, done, total })
}

/// Scraped fields, then list-card fields, then derived experience columns.
fn build_row(item: &ListItem, details: ProfileDetails, today: MonthYear) -> ProfileRow {
    let mut row = ProfileRow::new();
    for (column, value) in details.fields {
        row.set(column, value);
    }
    row.set(PROFILE_URL, item.key());
    for column in [MESSAGE, SENT_TIME] {
        row.set(column, item.field(column).unwrap_or(MISSING_CELL));
    }

    let ranges: Vec<_> = details
        .experience
        .iter()
        .map(|entry| (parse_date_range(&entry.date_range), entry.current_firm))
        .collect();
    let all = total_experience(ranges.iter().map(|(range, _)| range), today);
    let current = total_experience(
        ranges
            .iter()
            .filter(|(_, current_firm)| *current_firm)
            .map(|(range, _)| range),
        today,
    );
    row.set(TOTAL_EXPERIENCE, all.to_string());
    row.set(CURRENT_FIRM_EXPERIENCE, current.to_string());
    row
}
