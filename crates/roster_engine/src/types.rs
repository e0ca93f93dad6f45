use std::path::PathBuf;

use crate::EnrichError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Collecting,
    Enriching,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestProgress {
    pub stage: Stage,
    pub done: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileOutcome {
    /// 1-based row in the export.
    pub row: usize,
    pub export_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Progress(HarvestProgress),
    ProfileCompleted {
        key: String,
        result: Result<ProfileOutcome, EnrichError>,
    },
}
