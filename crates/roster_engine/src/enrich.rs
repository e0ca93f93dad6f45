use std::collections::BTreeMap;

use roster_core::ListItem;
use thiserror::Error;

/// One experience entry as captured from a profile, before date parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperienceEntry {
    /// Caption text, e.g. `"Jan 2014 - Present · 10 yrs"`.
    pub date_range: String,
    /// The role belongs to the profile's current employer.
    pub current_firm: bool,
}

impl ExperienceEntry {
    pub fn new(date_range: impl Into<String>, current_firm: bool) -> Self {
        Self {
            date_range: date_range.into(),
            current_firm,
        }
    }
}

/// Extended fields fetched for one collected item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDetails {
    pub fields: BTreeMap<String, String>,
    pub experience: Vec<ExperienceEntry>,
}

impl ProfileDetails {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn with_experience(mut self, entry: ExperienceEntry) -> Self {
        self.experience.push(entry);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnrichError {
    #[error("profile page unavailable: {0}")]
    Unavailable(String),
    #[error("profile page did not finish loading within {0} ms")]
    LoadTimeout(u64),
    #[error("session is no longer authenticated")]
    SessionExpired,
}

/// Fetches details for one collected item, typically by visiting its page.
///
/// Called at most once per identity key per run. Sections that cannot be
/// read should come back as placeholder values rather than an error; an
/// `Err` drops the whole profile from the export.
pub trait ProfileEnricher {
    fn enrich(&mut self, item: &ListItem) -> Result<ProfileDetails, EnrichError>;
}

impl<E: ProfileEnricher + ?Sized> ProfileEnricher for &mut E {
    fn enrich(&mut self, item: &ListItem) -> Result<ProfileDetails, EnrichError> {
        (**self).enrich(item)
    }
}
