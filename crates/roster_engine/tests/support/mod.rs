#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Once};

use chrono::{NaiveDate, NaiveDateTime};
use roster_core::{Collector, CollectorSettings, ListItem, ListSource, VisibleItem};
use roster_engine::{Clock, EnrichError, ExperienceEntry, ProfileDetails, ProfileEnricher};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(roster_logging::initialize_for_tests);
}

pub fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 1)
        .and_then(|d| d.and_hms_opt(h, m, s))
        .unwrap()
}

/// Clock that moves one second forward on every call, so each snapshot
/// gets a distinct filename.
pub fn ticking_clock() -> Clock {
    let ticks = Arc::new(std::sync::atomic::AtomicU32::new(0));
    Arc::new(move || {
        let n = ticks.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        at(12, n / 60, n % 60)
    })
}

pub fn quiet_collector() -> Collector {
    Collector::new(CollectorSettings::without_delays())
}

pub fn profile(slug: &str) -> String {
    format!("https://www.linkedin.com/in/{slug}")
}

/// Sent-invitations page: each trigger reveals `per_trigger` more cards.
pub struct PendingList {
    cards: Vec<ListItem>,
    revealed: usize,
    per_trigger: usize,
    nodes_per_card: usize,
}

impl PendingList {
    pub fn new(slugs: &[&str], per_trigger: usize) -> Self {
        Self {
            cards: slugs
                .iter()
                .map(|slug| {
                    ListItem::from_profile_url(&profile(slug))
                        .with_field("message", format!("Hello {slug}"))
                        .with_field("sent time", "Sent 2 weeks ago")
                })
                .collect(),
            revealed: 0,
            per_trigger,
            nodes_per_card: 1,
        }
    }

    /// Followers page: every card is rendered as a name link followed by an
    /// avatar link.
    pub fn followers(slugs: &[&str], per_trigger: usize) -> Self {
        Self {
            nodes_per_card: 2,
            ..Self::new(slugs, per_trigger)
        }
    }
}

impl ListSource for PendingList {
    fn trigger_more_content(&mut self) {
        self.revealed = (self.revealed + self.per_trigger).min(self.cards.len());
    }

    fn read_visible_items(&mut self) -> Vec<VisibleItem> {
        self.cards[..self.revealed]
            .iter()
            .flat_map(|card| {
                let avatar = ListItem::new(format!("{}/overlay/photo", card.key()));
                [card.clone(), avatar].into_iter().take(self.nodes_per_card)
            })
            .map(Ok)
            .collect()
    }
}

/// Enricher answering from a canned table; unknown keys are unavailable.
#[derive(Default)]
pub struct CannedProfiles {
    profiles: HashMap<String, Result<ProfileDetails, EnrichError>>,
    pub visited: Vec<String>,
}

impl CannedProfiles {
    pub fn with(mut self, slug: &str, details: ProfileDetails) -> Self {
        self.profiles.insert(profile(slug), Ok(details));
        self
    }

    pub fn failing(mut self, slug: &str, err: EnrichError) -> Self {
        self.profiles.insert(profile(slug), Err(err));
        self
    }
}

impl ProfileEnricher for CannedProfiles {
    fn enrich(&mut self, item: &ListItem) -> Result<ProfileDetails, EnrichError> {
        self.visited.push(item.key().to_string());
        self.profiles
            .get(item.key())
            .cloned()
            .unwrap_or_else(|| Err(EnrichError::Unavailable(item.key().to_string())))
    }
}

pub fn details(name: &str, dates: &str) -> ProfileDetails {
    ProfileDetails::new()
        .with_field("fullName", name)
        .with_field("headline", format!("{name} at Acme"))
        .with_experience(ExperienceEntry::new(dates, true))
}
