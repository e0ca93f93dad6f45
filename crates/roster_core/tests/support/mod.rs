#![allow(dead_code)]

use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use roster_core::{ListItem, ListSource, Pacer, ReadMiss, VisibleItem};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(roster_logging::initialize_for_tests);
}

pub fn keys(items: &[ListItem]) -> Vec<&str> {
    items.iter().map(ListItem::key).collect()
}

/// Paged infinite-scroll list: each trigger reveals `per_trigger` more items
/// of the current page; `advance_page` moves to the next page if there is one.
pub struct ScrollingList {
    pages: Vec<Vec<String>>,
    page: usize,
    revealed: usize,
    per_trigger: usize,
    population_hint: Option<usize>,
    pub triggers: usize,
    pub reads: usize,
    pub advances: usize,
}

impl ScrollingList {
    pub fn new(population: &[&str], per_trigger: usize) -> Self {
        Self::paged(&[population], per_trigger)
    }

    pub fn paged(pages: &[&[&str]], per_trigger: usize) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|page| page.iter().map(|k| k.to_string()).collect())
                .collect(),
            page: 0,
            revealed: 0,
            per_trigger,
            population_hint: None,
            triggers: 0,
            reads: 0,
            advances: 0,
        }
    }

    pub fn with_population_hint(mut self, total: usize) -> Self {
        self.population_hint = Some(total);
        self
    }

    fn current(&self) -> &[String] {
        self.pages.get(self.page).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl ListSource for ScrollingList {
    fn trigger_more_content(&mut self) {
        self.triggers += 1;
        self.revealed = (self.revealed + self.per_trigger).min(self.current().len());
    }

    fn read_visible_items(&mut self) -> Vec<VisibleItem> {
        self.reads += 1;
        self.current()[..self.revealed]
            .iter()
            .map(|key| Ok(ListItem::new(key.clone())))
            .collect()
    }

    fn advance_page(&mut self) -> bool {
        self.advances += 1;
        if self.page + 1 < self.pages.len() {
            self.page += 1;
            self.revealed = 0;
            true
        } else {
            false
        }
    }

    fn population_hint(&mut self) -> Option<usize> {
        self.population_hint
    }
}

/// Renders every entry of the wrapped list as two adjacent nodes, the second
/// being an avatar link with its own key, the way the followers page does.
pub struct Doubled<S>(pub S);

impl<S: ListSource> ListSource for Doubled<S> {
    fn trigger_more_content(&mut self) {
        self.0.trigger_more_content();
    }

    fn read_visible_items(&mut self) -> Vec<VisibleItem> {
        self.0
            .read_visible_items()
            .into_iter()
            .flat_map(|entry| {
                let avatar = match &entry {
                    Ok(item) => Ok(ListItem::new(format!("{}/photo", item.key()))),
                    Err(miss) => Err(miss.clone()),
                };
                [entry, avatar]
            })
            .collect()
    }

    fn advance_page(&mut self) -> bool {
        self.0.advance_page()
    }

    fn population_hint(&mut self) -> Option<usize> {
        self.0.population_hint()
    }
}

/// Replays a fixed sequence of visible-list reads, repeating the last one.
/// An entry of `"!"` is reported as a read miss.
pub struct ScriptedPolls {
    polls: Vec<Vec<VisibleItem>>,
    next: usize,
    pub reads: usize,
}

impl ScriptedPolls {
    pub fn new(polls: &[&[&str]]) -> Self {
        Self {
            polls: polls
                .iter()
                .map(|poll| {
                    poll.iter()
                        .map(|key| match *key {
                            "!" => Err(ReadMiss::new("entry not rendered")),
                            key => Ok(ListItem::new(key)),
                        })
                        .collect()
                })
                .collect(),
            next: 0,
            reads: 0,
        }
    }

    pub fn with_items(polls: Vec<Vec<VisibleItem>>) -> Self {
        Self {
            polls,
            next: 0,
            reads: 0,
        }
    }
}

impl ListSource for ScriptedPolls {
    fn trigger_more_content(&mut self) {}

    fn read_visible_items(&mut self) -> Vec<VisibleItem> {
        self.reads += 1;
        let index = self.next.min(self.polls.len().saturating_sub(1));
        self.next += 1;
        self.polls.get(index).cloned().unwrap_or_default()
    }
}

#[derive(Clone, Default)]
pub struct RecordingPacer {
    pub pauses: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingPacer {
    pub fn take(&self) -> Vec<Duration> {
        self.pauses.lock().unwrap().drain(..).collect()
    }
}

impl Pacer for RecordingPacer {
    fn pause(&self, duration: Duration) {
        self.pauses.lock().unwrap().push(duration);
    }
}
