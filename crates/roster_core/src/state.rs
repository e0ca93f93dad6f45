use std::collections::HashSet;

use roster_logging::roster_trace;

use crate::{ListItem, VisibleItem};

/// Outcome of comparing a poll's frontier marker with the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontierUpdate {
    Advanced,
    /// Same frontier as last poll; carries the consecutive stall count.
    Stalled(u32),
}

/// Mutable state of a single collection run.
#[derive(Debug, Clone, Default)]
pub struct CollectionState {
    items: Vec<ListItem>,
    seen: HashSet<String>,
    stall_count: u32,
    escalations: u32,
    frontier: Option<String>,
    polls: u32,
}

impl CollectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one visible-list read into the state.
    ///
    /// Unseen keys accepted by `accept` are appended in render order; keys
    /// seen before keep their first-seen record. Read misses are skipped.
    /// Returns the frontier marker of this read: the key of the last entry,
    /// or `None` when the read is empty or ends in a miss.
    pub fn absorb<F>(&mut self, visible: Vec<VisibleItem>, accept: F) -> Option<String>
    where
        F: Fn(&ListItem) -> bool,
    {
        self.polls += 1;
        let mut marker = None;
        for entry in visible {
            match entry {
                Ok(item) => {
                    marker = Some(item.key().to_string());
                    if self.seen.contains(item.key()) {
                        continue;
                    }
                    self.seen.insert(item.key().to_string());
                    if accept(&item) {
                        self.items.push(item);
                    }
                }
                Err(miss) => {
                    roster_trace!("poll {}: skipping unreadable entry ({})", self.polls, miss);
                    marker = None;
                }
            }
        }
        marker
    }

    /// A moved frontier clears both the stall count and the run of failed
    /// escalations, so only consecutive failures end a run.
    pub fn observe_frontier(&mut self, marker: Option<String>) -> FrontierUpdate {
        if marker == self.frontier {
            self.stall_count += 1;
            FrontierUpdate::Stalled(self.stall_count)
        } else {
            self.stall_count = 0;
            self.escalations = 0;
            self.frontier = marker;
            FrontierUpdate::Advanced
        }
    }

    /// A page advance succeeded: the new page starts with a clean slate.
    pub fn record_page_advance(&mut self) {
        self.stall_count = 0;
        self.escalations = 0;
    }

    /// Returns the number of consecutive failed escalations so far.
    pub fn record_failed_escalation(&mut self) -> u32 {
        self.escalations += 1;
        self.escalations
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<ListItem> {
        self.items
    }

    pub fn stall_count(&self) -> u32 {
        self.stall_count
    }

    pub fn escalations(&self) -> u32 {
        self.escalations
    }

    pub fn frontier(&self) -> Option<&str> {
        self.frontier.as_deref()
    }

    pub fn polls(&self) -> u32 {
        self.polls
    }
}

/// Identity keys whose details were already fetched during this run.
#[derive(Debug, Clone, Default)]
pub struct DetailLedger {
    done: HashSet<String>,
}

impl DetailLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `key` as detail-scraped. `false` if it already was.
    pub fn mark(&mut self, key: &str) -> bool {
        self.done.insert(key.to_string())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.done.contains(key)
    }

    pub fn len(&self) -> usize {
        self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.done.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{CollectionState, DetailLedger, FrontierUpdate};
    use crate::{ListItem, ReadMiss};

    #[test]
    fn first_sighting_wins() {
        let mut state = CollectionState::new();
        state.absorb(
            vec![Ok(ListItem::new("a").with_field("message", "loading"))],
            |_| true,
        );
        state.absorb(
            vec![Ok(ListItem::new("a").with_field("message", "hello"))],
            |_| true,
        );
        assert_eq!(state.len(), 1);
        assert_eq!(state.items()[0].field("message"), Some("loading"));
    }

    #[test]
    fn trailing_miss_clears_the_marker() {
        let mut state = CollectionState::new();
        let marker = state.absorb(
            vec![Ok(ListItem::new("a")), Err(ReadMiss::new("no href"))],
            |_| true,
        );
        assert_eq!(marker, None);
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn unchanged_frontier_counts_stalls() {
        let mut state = CollectionState::new();
        assert_eq!(state.observe_frontier(Some("a".into())), FrontierUpdate::Advanced);
        assert_eq!(state.observe_frontier(Some("a".into())), FrontierUpdate::Stalled(1));
        assert_eq!(state.observe_frontier(Some("a".into())), FrontierUpdate::Stalled(2));
        assert_eq!(state.observe_frontier(Some("b".into())), FrontierUpdate::Advanced);
        assert_eq!(state.stall_count(), 0);
        assert_eq!(state.frontier(), Some("b"));
    }

    #[test]
    fn moved_frontier_clears_failed_escalations() {
        let mut state = CollectionState::new();
        state.observe_frontier(Some("a".into()));
        state.observe_frontier(Some("a".into()));
        assert_eq!(state.record_failed_escalation(), 1);
        state.observe_frontier(Some("a".into()));
        assert_eq!(state.escalations(), 1);

        state.observe_frontier(Some("c".into()));
        assert_eq!(state.escalations(), 0);
        assert_eq!(state.record_failed_escalation(), 1);
    }

    #[test]
    fn rejected_items_are_not_kept() {
        let mut state = CollectionState::new();
        state.absorb(
            vec![Ok(ListItem::new("keep")), Ok(ListItem::new("drop"))],
            |item| item.key() == "keep",
        );
        assert_eq!(state.len(), 1);
        assert_eq!(state.items()[0].key(), "keep");
    }

    #[test]
    fn ledger_marks_once() {
        let mut ledger = DetailLedger::new();
        assert!(ledger.mark("a"));
        assert!(!ledger.mark("a"));
        assert!(ledger.contains("a"));
        assert_eq!(ledger.len(), 1);
    }
}
