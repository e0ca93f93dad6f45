use roster_logging::{roster_debug, roster_info};

use crate::{
    CollectionState, CollectorSettings, FrontierUpdate, ListItem, ListSource, Pacer, SleepPacer,
    TargetWindow,
};

/// Why a collection run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Nothing was requested, or the list advertised itself as empty. The
    /// list was never scrolled or read.
    Empty,
    TargetReached,
    /// Stalls and page advances ran out before the target was met.
    Exhausted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionRun {
    pub items: Vec<ListItem>,
    pub polls: u32,
    pub termination: Termination,
}

impl CollectionRun {
    fn empty() -> Self {
        Self {
            items: Vec::new(),
            polls: 0,
            termination: Termination::Empty,
        }
    }
}

/// Drives a [`ListSource`] until enough distinct items are found or the
/// list stops yielding new ones.
pub struct Collector {
    settings: CollectorSettings,
    pacer: Box<dyn Pacer>,
}

impl Collector {
    pub fn new(settings: CollectorSettings) -> Self {
        Self::with_pacer(settings, SleepPacer)
    }

    pub fn with_pacer(settings: CollectorSettings, pacer: impl Pacer + 'static) -> Self {
        Self {
            settings,
            pacer: Box::new(pacer),
        }
    }

    pub fn settings(&self) -> &CollectorSettings {
        &self.settings
    }

    /// Up to `target_count` distinct items in first-seen order.
    pub fn collect<S>(&self, source: &mut S, target_count: usize) -> Vec<ListItem>
    where
        S: ListSource + ?Sized,
    {
        self.run(source, target_count, |_| true).items
    }

    /// The items at `window` positions, collecting only as far as its end.
    pub fn collect_window<S>(&self, source: &mut S, window: TargetWindow) -> Vec<ListItem>
    where
        S: ListSource + ?Sized,
    {
        let run = self.run(source, window.target_count(), |_| true);
        window.slice(&run.items).to_vec()
    }

    /// Like [`Collector::collect`], but only items passing `accept` are kept
    /// and counted. Rejected items still move the frontier.
    pub fn collect_where<S, F>(&self, source: &mut S, target_count: usize, accept: F) -> Vec<ListItem>
    where
        S: ListSource + ?Sized,
        F: Fn(&ListItem) -> bool,
    {
        self.run(source, target_count, accept).items
    }

    pub fn run<S, F>(&self, source: &mut S, target_count: usize, accept: F) -> CollectionRun
    where
        S: ListSource + ?Sized,
        F: Fn(&ListItem) -> bool,
    {
        if target_count == 0 {
            roster_debug!("nothing requested, skipping collection");
            return CollectionRun::empty();
        }
        let target_count = match source.population_hint() {
            Some(total) if total < target_count => {
                roster_info!("list holds {} items, lowering target from {}", total, target_count);
                total
            }
            _ => target_count,
        };
        if target_count == 0 {
            return CollectionRun::empty();
        }

        let settings = &self.settings;
        let mut state = CollectionState::new();

        let termination = loop {
            if state.len() >= target_count {
                break Termination::TargetReached;
            }
            if settings.poll_limit.is_some_and(|limit| state.polls() >= limit) {
                roster_info!("poll limit of {} reached", state.polls());
                break Termination::Exhausted;
            }

            source.trigger_more_content();
            self.pacer.pause(settings.poll_delay());

            let before = state.len();
            let marker = state.absorb(source.read_visible_items(), &accept);
            roster_debug!(
                "poll {}: {} new, {}/{} collected",
                state.polls(),
                state.len() - before,
                state.len(),
                target_count
            );
            if state.len() >= target_count {
                break Termination::TargetReached;
            }

            if let FrontierUpdate::Stalled(stalls) = state.observe_frontier(marker) {
                roster_debug!(
                    "no new items loaded, retry {}/{}",
                    stalls,
                    settings.max_stall_retries
                );
                self.pacer.pause(settings.stall_delay());
                if stalls < settings.max_stall_retries {
                    continue;
                }

                roster_info!("list stalled, attempting to advance to the next page");
                if source.advance_page() {
                    state.record_page_advance();
                    self.pacer.pause(settings.page_advance_delay());
                    continue;
                }
                let failed = state.record_failed_escalation();
                roster_info!(
                    "no next page available ({}/{})",
                    failed,
                    settings.max_escalations
                );
                if failed >= settings.max_escalations {
                    break Termination::Exhausted;
                }
            }
        };

        let polls = state.polls();
        let mut items = state.into_items();
        items.truncate(target_count);
        roster_info!(
            "collection finished after {} polls: {} of {} items ({:?})",
            polls,
            items.len(),
            target_count,
            termination
        );

        CollectionRun {
            items,
            polls,
            termination,
        }
    }
}
