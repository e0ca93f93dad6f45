use std::fmt;
use std::thread;
use std::time::Duration;

use crate::ListItem;

/// A list entry that was visible but could not be read on this poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadMiss {
    pub reason: String,
}

impl ReadMiss {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ReadMiss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "read miss: {}", self.reason)
    }
}

/// One entry of a visible-list read, in render order.
pub type VisibleItem = Result<ListItem, ReadMiss>;

/// The live list the collector drives.
///
/// Calls are strictly sequential: the rendered list mutates in response to
/// `trigger_more_content` and `advance_page`, so implementations may assume
/// no call overlaps another.
pub trait ListSource {
    /// Attempts to reveal more items (e.g. scroll). May do nothing.
    fn trigger_more_content(&mut self);

    /// Every currently visible entry, in render order. Reported fresh each call.
    fn read_visible_items(&mut self) -> Vec<VisibleItem>;

    /// Moves to the next page of classic pagination, if any.
    ///
    /// The default reports no pagination.
    fn advance_page(&mut self) -> bool {
        false
    }

    /// Total size of the list as advertised by the page (a header count such
    /// as "People (42)"), if one can be read. Caps the collection target.
    fn population_hint(&mut self) -> Option<usize> {
        None
    }
}

impl<S: ListSource + ?Sized> ListSource for &mut S {
    fn trigger_more_content(&mut self) {
        (**self).trigger_more_content();
    }

    fn read_visible_items(&mut self) -> Vec<VisibleItem> {
        (**self).read_visible_items()
    }

    fn advance_page(&mut self) -> bool {
        (**self).advance_page()
    }

    fn population_hint(&mut self) -> Option<usize> {
        (**self).population_hint()
    }
}

pub trait Pacer: Send + Sync {
    fn pause(&self, duration: Duration);
}

/// Blocks the calling thread; zero durations return immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct SleepPacer;

impl Pacer for SleepPacer {
    fn pause(&self, duration: Duration) {
        if !duration.is_zero() {
            thread::sleep(duration);
        }
    }
}
