use crate::{ListSource, VisibleItem};

/// Adapter for lists that render every entry as two adjacent nodes (the
/// followers page links both the avatar and the name).
///
/// Keeps the first node of each pair and drops the second, so the collector
/// sees one entry per profile. The pairing is positional: a read with an odd
/// number of nodes keeps its trailing half-pair.
#[derive(Debug)]
pub struct PairedNodes<S> {
    inner: S,
}

impl<S: ListSource> PairedNodes<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: ListSource> ListSource for PairedNodes<S> {
    fn trigger_more_content(&mut self) {
        self.inner.trigger_more_content();
    }

    fn read_visible_items(&mut self) -> Vec<VisibleItem> {
        self.inner.read_visible_items().into_iter().step_by(2).collect()
    }

    fn advance_page(&mut self) -> bool {
        self.inner.advance_page()
    }

    fn population_hint(&mut self) -> Option<usize> {
        self.inner.population_hint()
    }
}
