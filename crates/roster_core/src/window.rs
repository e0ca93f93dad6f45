use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowError {
    #[error("window start must be at least 1 (positions are 1-indexed)")]
    ZeroStart,
    #[error("window end {end} is before start {start}")]
    EndBeforeStart { start: u32, end: u32 },
}

/// Inclusive, 1-indexed range of list positions in discovery order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "(u32, u32)", into = "(u32, u32)")]
pub struct TargetWindow {
    start: u32,
    end: u32,
}

impl TargetWindow {
    pub fn new(start: u32, end: u32) -> Result<Self, WindowError> {
        if start == 0 {
            return Err(WindowError::ZeroStart);
        }
        if end < start {
            return Err(WindowError::EndBeforeStart { start, end });
        }
        Ok(Self { start, end })
    }

    /// Window covering the first `count` positions. `None` when `count` is 0.
    pub fn first(count: u32) -> Option<Self> {
        Self::new(1, count).ok()
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    /// Number of items that must be discovered before the window can be cut.
    pub fn target_count(&self) -> usize {
        self.end as usize
    }

    pub fn len(&self) -> usize {
        (self.end - self.start) as usize + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Cuts `items[start-1 ..= end-1]`, clamped to what exists.
    /// A start past the end of `items` yields an empty slice.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let from = (self.start as usize - 1).min(items.len());
        let to = self.target_count().min(items.len());
        &items[from..to]
    }
}

impl TryFrom<(u32, u32)> for TargetWindow {
    type Error = WindowError;

    fn try_from((start, end): (u32, u32)) -> Result<Self, Self::Error> {
        Self::new(start, end)
    }
}

impl From<TargetWindow> for (u32, u32) {
    fn from(window: TargetWindow) -> Self {
        (window.start, window.end)
    }
}
