use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Stall, escalation and pacing policy for one collector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorSettings {
    /// Consecutive polls with an unchanged frontier before trying the next page.
    pub max_stall_retries: u32,
    /// Consecutive failed page advances after which the run gives up.
    pub max_escalations: u32,
    /// Hard cap on polls for sources whose frontier never settles.
    pub poll_limit: Option<u32>,
    /// Pause after each trigger, before reading the list.
    pub poll_delay_ms: u64,
    /// Pause after each poll whose frontier did not move.
    pub stall_delay_ms: u64,
    /// Pause after a successful page advance.
    pub page_advance_delay_ms: u64,
}

impl Default for CollectorSettings {
    fn default() -> Self {
        Self {
            max_stall_retries: 2,
            max_escalations: 2,
            poll_limit: None,
            poll_delay_ms: 1_000,
            stall_delay_ms: 3_000,
            page_advance_delay_ms: 2_000,
        }
    }
}

impl CollectorSettings {
    /// Default policy with every pause set to zero.
    pub fn without_delays() -> Self {
        Self {
            poll_delay_ms: 0,
            stall_delay_ms: 0,
            page_advance_delay_ms: 0,
            ..Self::default()
        }
    }

    pub fn poll_delay(&self) -> Duration {
        Duration::from_millis(self.poll_delay_ms)
    }

    pub fn stall_delay(&self) -> Duration {
        Duration::from_millis(self.stall_delay_ms)
    }

    pub fn page_advance_delay(&self) -> Duration {
        Duration::from_millis(self.page_advance_delay_ms)
    }
}
