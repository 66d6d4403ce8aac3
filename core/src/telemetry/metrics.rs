use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Cumulative series-lifecycle counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCounts {
    pub cycles: usize,
    pub created: usize,
    pub updated: usize,
    pub removed: usize,
}

pub struct UpdateMetrics {
    inner: Mutex<UpdateCounts>,
}

impl UpdateMetrics {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(UpdateCounts::default()),
        }
    }

    pub fn record_cycle(&self, created: usize, updated: usize, removed: usize) {
        if let Ok(mut counts) = self.inner.lock() {
            counts.cycles += 1;
            counts.created += created;
            counts.updated += updated;
            counts.removed += removed;
        }
    }

    pub fn snapshot(&self) -> UpdateCounts {
        if let Ok(counts) = self.inner.lock() {
            *counts
        } else {
            UpdateCounts::default()
        }
    }
}

impl Default for UpdateMetrics {
    fn default() -> Self {
        Self::new()
    }
}
