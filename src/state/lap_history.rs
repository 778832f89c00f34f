//! Most-recent-first history of finished runs

use std::collections::VecDeque;

/// Number of runs kept
pub const LAP_CAPACITY: usize = 5;

/// Text shown for an empty slot
pub const LAP_PLACEHOLDER: &str = "--:--.---";

/// Bounded lap buffer, newest first
#[derive(Debug, Clone, Default)]
pub struct LapHistory {
    laps: VecDeque<String>,
}

impl LapHistory {
    pub fn new() -> Self {
        Self {
            laps: VecDeque::with_capacity(LAP_CAPACITY + 1),
        }
    }

    /// Insert a formatted run at the front, evicting the oldest beyond capacity
    pub fn record(&mut self, lap: String) {
        self.laps.push_front(lap);
        self.laps.truncate(LAP_CAPACITY);
    }

    pub fn clear(&mut self) {
        self.laps.clear();
    }

    pub fn len(&self) -> usize {
        self.laps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.laps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.laps.iter().map(String::as_str)
    }

    /// One line per slot: `"{n}. {lap}"` or the placeholder
    pub fn render(&self) -> Vec<String> {
        (0..LAP_CAPACITY)
            .map(|i| match self.laps.get(i) {
                Some(lap) => format!("{}. {}", i + 1, lap),
                None => LAP_PLACEHOLDER.to_string(),
            })
            .collect()
    }
}
