//! Wall-clock sources for the stopwatch

use std::sync::{Arc, Mutex};

use chrono::Utc;

/// Source of the current time in seconds since the Unix epoch
pub trait Clock: Send + 'static {
    fn now(&self) -> f64;
}

/// Clock backed by the system wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        Utc::now().timestamp_micros() as f64 / 1_000_000.0
    }
}

/// Hand-driven clock, cloned handles share the same time
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<Mutex<f64>>,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    /// Move the clock forward by `seconds`
    pub fn advance(&self, seconds: f64) {
        if let Ok(mut now) = self.now.lock() {
            *now += seconds;
        }
    }

    pub fn set(&self, seconds: f64) {
        if let Ok(mut now) = self.now.lock() {
            *now = seconds;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.lock().map(|now| *now).unwrap_or_default()
    }
}
