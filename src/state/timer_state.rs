//! Stopwatch state machine

/// Result of a toggle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    /// The timer started counting
    Started,
    /// The timer stopped after running for `elapsed` seconds
    Stopped { elapsed: f64 },
}

/// Running/stopped state with an optional countdown target
#[derive(Debug, Clone, Default)]
pub struct TimerState {
    running: bool,
    /// Seconds since epoch, meaningful only while `running`
    start_timestamp: f64,
    preset_duration: Option<f64>,
}

impl TimerState {
    /// Create a stopped timer with no preset
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the timer is running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Active countdown target in seconds, if any
    pub fn preset_duration(&self) -> Option<f64> {
        self.preset_duration
    }

    /// Set or clear the countdown target
    pub fn set_preset(&mut self, preset: Option<f64>) {
        self.preset_duration = preset;
    }

    /// Start if stopped, stop if running
    pub fn toggle(&mut self, now: f64) -> Transition {
        if self.running {
            self.running = false;
            Transition::Stopped {
                elapsed: now - self.start_timestamp,
            }
        } else {
            self.start_timestamp = now;
            self.running = true;
            Transition::Started
        }
    }

    /// Seconds elapsed since the start, `None` while stopped
    pub fn elapsed(&self, now: f64) -> Option<f64> {
        self.running.then(|| now - self.start_timestamp)
    }

    /// Value to display while running: remaining time in countdown mode,
    /// elapsed time otherwise. `None` while stopped.
    pub fn current_value(&self, now: f64) -> Option<f64> {
        self.elapsed(now).map(|elapsed| self.displayed_value(elapsed))
    }

    /// Map an elapsed duration onto the displayed value
    pub fn displayed_value(&self, elapsed: f64) -> f64 {
        match self.preset_duration {
            Some(preset) => preset - elapsed,
            None => elapsed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_stopped_without_preset() {
        let timer = TimerState::new();
        assert!(!timer.is_running());
        assert_eq!(timer.preset_duration(), None);
        assert_eq!(timer.current_value(10.0), None);
    }

    #[test]
    fn toggle_reports_elapsed_on_stop() {
        let mut timer = TimerState::new();
        assert_eq!(timer.toggle(1000.0), Transition::Started);
        assert!(timer.is_running());
        assert_eq!(timer.current_value(1002.5), Some(2.5));
        assert_eq!(timer.toggle(1004.0), Transition::Stopped { elapsed: 4.0 });
        assert!(!timer.is_running());
        assert_eq!(timer.elapsed(1010.0), None);
    }

    #[test]
    fn countdown_goes_negative_past_preset() {
        let mut timer = TimerState::new();
        timer.set_preset(Some(105.0));
        timer.toggle(0.0);
        assert_eq!(timer.current_value(100.0), Some(5.0));
        assert_eq!(timer.current_value(110.0), Some(-5.0));
    }

    #[test]
    fn restart_uses_new_start_timestamp() {
        let mut timer = TimerState::new();
        timer.toggle(0.0);
        timer.toggle(3.0);
        timer.toggle(50.0);
        assert_eq!(timer.current_value(51.0), Some(1.0));
    }
}
