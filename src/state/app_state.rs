//! Main application state management
//!
//! [`AppState`] is owned by the UI loop and is the only place timer, lap and
//! settings state is mutated. Input events, user actions and display ticks
//! all arrive here as plain method calls with the current time.

use std::time::Duration;

use tracing::{debug, info, warn};

use super::{Action, LapHistory, OverlayView, TimerState, Transition};
use crate::{
    input::{BindingManager, Dispatch, HookGate, InputEvent},
    menu::{build_menu, MenuItem},
    presets::PresetTree,
    services::{Cue, CueSender},
    store::{parse_size, validate_opacity, BindConfig, ConfigStore, Settings},
    utils::{format_time, ZERO_TIME},
};

/// Time text colour after a run stops
pub const STOP_COLOR: &str = "#ff5555";
/// Colour of the bind hint line
pub const STATUS_COLOR: &str = "#888888";
/// Colour of the capture prompt
pub const CAPTURE_COLOR: &str = "#ffff00";
pub const CAPTURE_PROMPT: &str = "Press NEW Key or Mouse Button...";
pub const LAPS_HEADER: &str = "Last 5 Runs:";

/// Text colours cycled through by the menu
pub const TEXT_COLORS: [&str; 6] = ["#00ff00", "#00ffff", "#ffff00", "#ff00ff", "#ffffff", "#ff8800"];

/// Whether the loop keeps running after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Text,
    Stopped,
}

/// Colour after `current` in the palette, wrapping; unknown colours restart it
pub fn next_text_color(current: &str) -> &'static str {
    TEXT_COLORS
        .iter()
        .position(|c| c.eq_ignore_ascii_case(current))
        .map(|i| TEXT_COLORS[(i + 1) % TEXT_COLORS.len()])
        .unwrap_or(TEXT_COLORS[0])
}

/// Application state owned by the UI loop
#[derive(Debug)]
pub struct AppState {
    timer: TimerState,
    laps: LapHistory,
    time_text: String,
    tone: Tone,
    settings: Settings,
    store: ConfigStore,
    presets: PresetTree,
    bindings: BindingManager,
    cues: CueSender,
    capture_timeout: Option<f64>,
    capture_deadline: Option<f64>,
}

impl AppState {
    /// Load settings from `store` and activate the stored binding
    pub fn new(store: ConfigStore, presets: PresetTree, gate: HookGate, cues: CueSender) -> Self {
        let settings = store.load();
        let mut bindings = BindingManager::new(gate);
        // A bad stored binding is reported and leaves the timer unbound
        let _ = bindings.activate(&settings.bind);

        Self {
            timer: TimerState::new(),
            laps: LapHistory::new(),
            time_text: ZERO_TIME.to_string(),
            tone: Tone::Text,
            settings,
            store,
            presets,
            bindings,
            cues,
            capture_timeout: None,
            capture_deadline: None,
        }
    }

    /// Give up on a rebind after `timeout` without input
    pub fn with_capture_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.capture_timeout = timeout.map(|t| t.as_secs_f64());
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn laps(&self) -> &LapHistory {
        &self.laps
    }

    pub fn timer(&self) -> &TimerState {
        &self.timer
    }

    pub fn time_text(&self) -> &str {
        &self.time_text
    }

    pub fn bindings(&self) -> &BindingManager {
        &self.bindings
    }

    /// Apply a user action
    pub fn apply(&mut self, action: Action, now: f64) -> Result<Outcome, String> {
        debug!("Applying action: {}", action.name());
        match action {
            Action::Toggle => self.toggle(now),
            Action::SelectPreset { seconds } => self.select_preset(seconds)?,
            Action::StartRebind => self.start_rebind(now),
            Action::CancelRebind => self.cancel_rebind(),
            Action::ResetLaps => self.reset_laps(),
            Action::SetOpacity { value } => self.set_opacity(value)?,
            Action::SetWindowSize { size } => self.set_window_size(&size)?,
            Action::CycleTextColor => self.cycle_text_color(),
            Action::Exit => {
                self.shutdown();
                return Ok(Outcome::Exit);
            }
        }
        Ok(Outcome::Continue)
    }

    /// Start the timer, or stop it and record the run
    pub fn toggle(&mut self, now: f64) {
        match self.timer.toggle(now) {
            Transition::Started => {
                info!("Timer started");
                self.cue(Cue::Start);
                self.tone = Tone::Text;
            }
            Transition::Stopped { elapsed } => {
                let lap = format_time(elapsed, false);
                info!("Timer stopped at {}", lap);
                self.cue(Cue::Stop);
                self.tone = Tone::Stopped;
                self.time_text = format_time(self.timer.displayed_value(elapsed), false);
                self.laps.record(lap);
            }
        }
    }

    /// Count down from `seconds`, or count up when `None`.
    /// The display only changes while stopped.
    pub fn select_preset(&mut self, seconds: Option<f64>) -> Result<(), String> {
        if let Some(s) = seconds {
            if !s.is_finite() || s < 0.0 {
                return Err(format!("Preset duration must be a non-negative number, got {}", s));
            }
        }

        self.timer.set_preset(seconds);
        match seconds {
            Some(s) => info!("Countdown preset set to {}", format_time(s, true)),
            None => info!("Countdown preset cleared"),
        }

        if !self.timer.is_running() {
            self.time_text = match seconds {
                Some(s) => format_time(s, true),
                None => ZERO_TIME.to_string(),
            };
        }
        Ok(())
    }

    /// Drop the current binding and wait for the next input
    pub fn start_rebind(&mut self, now: f64) {
        self.bindings.begin_capture();
        self.capture_deadline = self.capture_timeout.map(|timeout| now + timeout);
    }

    /// Abandon a rebind and restore the previous binding
    pub fn cancel_rebind(&mut self) {
        if !self.bindings.is_capturing() {
            return;
        }
        self.bindings.cancel_capture();
        self.capture_deadline = None;
        let _ = self.bindings.activate(&self.settings.bind);
    }

    pub fn reset_laps(&mut self) {
        info!("Lap history cleared");
        self.laps.clear();
    }

    pub fn set_opacity(&mut self, value: f64) -> Result<(), String> {
        let opacity = validate_opacity(value)?;
        info!("Opacity set to {:.2}", opacity);
        self.settings.ui.opacity = opacity;
        self.persist();
        Ok(())
    }

    pub fn set_window_size(&mut self, size: &str) -> Result<(), String> {
        let (w, h) = parse_size(size)?;
        let size = format!("{}x{}", w, h);
        info!("Window size set to {}", size);
        self.settings.ui.size = size;
        self.persist();
        Ok(())
    }

    pub fn cycle_text_color(&mut self) {
        let next = next_text_color(&self.settings.ui.text_color);
        info!("Text color set to {}", next);
        self.settings.ui.text_color = next.to_string();
        self.persist();
    }

    /// React to a down event from the global hook
    pub fn handle_input(&mut self, event: &InputEvent, now: f64) {
        match self.bindings.handle(event) {
            Some(Dispatch::Toggle) => self.toggle(now),
            Some(Dispatch::Captured(binding)) => self.finish_rebind(binding),
            None => {}
        }
    }

    fn finish_rebind(&mut self, binding: BindConfig) {
        info!("New binding: {}", binding.describe());
        self.capture_deadline = None;
        self.settings.bind = binding;
        self.persist();
        let _ = self.bindings.activate(&self.settings.bind);
    }

    /// Periodic display refresh
    pub fn tick(&mut self, now: f64) {
        if let Some(value) = self.timer.current_value(now) {
            self.time_text = format_time(value, false);
        }

        if let Some(deadline) = self.capture_deadline {
            if now >= deadline && self.bindings.is_capturing() {
                warn!("No input received for the new binding, keeping {}", self.settings.bind.describe());
                self.cancel_rebind();
            }
        }
    }

    /// Release the global hook before exit
    pub fn shutdown(&mut self) {
        info!("Releasing bindings for shutdown");
        self.bindings.deactivate();
        self.capture_deadline = None;
    }

    fn persist(&self) {
        self.store.save(&self.settings);
    }

    fn cue(&self, cue: Cue) {
        if self.cues.send(cue).is_err() {
            debug!("Cue player gone, dropping {:?}", cue);
        }
    }

    /// Current frame for the window layer
    pub fn view(&self) -> OverlayView {
        let capturing = self.bindings.is_capturing();
        let (status_text, status_color) = if capturing {
            (CAPTURE_PROMPT.to_string(), CAPTURE_COLOR)
        } else {
            (self.settings.bind.describe(), STATUS_COLOR)
        };
        let time_color = match self.tone {
            Tone::Text => self.settings.ui.text_color.clone(),
            Tone::Stopped => STOP_COLOR.to_string(),
        };

        OverlayView {
            time_text: self.time_text.clone(),
            time_color,
            running: self.timer.is_running(),
            preset_seconds: self.timer.preset_duration(),
            header: LAPS_HEADER.to_string(),
            laps: self.laps.render(),
            status_text,
            status_color: status_color.to_string(),
            capturing,
            bind: self.settings.bind.clone(),
            ui: self.settings.ui.clone(),
        }
    }

    /// Context menu for the current settings
    pub fn menu(&self) -> Vec<MenuItem> {
        build_menu(&self.presets, &self.settings, self.timer.preset_duration())
    }
}
