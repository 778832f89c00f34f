//! User actions exposed by the overlay window and its context menu

use serde::{Deserialize, Serialize};

/// One thing the user can ask the overlay to do
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Start or stop the timer
    Toggle,
    /// Count down from `seconds`, or count up when `None`
    SelectPreset {
        #[serde(default)]
        seconds: Option<f64>,
    },
    /// Wait for the next key or mouse button and bind it
    StartRebind,
    CancelRebind,
    ResetLaps,
    SetOpacity { value: f64 },
    SetWindowSize { size: String },
    CycleTextColor,
    Exit,
}

impl Action {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Action::Toggle => "toggle",
            Action::SelectPreset { .. } => "select-preset",
            Action::StartRebind => "rebind",
            Action::CancelRebind => "rebind-cancel",
            Action::ResetLaps => "reset-laps",
            Action::SetOpacity { .. } => "set-opacity",
            Action::SetWindowSize { .. } => "set-window-size",
            Action::CycleTextColor => "cycle-text-color",
            Action::Exit => "exit",
        }
    }
}
