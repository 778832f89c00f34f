//! Render-ready snapshot of the overlay

use serde::Serialize;

use crate::store::{BindConfig, UiConfig};

/// Everything the window layer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayView {
    pub time_text: String,
    pub time_color: String,
    pub running: bool,
    /// Active countdown target in seconds
    pub preset_seconds: Option<f64>,
    pub header: String,
    /// One line per lap slot, newest first
    pub laps: Vec<String>,
    pub status_text: String,
    pub status_color: String,
    pub capturing: bool,
    pub bind: BindConfig,
    pub ui: UiConfig,
}
