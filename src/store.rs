//! Persisted binding and appearance settings
//!
//! The settings live in a single JSON object with a `bind` and a `ui` key.
//! Loading never fails: a missing, unreadable or corrupt file yields the
//! built-in defaults, and a bad section or field only resets itself.
//! Saving is best effort and only logs on failure.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Default settings file, relative to the working directory
pub const DEFAULT_CONFIG_FILE: &str = "timer_config.json";

/// Input device a binding listens on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindKind {
    Keyboard,
    Mouse,
}

impl fmt::Display for BindKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindKind::Keyboard => f.write_str("keyboard"),
            BindKind::Mouse => f.write_str("mouse"),
        }
    }
}

/// The single input mapped to the toggle action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindConfig {
    #[serde(rename = "type")]
    pub kind: BindKind,
    pub value: String,
}

impl BindConfig {
    pub fn keyboard(value: impl Into<String>) -> Self {
        Self {
            kind: BindKind::Keyboard,
            value: value.into(),
        }
    }

    pub fn mouse(value: impl Into<String>) -> Self {
        Self {
            kind: BindKind::Mouse,
            value: value.into(),
        }
    }

    /// Status line text, e.g. `Bind: F5 (keyboard)`
    pub fn describe(&self) -> String {
        format!("Bind: {} ({})", self.value.to_uppercase(), self.kind)
    }
}

impl Default for BindConfig {
    fn default() -> Self {
        Self::keyboard("f5")
    }
}

/// Window appearance preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Window opacity in [0, 1]
    pub opacity: f64,
    /// Window size as `WxH`
    pub size: String,
    /// Time text colour as `#RRGGBB`
    pub text_color: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            opacity: 0.8,
            size: "250x200".to_string(),
            text_color: "#00ff00".to_string(),
        }
    }
}

impl UiConfig {
    /// Read each field from a stored `ui` object on its own. Missing fields
    /// take their default; mistyped or invalid fields are logged and take
    /// their default too.
    pub fn from_stored(value: &Value) -> Self {
        let defaults = Self::default();
        let Some(fields) = value.as_object() else {
            warn!("Ignoring stored ui settings, expected an object");
            return defaults;
        };

        let opacity = match fields.get("opacity") {
            None => defaults.opacity,
            Some(v) => match v
                .as_f64()
                .ok_or_else(|| format!("opacity must be a number, got {}", v))
                .and_then(validate_opacity)
            {
                Ok(opacity) => opacity,
                Err(e) => {
                    warn!("Ignoring stored opacity: {}", e);
                    defaults.opacity
                }
            },
        };

        let size = match fields.get("size") {
            None => defaults.size,
            Some(v) => match v
                .as_str()
                .ok_or_else(|| format!("window size must be a string, got {}", v))
                .and_then(|size| parse_size(size).map(|_| size.trim().to_string()))
            {
                Ok(size) => size,
                Err(e) => {
                    warn!("Ignoring stored window size: {}", e);
                    defaults.size
                }
            },
        };

        let text_color = match fields.get("text_color") {
            None => defaults.text_color,
            Some(v) => match v.as_str().filter(|c| is_hex_color(c)) {
                Some(color) => color.to_string(),
                None => {
                    warn!("Ignoring stored text color {}", v);
                    defaults.text_color
                }
            },
        };

        Self {
            opacity,
            size,
            text_color,
        }
    }
}

/// Everything written to the settings file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub bind: BindConfig,
    pub ui: UiConfig,
}

impl Settings {
    /// Rebuild settings from a parsed file. `bind` and `ui` are read
    /// independently so a bad section only resets itself. A bare
    /// `{"type", "value"}` object, as older versions wrote, is taken as the
    /// binding.
    pub fn from_stored(value: &Value) -> Self {
        let Some(root) = value.as_object() else {
            warn!("Settings file is not a JSON object, using defaults");
            return Self::default();
        };

        let bind = match root.get("bind") {
            Some(bind) => Some(bind),
            None if root.contains_key("type") && root.contains_key("value") => {
                info!("Reading binding from legacy settings layout");
                Some(value)
            }
            None => None,
        };
        let bind = match bind {
            None => BindConfig::default(),
            Some(bind) => match BindConfig::deserialize(bind) {
                Ok(bind) => bind,
                Err(e) => {
                    warn!("Ignoring stored binding: {}", e);
                    BindConfig::default()
                }
            },
        };

        let ui = match root.get("ui") {
            Some(ui) => UiConfig::from_stored(ui),
            None => UiConfig::default(),
        };

        if !root.contains_key("bind") && !root.contains_key("ui") && !root.contains_key("type") {
            warn!("Settings file has neither a bind nor a ui section, using defaults");
        }

        Self { bind, ui }
    }
}

/// Reject non-finite opacity, clamp the rest into [0, 1]
pub fn validate_opacity(value: f64) -> Result<f64, String> {
    if value.is_finite() {
        Ok(value.clamp(0.0, 1.0))
    } else {
        Err(format!("opacity must be a finite number, got {}", value))
    }
}

/// Parse a `WxH` window size with both dimensions above zero
pub fn parse_size(size: &str) -> Result<(u32, u32), String> {
    let invalid = || format!("window size must look like 250x200, got {:?}", size);
    let (w, h) = size.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
    let w: u32 = w.trim().parse().map_err(|_| invalid())?;
    let h: u32 = h.trim().parse().map_err(|_| invalid())?;
    if w == 0 || h == 0 {
        return Err(invalid());
    }
    Ok((w, h))
}

/// Check for `#RRGGBB`
pub fn is_hex_color(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// JSON settings file on disk
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the settings file, falling back to defaults on any error
    pub fn load(&self) -> Settings {
        if !self.path.exists() {
            debug!("No settings file at {}, using defaults", self.path.display());
            return Settings::default();
        }

        match self.try_load() {
            Ok(settings) => {
                info!("Loaded settings from {}", self.path.display());
                settings
            }
            Err(e) => {
                warn!("Failed to load settings, using defaults: {:#}", e);
                Settings::default()
            }
        }
    }

    fn try_load(&self) -> anyhow::Result<Settings> {
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        let value: Value = serde_json::from_str(&raw)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(Settings::from_stored(&value))
    }

    /// Write the settings, logging instead of failing
    pub fn save(&self, settings: &Settings) {
        match self.try_save(settings) {
            Ok(()) => debug!("Saved settings to {}", self.path.display()),
            Err(e) => warn!("Failed to save settings: {:#}", e),
        }
    }

    /// Serialize to a sibling temp file and rename it over the target
    fn try_save(&self, settings: &Settings) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(settings).context("serializing settings")?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, json).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replacing {}", self.path.display()))?;
        Ok(())
    }
}
