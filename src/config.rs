//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};

use clap::Parser;

use crate::{store::DEFAULT_CONFIG_FILE, tasks::DEFAULT_TICK};

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "racing-timer")]
#[command(about = "An always-on-top racing stopwatch driven by a global key or mouse binding")]
#[command(version)]
pub struct Config {
    /// Settings file holding the binding and window preferences
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// JSON file with countdown presets, e.g. {"Track 1": 105}
    #[arg(long)]
    pub presets: Option<PathBuf>,

    /// Host address for the control API
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port for the control API
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Display refresh period in milliseconds
    #[arg(long, default_value_t = DEFAULT_TICK.as_millis() as u64, value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Give up on "Change Hotkey" after this many seconds without input
    #[arg(long)]
    pub capture_timeout: Option<u64>,

    /// Disable the start/stop tones
    #[arg(long)]
    pub mute: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn capture_timeout(&self) -> Option<Duration> {
        self.capture_timeout.map(Duration::from_secs)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["racing-timer"]).unwrap();
        assert_eq!(config.config, PathBuf::from("timer_config.json"));
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.tick(), DEFAULT_TICK);
        assert_eq!(config.capture_timeout(), None);
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn zero_tick_is_rejected() {
        assert!(Config::try_parse_from(["racing-timer", "--tick-ms", "0"]).is_err());
    }

    #[test]
    fn overrides() {
        let config = Config::try_parse_from([
            "racing-timer",
            "--capture-timeout",
            "30",
            "--presets",
            "tracks.json",
            "-v",
        ])
        .unwrap();
        assert_eq!(config.capture_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.presets, Some(PathBuf::from("tracks.json")));
        assert_eq!(config.log_level(), "debug");
    }
}
