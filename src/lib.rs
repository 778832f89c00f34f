//! Racing Timer - an always-on-top stopwatch for racing and speedrun timing
//! 
//! A global key or mouse button toggles the timer, runs are kept in a short
//! most-recent-first history, and an optional countdown preset turns the
//! display into remaining time. Window and menu actions reach the timer
//! through a local HTTP control API.

pub mod api;
pub mod config;
pub mod input;
pub mod menu;
pub mod presets;
pub mod services;
pub mod state;
pub mod store;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use state::{Action, AppState};
pub use store::ConfigStore;
pub use tasks::UiLoop;
pub use utils::signals::shutdown_signal;
