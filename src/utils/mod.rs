//! Utility functions module
//! 
//! Time formatting, clocks and signal handling shared across the application.

pub mod clock;
pub mod format;
pub mod signals;

// Re-export main functions
pub use clock::{Clock, ManualClock, SystemClock};
pub use format::{format_time, ZERO_TIME};
pub use signals::shutdown_signal;
