//! Background tasks module
//! 
//! This module contains the UI loop that owns and refreshes the timer state.

pub mod ui_loop;

// Re-export main types
pub use ui_loop::{Command, DispatchError, LoopHandles, UiLoop, DEFAULT_TICK};
