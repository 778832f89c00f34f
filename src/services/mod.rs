//! External service module
//! 
//! Thin wrappers around platform services the timer talks to.

pub mod audio;

// Re-export main types
pub use audio::{cue_channel, Cue, CuePlayer, CueSender};
