//! Global input module
//!
//! Key/button naming, the binding state machine and the OS hook thread.

pub mod binding;
pub mod hook;
pub mod keys;

// Re-export main types
pub use binding::{normalize_binding, BindingManager, Dispatch, HookGate, InputEvent};
pub use hook::{spawn_global_hook, InputSender, RepeatFilter};
