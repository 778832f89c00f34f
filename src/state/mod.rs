//! State management module
//! 
//! Timer state machine, lap history, user actions and the application state
//! that ties them together.

pub mod action;
pub mod app_state;
pub mod lap_history;
pub mod timer_state;
pub mod view;

// Re-export main types
pub use action::Action;
pub use app_state::{AppState, Outcome};
pub use lap_history::{LapHistory, LAP_CAPACITY, LAP_PLACEHOLDER};
pub use timer_state::{TimerState, Transition};
pub use view::OverlayView;
