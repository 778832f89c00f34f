//! OS-level keyboard and mouse listener
//!
//! The listener runs on its own thread for the life of the process and
//! forwards down transitions into the UI loop's input channel. Key repeat
//! while a key is held is not a new transition and is dropped. The held set
//! is forgotten whenever the gate is re-armed, so a release the OS never
//! delivered cannot swallow the first press of the next binding.

use std::collections::HashSet;

use tokio::sync::mpsc;

use super::binding::{HookGate, InputEvent};

/// Producer side of the input channel
pub type InputSender = mpsc::UnboundedSender<InputEvent>;

/// Drops auto-repeat presses of a key that is already down
#[derive(Debug, Default)]
pub struct RepeatFilter {
    held: HashSet<String>,
    epoch: u64,
}

impl RepeatFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a press is a fresh transition. `epoch` is the gate's current arm count.
    pub fn press(&mut self, name: &str, epoch: u64) -> bool {
        if epoch != self.epoch {
            self.held.clear();
            self.epoch = epoch;
        }
        self.held.insert(name.to_string())
    }

    pub fn release(&mut self, name: &str) {
        self.held.remove(name);
    }
}

/// Start the global listener thread
#[cfg(feature = "global-input")]
pub fn spawn_global_hook(gate: HookGate, events: InputSender) -> Result<(), String> {
    use rdev::EventType;
    use tracing::{error, info};

    use super::keys::{button_name, key_name};

    std::thread::Builder::new()
        .name("input-hook".to_string())
        .spawn(move || {
            info!("Global input hook started");
            let mut repeats = RepeatFilter::new();

            let result = rdev::listen(move |event| {
                let input = match event.event_type {
                    EventType::KeyPress(key) => match key_name(key) {
                        Some(name) if repeats.press(name, gate.epoch()) => {
                            Some(InputEvent::key(name))
                        }
                        _ => None,
                    },
                    EventType::KeyRelease(key) => {
                        if let Some(name) = key_name(key) {
                            repeats.release(name);
                        }
                        None
                    }
                    EventType::ButtonPress(button) => button_name(button).map(InputEvent::button),
                    _ => None,
                };

                if let Some(input) = input {
                    if gate.is_armed() {
                        // The loop may already be gone during shutdown
                        let _ = events.send(input);
                    }
                }
            });

            if let Err(e) = result {
                error!("Global input hook stopped: {:?}", e);
            }
        })
        .map(|_| ())
        .map_err(|e| format!("Failed to spawn input hook thread: {}", e))
}

#[cfg(not(feature = "global-input"))]
pub fn spawn_global_hook(_gate: HookGate, _events: InputSender) -> Result<(), String> {
    Err("built without the global-input feature, bindings only work through the control API"
        .to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeats_are_dropped_until_release() {
        let mut repeats = RepeatFilter::new();
        assert!(repeats.press("f5", 1));
        assert!(!repeats.press("f5", 1));
        assert!(repeats.press("f6", 1));

        repeats.release("f5");
        assert!(repeats.press("f5", 1));
    }

    #[test]
    fn rearming_forgets_a_missed_release() {
        let mut repeats = RepeatFilter::new();
        assert!(repeats.press("f5", 1));
        // Release lost while the gate was down
        assert!(!repeats.press("f5", 1));
        assert!(repeats.press("f5", 2));
        assert!(!repeats.press("f5", 2));
    }
}
