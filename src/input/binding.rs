//! Global input binding
//!
//! The [`BindingManager`] decides what a down event from the OS hook means:
//! nothing, a timer toggle, or (while capturing) the new binding. The hook
//! thread only forwards events while the shared [`HookGate`] is armed, so an
//! inactive manager receives nothing at all.

use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc,
};

use tracing::{debug, error, info};

use super::keys::{normalize_button, normalize_key};
use crate::store::{BindConfig, BindKind};

/// A key-down or button-down reported by the global hook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputEvent {
    pub kind: BindKind,
    pub name: String,
}

impl InputEvent {
    pub fn key(name: impl Into<String>) -> Self {
        Self {
            kind: BindKind::Keyboard,
            name: name.into(),
        }
    }

    pub fn button(name: impl Into<String>) -> Self {
        Self {
            kind: BindKind::Mouse,
            name: name.into(),
        }
    }
}

#[derive(Debug, Default)]
struct GateInner {
    armed: AtomicBool,
    epoch: AtomicU64,
}

/// Shared on/off switch between the manager and the hook thread
///
/// Every arm bumps the epoch so the hook can tell that a new registration
/// started and forget whatever it thought was still held.
#[derive(Debug, Clone, Default)]
pub struct HookGate(Arc<GateInner>);

impl HookGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self) -> bool {
        self.0.armed.load(Ordering::Acquire)
    }

    /// Number of times the gate has been armed
    pub fn epoch(&self) -> u64 {
        self.0.epoch.load(Ordering::Acquire)
    }

    fn set(&self, armed: bool) {
        if armed {
            self.0.epoch.fetch_add(1, Ordering::AcqRel);
        }
        self.0.armed.store(armed, Ordering::Release);
    }
}

/// What an input event resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Toggle,
    /// First input seen while capturing, already normalized
    Captured(BindConfig),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    Inactive,
    Active(BindConfig),
    Capturing,
}

/// Owns the one active binding and the capture mode
#[derive(Debug)]
pub struct BindingManager {
    mode: Mode,
    gate: HookGate,
}

/// Validate a binding and fold its value onto the canonical name
pub fn normalize_binding(binding: &BindConfig) -> Result<BindConfig, String> {
    let value = match binding.kind {
        BindKind::Keyboard => normalize_key(&binding.value),
        BindKind::Mouse => normalize_button(&binding.value),
    };
    value
        .map(|value| BindConfig {
            kind: binding.kind,
            value,
        })
        .ok_or_else(|| format!("Unknown {} input {:?}", binding.kind, binding.value))
}

impl BindingManager {
    pub fn new(gate: HookGate) -> Self {
        gate.set(false);
        Self {
            mode: Mode::Inactive,
            gate,
        }
    }

    /// Replace the active binding. On error nothing stays bound.
    pub fn activate(&mut self, binding: &BindConfig) -> Result<BindConfig, String> {
        self.deactivate();
        match normalize_binding(binding) {
            Ok(binding) => {
                info!("Listening for {} {:?}", binding.kind, binding.value);
                self.mode = Mode::Active(binding.clone());
                self.gate.set(true);
                Ok(binding)
            }
            Err(e) => {
                error!("Failed to bind {} {}: {}", binding.kind, binding.value, e);
                Err(e)
            }
        }
    }

    /// Drop the binding or capture in progress. Safe to call repeatedly.
    pub fn deactivate(&mut self) {
        if self.mode != Mode::Inactive {
            debug!("Releasing input hook");
        }
        self.mode = Mode::Inactive;
        self.gate.set(false);
    }

    /// Stop toggling and wait for the next key or button of either kind
    pub fn begin_capture(&mut self) {
        self.deactivate();
        info!("Waiting for a new key or mouse button");
        self.mode = Mode::Capturing;
        self.gate.set(true);
    }

    /// Leave capture mode without binding anything
    pub fn cancel_capture(&mut self) {
        if self.is_capturing() {
            info!("Input capture cancelled");
            self.deactivate();
        }
    }

    pub fn is_capturing(&self) -> bool {
        self.mode == Mode::Capturing
    }

    pub fn active(&self) -> Option<&BindConfig> {
        match &self.mode {
            Mode::Active(binding) => Some(binding),
            _ => None,
        }
    }

    pub fn gate(&self) -> &HookGate {
        &self.gate
    }

    /// Resolve a down event
    pub fn handle(&mut self, event: &InputEvent) -> Option<Dispatch> {
        match &self.mode {
            Mode::Inactive => None,
            Mode::Active(binding) => {
                let matches = binding.kind == event.kind
                    && normalize_binding(&BindConfig {
                        kind: event.kind,
                        value: event.name.clone(),
                    })
                    .is_ok_and(|b| b.value == binding.value);
                matches.then_some(Dispatch::Toggle)
            }
            Mode::Capturing => {
                let captured = normalize_binding(&BindConfig {
                    kind: event.kind,
                    value: event.name.clone(),
                })
                .ok()?;
                info!("Captured {} {:?}", captured.kind, captured.value);
                self.deactivate();
                Some(Dispatch::Captured(captured))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> BindingManager {
        BindingManager::new(HookGate::new())
    }

    #[test]
    fn matching_key_toggles() {
        let mut bindings = manager();
        bindings.activate(&BindConfig::keyboard("F5")).unwrap();
        assert_eq!(bindings.active(), Some(&BindConfig::keyboard("f5")));
        assert_eq!(bindings.handle(&InputEvent::key("f5")), Some(Dispatch::Toggle));
        assert_eq!(bindings.handle(&InputEvent::key("f6")), None);
        assert_eq!(bindings.handle(&InputEvent::button("left")), None);
    }

    #[test]
    fn mouse_binding_ignores_keys_with_same_name() {
        let mut bindings = manager();
        bindings.activate(&BindConfig::mouse("left")).unwrap();
        assert_eq!(bindings.handle(&InputEvent::key("left")), None);
        assert_eq!(bindings.handle(&InputEvent::button("left")), Some(Dispatch::Toggle));
    }

    #[test]
    fn invalid_binding_leaves_nothing_active() {
        let mut bindings = manager();
        bindings.activate(&BindConfig::keyboard("f5")).unwrap();
        assert!(bindings.activate(&BindConfig::keyboard("not-a-key")).is_err());
        assert_eq!(bindings.active(), None);
        assert!(!bindings.gate().is_armed());
        assert_eq!(bindings.handle(&InputEvent::key("f5")), None);
    }

    #[test]
    fn deactivate_is_idempotent() {
        let mut bindings = manager();
        bindings.deactivate();
        bindings.activate(&BindConfig::keyboard("a")).unwrap();
        assert!(bindings.gate().is_armed());
        bindings.deactivate();
        bindings.deactivate();
        assert!(!bindings.gate().is_armed());
        assert_eq!(bindings.handle(&InputEvent::key("a")), None);
    }

    #[test]
    fn capture_takes_first_event_only() {
        let mut bindings = manager();
        bindings.activate(&BindConfig::keyboard("f5")).unwrap();
        bindings.begin_capture();
        assert!(bindings.is_capturing());
        assert!(bindings.gate().is_armed());

        assert_eq!(bindings.handle(&InputEvent::key("unknown key")), None);
        assert!(bindings.is_capturing());

        assert_eq!(
            bindings.handle(&InputEvent::button("x2")),
            Some(Dispatch::Captured(BindConfig::mouse("x2")))
        );
        assert!(!bindings.is_capturing());
        assert!(!bindings.gate().is_armed());
        assert_eq!(bindings.handle(&InputEvent::key("k")), None);
    }

    #[test]
    fn every_arm_starts_a_new_epoch() {
        let mut bindings = manager();
        let start = bindings.gate().epoch();

        bindings.activate(&BindConfig::keyboard("f5")).unwrap();
        assert_eq!(bindings.gate().epoch(), start + 1);

        bindings.begin_capture();
        assert_eq!(bindings.gate().epoch(), start + 2);

        bindings.deactivate();
        assert!(bindings.activate(&BindConfig::keyboard("nope")).is_err());
        assert_eq!(bindings.gate().epoch(), start + 2);
    }

    #[test]
    fn cancel_capture_only_affects_capture() {
        let mut bindings = manager();
        bindings.activate(&BindConfig::keyboard("f5")).unwrap();
        bindings.cancel_capture();
        assert!(bindings.active().is_some());

        bindings.begin_capture();
        bindings.cancel_capture();
        assert!(!bindings.is_capturing());
        assert!(!bindings.gate().is_armed());
    }
}
