//! The UI loop
//!
//! A single task owns the [`AppState`] and is the only writer. It wakes on
//! the display tick, on input from the global hook and on commands from the
//! control surface, then publishes the resulting frame over a watch channel.

use std::time::Duration;

use tokio::{
    sync::{mpsc, oneshot, watch},
    time::MissedTickBehavior,
};
use tracing::{debug, info, warn};

use crate::{
    input::InputEvent,
    menu::MenuItem,
    state::{Action, AppState, OverlayView, Outcome},
    utils::Clock,
};

/// Display refresh period
pub const DEFAULT_TICK: Duration = Duration::from_millis(10);

/// Commands queued ahead of the loop before senders wait
const COMMAND_BUFFER: usize = 32;

/// A user action with a reply slot for the resulting frame
#[derive(Debug)]
pub struct Command {
    pub action: Action,
    pub reply: oneshot::Sender<Result<OverlayView, String>>,
}

/// Why a dispatched action produced no frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The action was invalid and nothing changed
    Rejected(String),
    /// The loop has exited
    Closed,
}

/// Handles for talking to a running loop
#[derive(Debug, Clone)]
pub struct LoopHandles {
    pub commands: mpsc::Sender<Command>,
    pub view: watch::Receiver<OverlayView>,
    pub menu: watch::Receiver<Vec<MenuItem>>,
}

impl LoopHandles {
    /// Send an action to the loop and wait for the frame it produced
    pub async fn dispatch(&self, action: Action) -> Result<OverlayView, DispatchError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Command { action, reply })
            .await
            .map_err(|_| DispatchError::Closed)?;
        match response.await {
            Ok(result) => result.map_err(DispatchError::Rejected),
            Err(_) => Err(DispatchError::Closed),
        }
    }

    /// Latest published frame
    pub fn current_view(&self) -> OverlayView {
        self.view.borrow().clone()
    }

    pub fn current_menu(&self) -> Vec<MenuItem> {
        self.menu.borrow().clone()
    }
}

/// The loop itself, run with [`UiLoop::run`]
pub struct UiLoop<C: Clock> {
    state: AppState,
    clock: C,
    tick: Duration,
    commands: mpsc::Receiver<Command>,
    inputs: mpsc::UnboundedReceiver<InputEvent>,
    view_tx: watch::Sender<OverlayView>,
    menu_tx: watch::Sender<Vec<MenuItem>>,
}

impl<C: Clock> UiLoop<C> {
    /// Build a loop around `state`, fed by `inputs`
    pub fn new(
        state: AppState,
        clock: C,
        tick: Duration,
        inputs: mpsc::UnboundedReceiver<InputEvent>,
    ) -> (Self, LoopHandles) {
        let (commands_tx, commands) = mpsc::channel(COMMAND_BUFFER);
        let (view_tx, view) = watch::channel(state.view());
        let (menu_tx, menu) = watch::channel(state.menu());

        let ui_loop = Self {
            state,
            clock,
            tick: tick.max(Duration::from_millis(1)),
            commands,
            inputs,
            view_tx,
            menu_tx,
        };
        let handles = LoopHandles {
            commands: commands_tx,
            view,
            menu,
        };
        (ui_loop, handles)
    }

    /// Run until an exit action arrives or every command sender is dropped
    pub async fn run(mut self) {
        info!("UI loop started with a {:?} tick", self.tick);

        let mut ticker = tokio::time::interval(self.tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.state.tick(self.clock.now());
                    self.publish_view();
                }
                Some(event) = self.inputs.recv() => {
                    debug!("Input event: {:?}", event);
                    self.state.handle_input(&event, self.clock.now());
                    self.publish_view();
                    self.publish_menu();
                }
                command = self.commands.recv() => {
                    let Some(Command { action, reply }) = command else {
                        warn!("Command channel closed, stopping UI loop");
                        self.state.shutdown();
                        break;
                    };

                    let result = self.state.apply(action, self.clock.now());
                    self.publish_view();
                    self.publish_menu();

                    let exit = result == Ok(Outcome::Exit);
                    // The requester may have given up waiting
                    let _ = reply.send(result.map(|_| self.state.view()));
                    if exit {
                        break;
                    }
                }
            }
        }

        info!("UI loop stopped");
    }

    fn publish_view(&self) {
        let view = self.state.view();
        self.view_tx.send_if_modified(|current| {
            if *current == view {
                false
            } else {
                *current = view;
                true
            }
        });
    }

    fn publish_menu(&self) {
        let menu = self.state.menu();
        self.menu_tx.send_if_modified(|current| {
            if *current == menu {
                false
            } else {
                *current = menu;
                true
            }
        });
    }
}
