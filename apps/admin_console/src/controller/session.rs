//! Console-side driver: owns [`AppState`] and waits out every command an action triggers.

use std::sync::Arc;

use client_core::EmployeeStore;
use crossbeam_channel::{bounded, unbounded, Receiver, Sender, TryRecvError};

use crate::backend_bridge::{commands::BackendCommand, runtime};
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::{handle_event, update, Action, AppState};

pub struct Session {
    pub state: AppState,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
}

impl Session {
    pub fn start(store: Arc<dyn EmployeeStore>, queue_capacity: usize) -> Self {
        let (cmd_tx, cmd_rx) = bounded(queue_capacity.max(1));
        let (ui_tx, ui_rx) = unbounded();
        runtime::launch(store, cmd_rx, ui_tx);
        Self {
            state: AppState::default(),
            cmd_tx,
            ui_rx,
        }
    }

    /// Applies `action`, then blocks until every resulting command (and any refetch it
    /// triggers) has answered.
    pub fn perform(&mut self, action: Action) {
        self.drain_unsolicited();
        let commands = update(&mut self.state, action);
        let mut pending = self.dispatch_all(commands);

        while pending > 0 {
            match self.ui_rx.recv() {
                Ok(event) => {
                    pending -= 1;
                    let follow_up = handle_event(&mut self.state, event);
                    pending += self.dispatch_all(follow_up);
                }
                Err(_) => {
                    self.state.status = "Backend worker stopped".to_string();
                    break;
                }
            }
        }
        self.state.loading = false;
    }

    fn dispatch_all(&mut self, commands: Vec<BackendCommand>) -> usize {
        let mut accepted = 0;
        for cmd in commands {
            if dispatch_backend_command(&self.cmd_tx, cmd, &mut self.state.status) {
                accepted += 1;
            }
        }
        accepted
    }

    // Startup failures arrive without a command to answer.
    fn drain_unsolicited(&mut self) {
        loop {
            match self.ui_rx.try_recv() {
                Ok(event) => {
                    let follow_up = handle_event(&mut self.state, event);
                    if !follow_up.is_empty() {
                        tracing::debug!("dropping follow-up commands of unsolicited event");
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/session_tests.rs"]
mod tests;
