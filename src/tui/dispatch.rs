//! Dispatcher - the event loop core
//!
//! Owns the state and the inbound channel. Every event goes through
//! [`update`] one at a time; returned commands are spawned on the tokio
//! runtime and report back through the same channel.

use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::adapter::Adapters;

use super::command::Command;
use super::events::Event;
use super::state::AppState;
use super::update::update;

/// Whether the loop should keep going after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Dispatcher {
    state: AppState,
    adapters: Arc<dyn Adapters>,
    tx: UnboundedSender<Event>,
    rx: UnboundedReceiver<Event>,
}

impl Dispatcher {
    pub fn new(state: AppState, adapters: Arc<dyn Adapters>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state,
            adapters,
            tx,
            rx,
        }
    }

    /// Sender for input sources (terminal reader, ticker)
    pub fn sender(&self) -> UnboundedSender<Event> {
        self.tx.clone()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Next inbound event in arrival order
    ///
    /// Never returns `None` while the dispatcher is alive, since it keeps a
    /// sender of its own.
    pub async fn next_event(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    /// Apply one event and launch the resulting commands
    pub fn dispatch(&mut self, event: Event) -> Flow {
        if !matches!(event, Event::Tick) {
            debug!(event = ?event, "dispatch");
        }
        let (state, commands) = update(std::mem::take(&mut self.state), event);
        self.state = state;

        for command in commands {
            self.spawn(command);
        }

        if self.state.should_quit {
            info!("quit requested");
            Flow::Quit
        } else {
            Flow::Continue
        }
    }

    fn spawn(&self, command: Command) {
        let adapters = Arc::clone(&self.adapters);
        match command {
            Command::Task(task) => {
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let message = task.run(adapters.as_ref()).await;
                    if tx.send(Event::Completion(message)).is_err() {
                        warn!("completion dropped, dispatcher is gone");
                    }
                });
            }
            Command::Detached(effect) => {
                tokio::task::spawn_blocking(move || effect.run(adapters.as_ref()));
            }
        }
    }
}
