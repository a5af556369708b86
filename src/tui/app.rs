//! TUI Application - Main entry point and run loop

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::EventStream,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::adapter::Adapters;
use crate::config::ClerkConfig;
use crate::error::{ClerkError, Result};

use super::dispatch::{Dispatcher, Flow};
use super::events::Event;
use super::render;
use super::state::AppState;
use super::theme::Theme;

type Term = Terminal<CrosstermBackend<Stdout>>;

/// TUI Application
pub struct TuiApp {
    dispatcher: Dispatcher,
    theme: Theme,
    tick_rate: Duration,
}

impl TuiApp {
    pub fn new(config: &ClerkConfig, adapters: Arc<dyn Adapters>) -> Self {
        Self {
            dispatcher: Dispatcher::new(AppState::default(), adapters),
            theme: Theme::from_config(&config.ui),
            tick_rate: Duration::from_millis(config.ui.tick_rate_ms),
        }
    }

    /// Run until the operator quits; the terminal is restored on every path
    pub async fn run(mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;
        info!("terminal ready");

        let result = self.main_loop(&mut terminal).await;
        let restored = restore_terminal(&mut terminal);

        info!("terminal restored");
        result?;
        restored
    }

    /// Main event loop
    async fn main_loop(&mut self, terminal: &mut Term) -> Result<()> {
        let size = terminal.size().map_err(terminal_error)?;
        self.dispatcher.dispatch(Event::Resize {
            width: size.width,
            height: size.height,
        });

        let input = tokio::spawn(read_input(self.dispatcher.sender()));
        let ticker = tokio::spawn(tick(self.dispatcher.sender(), self.tick_rate));

        let result = loop {
            if let Err(e) = terminal.draw(|frame| {
                render::draw(frame, self.dispatcher.state(), &self.theme)
            }) {
                break Err(terminal_error(e));
            }

            let Some(event) = self.dispatcher.next_event().await else {
                break Ok(());
            };
            if self.dispatcher.dispatch(event) == Flow::Quit {
                break Ok(());
            }
        };

        input.abort();
        ticker.abort();
        result
    }
}

/// Setup terminal for TUI
fn setup_terminal() -> Result<Term> {
    enable_raw_mode().map_err(terminal_error)?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(terminal_error)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(terminal_error)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Term) -> Result<()> {
    disable_raw_mode().map_err(terminal_error)?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).map_err(terminal_error)?;
    terminal.show_cursor().map_err(terminal_error)?;
    Ok(())
}

fn terminal_error(e: io::Error) -> ClerkError {
    ClerkError::Terminal {
        reason: e.to_string(),
    }
}

/// Forward key presses and resizes until the channel closes
async fn read_input(tx: UnboundedSender<Event>) {
    let mut stream = EventStream::new();
    while let Some(result) = stream.next().await {
        match result {
            Ok(raw) => {
                if let Some(event) = Event::from_terminal(raw) {
                    if tx.send(event).is_err() {
                        break;
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, "terminal input failed");
                break;
            }
        }
    }
}

async fn tick(tx: UnboundedSender<Event>, rate: Duration) {
    let mut interval = tokio::time::interval(rate);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        interval.tick().await;
        if tx.send(Event::Tick).is_err() {
            break;
        }
    }
}
