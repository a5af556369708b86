//! TUI Module - Warehouse Clerk screen
//!
//! Upload a PO document, parse it, search orders, open the stored PDF.
//!
//! Architecture:
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      UI LAYER (render.rs)                           │
//! │  Pure rendering. No business logic. Receives AppState + Theme.      │
//! └─────────────────────────────────────────────────────────────────────┘
//!                               ▲
//!                               │ &AppState
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │              DOMAIN LAYER (state.rs, update.rs)                     │
//! │  update(state, event) → (state, commands). No I/O.                  │
//! └─────────────────────────────────────────────────────────────────────┘
//!                               ▲
//!                               │ Event channel (keys, ticks, completions)
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │              DISPATCH LAYER (dispatch.rs, app.rs)                   │
//! │  One reader of state. Spawns commands against the adapters.         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

mod app;
mod command;
mod dispatch;
mod events;
mod input;
mod render;
mod state;
mod theme;
mod update;

use std::sync::Arc;

pub use app::TuiApp;
pub use command::{Command, SideEffect, Task};
pub use dispatch::{Dispatcher, Flow};
pub use events::{key_action, Action, Event, Message};
pub use input::{SearchInput, CHAR_LIMIT, PLACEHOLDER};
pub use render::{draw, render_text, Screen};
pub use state::{AppState, ErrorNote, Mode, Status, Viewport};
pub use theme::{icons, Theme};
pub use update::{update, NOT_FOUND_TEXT};

use crate::adapter::SystemAdapters;
use crate::config::ClerkConfig;
use crate::error::Result;

/// Run the clerk screen against the real collaborators
pub async fn run(config: &ClerkConfig) -> Result<()> {
    let adapters = Arc::new(SystemAdapters::from_config(config));
    TuiApp::new(config, adapters).run().await
}
