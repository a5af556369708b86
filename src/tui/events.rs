//! Event Handling - inbound events and keyboard mapping

use std::path::PathBuf;

use crossterm::event::{Event as TerminalEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::adapter::Lookup;
use crate::error::Result;
use crate::value::Fields;

use super::state::Mode;

/// Everything the dispatcher can pull from its inbound channel
#[derive(Debug)]
pub enum Event {
    /// Keyboard input (press events only)
    Key(KeyEvent),
    /// Terminal resize
    Resize { width: u16, height: u16 },
    /// Spinner tick
    Tick,
    /// A finished command
    Completion(Message),
}

/// Completion messages, one per awaited command
#[derive(Debug)]
pub enum Message {
    FileSelected(Option<PathBuf>),
    ParseCompleted(Result<Fields>),
    SearchCompleted(Result<Lookup>),
}

impl Event {
    /// Convert a crossterm event; releases, repeats, mouse and focus are dropped
    pub fn from_terminal(event: TerminalEvent) -> Option<Self> {
        match event {
            TerminalEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Self::Key(key)),
            TerminalEvent::Resize(width, height) => Some(Self::Resize { width, height }),
            _ => None,
        }
    }
}

impl From<Message> for Event {
    fn from(message: Message) -> Self {
        Self::Completion(message)
    }
}

/// Actions that can be triggered by user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Upload,
    Search,
    Submit,
    Open,
    /// Forward to the search input
    Edit,
    None,
}

/// Map a key to an action for the given tab
///
/// `u`, `s` and `q` are global, so they cannot be typed into the PO field.
/// `o` opens only when a document was found; otherwise it is typed.
pub fn key_action(key: KeyEvent, mode: Mode, has_document: bool) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Action::Quit,
            _ if mode == Mode::Search => Action::Edit,
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('u') => Action::Upload,
        KeyCode::Char('s') => Action::Search,
        KeyCode::Enter if mode == Mode::Search => Action::Submit,
        KeyCode::Char('o') if mode == Mode::Search && has_document => Action::Open,
        _ if mode == Mode::Search => Action::Edit,
        _ => Action::None,
    }
}
