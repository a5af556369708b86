//! Search input editing
//!
//! Wraps `tui_input::Input` with the PO length limit and the key mapping
//! used while the Search tab is active.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_input::{Input, InputRequest};

/// Longest PO the input accepts
pub const CHAR_LIMIT: usize = 20;

pub const PLACEHOLDER: &str = "Enter PO number...";

#[derive(Debug, Clone, Default)]
pub struct SearchInput {
    input: Input,
}

impl SearchInput {
    pub fn with_value(value: &str) -> Self {
        let value: String = value.chars().take(CHAR_LIMIT).collect();
        Self {
            input: Input::default().with_value(value),
        }
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    /// Cursor position in characters
    pub fn cursor(&self) -> usize {
        self.input.visual_cursor()
    }

    pub fn is_empty(&self) -> bool {
        self.input.value().is_empty()
    }

    /// Apply an editing key; anything that is not an edit is ignored
    pub fn handle_key(&mut self, key: KeyEvent) {
        let Some(request) = to_request(key) else {
            return;
        };
        if let InputRequest::InsertChar(_) = request {
            if self.input.value().chars().count() >= CHAR_LIMIT {
                return;
            }
        }
        self.input.handle(request);
    }
}

fn to_request(key: KeyEvent) -> Option<InputRequest> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('w') if ctrl => Some(InputRequest::DeletePrevWord),
        KeyCode::Char('u') if ctrl => Some(InputRequest::DeleteLine),
        KeyCode::Char(_) if ctrl => None,
        KeyCode::Char(c) => Some(InputRequest::InsertChar(c)),
        KeyCode::Backspace => Some(InputRequest::DeletePrevChar),
        KeyCode::Delete => Some(InputRequest::DeleteNextChar),
        KeyCode::Left => Some(InputRequest::GoToPrevChar),
        KeyCode::Right => Some(InputRequest::GoToNextChar),
        KeyCode::Home => Some(InputRequest::GoToStart),
        KeyCode::End => Some(InputRequest::GoToEnd),
        _ => None,
    }
}
