//! AppState - Domain Layer
//!
//! The single source of truth for the screen. Only the dispatcher holds it,
//! and `update` replaces it wholesale on every event.

use std::fmt;
use std::path::PathBuf;

use crate::error::FixSuggestion;
use crate::value::Fields;

use super::input::SearchInput;

// ─────────────────────────────────────────────────────────────────────────────
// Core State
// ─────────────────────────────────────────────────────────────────────────────

/// Main application state
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub mode: Mode,

    /// An awaited command is outstanding
    pub busy: bool,
    pub status: Status,

    // Upload tab; replaced only by a successful parse
    pub last_output: Option<Fields>,
    /// Indented JSON of `last_output`
    pub raw_output: Option<String>,
    pub parse_error: Option<ErrorNote>,

    // Search tab
    pub search_input: SearchInput,
    pub search_result: String,
    pub resolved_path: Option<PathBuf>,

    // Terminal
    pub viewport: Viewport,
    pub spinner_frame: usize,
    pub should_quit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Upload,
    Search,
}

impl Mode {
    /// Tab indicator shown under the title
    pub fn label(&self) -> &'static str {
        match self {
            Self::Upload => "[ Upload Tab ]",
            Self::Search => "[ Search Tab ]",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 80,
            height: 24,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Status
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Ready,
    OpeningPicker,
    NoFileSelected,
    Parsing {
        file: String,
    },
    ParseError,
    ParseComplete,
    AwaitingQuery,
    Searching,
    SearchError,
    SearchComplete {
        found: bool,
    },
    OpeningDocument,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready => write!(f, "Press 'u' to upload a PDF..."),
            Self::OpeningPicker => write!(f, "Opening file picker..."),
            Self::NoFileSelected => write!(f, "No file selected."),
            Self::Parsing { file } => write!(f, "Parsing {}...", file),
            Self::ParseError => write!(f, "Error parsing file."),
            Self::ParseComplete => write!(f, "Parsing complete."),
            Self::AwaitingQuery => write!(f, "Search active. Type PO and press Enter."),
            Self::Searching => write!(f, "Searching database..."),
            Self::SearchError => write!(f, "Search error."),
            Self::SearchComplete { found: true } => {
                write!(f, "Search complete. Press 'o' to open PDF.")
            }
            Self::SearchComplete { found: false } => write!(f, "Search complete."),
            Self::OpeningDocument => write!(f, "Opening PDF..."),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors shown on screen
// ─────────────────────────────────────────────────────────────────────────────

/// Rendered form of an adapter error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNote {
    pub message: String,
    pub fix: Option<String>,
}

impl ErrorNote {
    pub fn from_error<E>(err: &E) -> Self
    where
        E: std::error::Error + FixSuggestion,
    {
        Self {
            message: err.to_string(),
            fix: err.fix_suggestion().map(str::to_string),
        }
    }
}
