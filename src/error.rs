//! Error types with fix suggestions

use thiserror::Error;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

pub type Result<T> = std::result::Result<T, ClerkError>;

/// Every failure an adapter or the application shell can surface.
///
/// A cancelled file pick and a PO with no matching row are not errors; they
/// travel as `FileSelected(None)` and `Lookup::NotFound`.
#[derive(Error, Debug)]
pub enum ClerkError {
    // ─────────────────────────────────────────────────────────────
    // Parser process
    // ─────────────────────────────────────────────────────────────
    #[error("{program} exited with {status}\nOutput: {output}")]
    ExternalProcess {
        program: String,
        status: String,
        output: String,
    },

    #[error("Failed to launch {program}: {reason}")]
    Launch { program: String, reason: String },

    #[error("Parser output is not a JSON object: {details}\nOutput: {output}")]
    MalformedOutput { details: String, output: String },

    // ─────────────────────────────────────────────────────────────
    // Record store
    // ─────────────────────────────────────────────────────────────
    #[error("DB open error ({path}): {reason}")]
    StorageUnavailable { path: String, reason: String },

    #[error("DB query error: {reason}")]
    QueryFailure { reason: String },

    // ─────────────────────────────────────────────────────────────
    // Application shell
    // ─────────────────────────────────────────────────────────────
    #[error("Config error: {reason}")]
    Config { reason: String },

    #[error("Terminal error: {reason}")]
    Terminal { reason: String },
}

impl FixSuggestion for ClerkError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            ClerkError::ExternalProcess { .. } => {
                Some("Check the PDF is readable and the parser's dependencies are installed")
            }
            ClerkError::Launch { .. } => Some("Check [parser]/[picker] program paths in clerk.toml"),
            ClerkError::MalformedOutput { .. } => {
                Some("The parser must print exactly one JSON object on stdout")
            }
            ClerkError::StorageUnavailable { .. } => {
                Some("Check `database` in clerk.toml points at an existing SQLite file")
            }
            ClerkError::QueryFailure { .. } => {
                Some("Ensure the database has a purchase_orders(po_number, pdf_path) table")
            }
            ClerkError::Config { .. } => Some("Fix the value in clerk.toml or pass --config"),
            ClerkError::Terminal { .. } => Some("Run clerk from an interactive terminal"),
        }
    }
}
