//! Commands - deferred work returned by `update`
//!
//! Constructing a command does no I/O. The dispatcher runs it later:
//! a [`Task`] is awaited and yields exactly one [`Message`], a
//! [`SideEffect`] is fire-and-forget.

use std::path::PathBuf;

use tracing::debug;

use crate::adapter::Adapters;

use super::events::Message;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Task(Task),
    Detached(SideEffect),
}

/// Awaited work; the dispatcher stays busy until its message arrives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    PickFile,
    ParseDocument { path: PathBuf },
    LookupOrder { po_number: String },
}

/// Detached work; outcome is only logged
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SideEffect {
    OpenDocument { path: PathBuf },
}

impl Command {
    pub fn pick_file() -> Self {
        Self::Task(Task::PickFile)
    }

    pub fn parse_document(path: impl Into<PathBuf>) -> Self {
        Self::Task(Task::ParseDocument { path: path.into() })
    }

    pub fn lookup_order(po_number: impl Into<String>) -> Self {
        Self::Task(Task::LookupOrder {
            po_number: po_number.into(),
        })
    }

    pub fn open_document(path: impl Into<PathBuf>) -> Self {
        Self::Detached(SideEffect::OpenDocument { path: path.into() })
    }
}

impl Task {
    /// Run against the adapters and wrap the outcome
    pub async fn run(self, adapters: &dyn Adapters) -> Message {
        debug!(task = ?self, "running task");
        match self {
            Self::PickFile => Message::FileSelected(adapters.pick_file().await),
            Self::ParseDocument { path } => {
                Message::ParseCompleted(adapters.parse_document(&path).await)
            }
            Self::LookupOrder { po_number } => {
                Message::SearchCompleted(adapters.lookup_order(&po_number).await)
            }
        }
    }
}

impl SideEffect {
    pub fn run(self, adapters: &dyn Adapters) {
        debug!(effect = ?self, "running side effect");
        match self {
            Self::OpenDocument { path } => adapters.open_document(&path),
        }
    }
}
