//! # External Adapters
//!
//! One trait, four capabilities. Each wraps exactly one outside facility and
//! reports its outcome as a plain value; the command layer turns those values
//! into completion messages.
//!
//! | Capability | Production | Facility |
//! |------------|------------|----------|
//! | `pick_file` | [`FilePicker`] | OS file chooser (zenity) |
//! | `parse_document` | [`DocumentParser`] | parser subprocess |
//! | `lookup_order` | [`RecordStore`] | SQLite `purchase_orders` |
//! | `open_document` | [`viewer::open_detached`] | OS default opener |
//!
//! [`MockAdapters`] scripts every capability for tests.

mod mock;
mod parser;
mod picker;
mod store;
pub mod viewer;

pub use mock::{AdapterCall, MockAdapters};
pub use parser::DocumentParser;
pub use picker::FilePicker;
pub use store::{RecordStore, LOOKUP_SQL};

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::config::ClerkConfig;
use crate::error::Result;
use crate::value::Fields;

/// Outcome of a PO lookup that reached the database
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(PathBuf),
    NotFound,
}

/// The outside world, as seen by commands
///
/// Async methods may wait on subprocesses or I/O; they run on tokio tasks,
/// never on the dispatcher. `open_document` is synchronous and is run on the
/// blocking pool.
#[async_trait]
pub trait Adapters: Send + Sync {
    /// Ask the operator for a PDF; `None` on cancel or failure
    async fn pick_file(&self) -> Option<PathBuf>;

    /// Run the parser on `path` and decode its JSON object
    async fn parse_document(&self, path: &Path) -> Result<Fields>;

    /// Find the stored PDF for an order number
    async fn lookup_order(&self, po_number: &str) -> Result<Lookup>;

    /// Hand `path` to the OS viewer; the outcome is not reported
    fn open_document(&self, path: &Path);
}

/// Production adapters built from [`ClerkConfig`]
pub struct SystemAdapters {
    picker: FilePicker,
    parser: DocumentParser,
    store: RecordStore,
}

impl SystemAdapters {
    pub fn from_config(config: &ClerkConfig) -> Self {
        Self {
            picker: FilePicker::new(&config.picker),
            parser: DocumentParser::new(&config.parser),
            store: RecordStore::new(&config.database),
        }
    }
}

#[async_trait]
impl Adapters for SystemAdapters {
    async fn pick_file(&self) -> Option<PathBuf> {
        self.picker.pick().await
    }

    async fn parse_document(&self, path: &Path) -> Result<Fields> {
        self.parser.parse(path).await
    }

    async fn lookup_order(&self, po_number: &str) -> Result<Lookup> {
        self.store.lookup(po_number).await
    }

    fn open_document(&self, path: &Path) {
        viewer::open_detached(path);
    }
}
