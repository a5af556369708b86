//! Mock adapters for testing
//!
//! Scripted answers per capability (FIFO) plus a record of every call.
//! Essential for dispatcher scenarios that must not touch zenity, python
//! or SQLite.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{Adapters, Lookup};
use crate::error::{ClerkError, Result};
use crate::value::Fields;

/// A call observed by [`MockAdapters`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdapterCall {
    PickFile,
    ParseDocument(PathBuf),
    LookupOrder(String),
    OpenDocument(PathBuf),
}

/// Mock adapters that answer from queues
///
/// Empty queues answer "cancelled", a launch error, and "not found".
#[derive(Default)]
pub struct MockAdapters {
    picks: Mutex<VecDeque<Option<PathBuf>>>,
    parses: Mutex<VecDeque<Result<Fields>>>,
    lookups: Mutex<VecDeque<Result<Lookup>>>,
    calls: Mutex<Vec<AdapterCall>>,
}

impl MockAdapters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the next file chooser answer
    pub fn with_pick(self, path: Option<impl Into<PathBuf>>) -> Self {
        self.picks.lock().unwrap().push_back(path.map(Into::into));
        self
    }

    /// Queue the next parser answer
    pub fn with_parse(self, result: Result<Fields>) -> Self {
        self.parses.lock().unwrap().push_back(result);
        self
    }

    /// Queue the next lookup answer
    pub fn with_lookup(self, result: Result<Lookup>) -> Self {
        self.lookups.lock().unwrap().push_back(result);
        self
    }

    /// All calls made so far, in order
    pub fn calls(&self) -> Vec<AdapterCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: AdapterCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Adapters for MockAdapters {
    async fn pick_file(&self) -> Option<PathBuf> {
        self.record(AdapterCall::PickFile);
        self.picks.lock().unwrap().pop_front().flatten()
    }

    async fn parse_document(&self, path: &Path) -> Result<Fields> {
        self.record(AdapterCall::ParseDocument(path.to_path_buf()));
        self.parses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(ClerkError::Launch {
                    program: "mock-parser".to_string(),
                    reason: "no scripted response".to_string(),
                })
            })
    }

    async fn lookup_order(&self, po_number: &str) -> Result<Lookup> {
        self.record(AdapterCall::LookupOrder(po_number.to_string()));
        self.lookups
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(Lookup::NotFound))
    }

    fn open_document(&self, path: &Path) {
        self.record(AdapterCall::OpenDocument(path.to_path_buf()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_answers_in_order_then_defaults() {
        let mock = MockAdapters::new()
            .with_pick(Some("/tmp/a.pdf"))
            .with_pick(None::<PathBuf>);

        assert_eq!(mock.pick_file().await, Some(PathBuf::from("/tmp/a.pdf")));
        assert_eq!(mock.pick_file().await, None);
        assert_eq!(mock.pick_file().await, None);
        assert_eq!(mock.lookup_order("PO-7").await.unwrap(), Lookup::NotFound);
        assert!(mock.parse_document(Path::new("x.pdf")).await.is_err());
    }

    #[tokio::test]
    async fn test_records_calls() {
        let mock = MockAdapters::new();
        mock.lookup_order("PO-7").await.unwrap();
        mock.open_document(Path::new("/tmp/a.pdf"));

        assert_eq!(
            mock.calls(),
            vec![
                AdapterCall::LookupOrder("PO-7".to_string()),
                AdapterCall::OpenDocument(PathBuf::from("/tmp/a.pdf")),
            ]
        );
    }
}
