//! Record store adapter
//!
//! One read-only SQLite connection per lookup, closed before returning.

use std::path::{Path, PathBuf};

use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{ConnectOptions, Connection};
use tracing::{debug, instrument};

use super::Lookup;
use crate::error::{ClerkError, Result};

/// The only query the store answers
pub const LOOKUP_SQL: &str = "SELECT pdf_path FROM purchase_orders WHERE po_number = ?";

pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    #[instrument(skip(self), fields(db = %self.path.display()))]
    pub async fn lookup(&self, po_number: &str) -> Result<Lookup> {
        let mut conn = SqliteConnectOptions::new()
            .filename(&self.path)
            .read_only(true)
            .connect()
            .await
            .map_err(|e| ClerkError::StorageUnavailable {
                path: self.path.display().to_string(),
                reason: e.to_string(),
            })?;

        let row = sqlx::query_scalar::<_, String>(LOOKUP_SQL)
            .bind(po_number)
            .fetch_optional(&mut conn)
            .await;

        if let Err(e) = conn.close().await {
            debug!(error = %e, "closing record store connection failed");
        }

        match row {
            Ok(Some(pdf_path)) => Ok(Lookup::Found(PathBuf::from(pdf_path))),
            Ok(None) => Ok(Lookup::NotFound),
            Err(e) => Err(ClerkError::QueryFailure {
                reason: e.to_string(),
            }),
        }
    }
}
