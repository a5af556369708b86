//! Clerk - warehouse PO terminal
//!
//! Upload a purchase-order PDF for parsing, look orders up in the local
//! record store, and open the stored document.

pub mod adapter;
pub mod config;
pub mod error;
pub mod tui;
pub mod value;

pub use adapter::{Adapters, Lookup, MockAdapters, SystemAdapters};
pub use config::ClerkConfig;
pub use error::{ClerkError, FixSuggestion};
pub use value::{FieldValue, Fields};
