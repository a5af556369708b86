//! OS viewer adapter

use std::path::Path;

use tracing::{info, warn};

/// Open `path` with the default application without waiting for it
pub fn open_detached(path: &Path) {
    match open::that_detached(path) {
        Ok(()) => info!(path = %path.display(), "viewer launched"),
        Err(e) => warn!(path = %path.display(), error = %e, "viewer failed to launch"),
    }
}
