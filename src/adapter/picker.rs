//! File chooser adapter
//!
//! Runs the configured chooser (zenity by default) and reads the selected
//! path from stdout. Cancel, launch failure and empty output all mean "no
//! file".

use std::path::PathBuf;

use tokio::process::Command;
use tracing::{debug, warn};

use crate::config::ProgramConfig;

pub struct FilePicker {
    program: String,
    args: Vec<String>,
}

impl FilePicker {
    pub fn new(config: &ProgramConfig) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
        }
    }

    pub async fn pick(&self) -> Option<PathBuf> {
        // output() gives the child a closed stdin, so it never competes with
        // the TUI for the terminal.
        let output = match Command::new(&self.program).args(&self.args).output().await {
            Ok(output) => output,
            Err(e) => {
                warn!(program = %self.program, error = %e, "file picker failed to launch");
                return None;
            }
        };

        if !output.status.success() {
            debug!(status = %output.status, "file picker closed without a selection");
            return None;
        }

        selected_path(&output.stdout)
    }
}

fn selected_path(stdout: &[u8]) -> Option<PathBuf> {
    let trimmed = stdout.trim_ascii();
    if trimmed.is_empty() {
        None
    } else {
        Some(path_from_bytes(trimmed))
    }
}

/// Raw bytes on unix, lossy UTF-8 elsewhere
#[cfg(unix)]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    PathBuf::from(OsString::from_vec(bytes.to_vec()))
}

#[cfg(not(unix))]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
}
