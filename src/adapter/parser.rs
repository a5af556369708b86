//! Parser subprocess adapter
//!
//! Invokes `program args... <pdf>` and decodes stdout as a JSON object.

use std::path::Path;

use tokio::process::Command;
use tracing::{debug, instrument, warn};

use crate::config::ProgramConfig;
use crate::error::{ClerkError, Result};
use crate::value::{decode_fields, Fields};

pub struct DocumentParser {
    program: String,
    args: Vec<String>,
}

impl DocumentParser {
    pub fn new(config: &ProgramConfig) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
        }
    }

    #[instrument(skip(self), fields(program = %self.program))]
    pub async fn parse(&self, path: &Path) -> Result<Fields> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .output()
            .await
            .map_err(|e| ClerkError::Launch {
                program: self.program.clone(),
                reason: e.to_string(),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            // Prefer stderr for diagnostics; the parser reports its own
            // failures as JSON on stdout.
            let raw = if stderr.trim().is_empty() {
                stdout.trim()
            } else {
                stderr.trim()
            };
            warn!(status = %output.status, "parser failed");
            return Err(ClerkError::ExternalProcess {
                program: self.program.clone(),
                status: output.status.to_string(),
                output: raw.to_string(),
            });
        }

        let fields = decode_fields(&stdout)?;
        debug!(fields = fields.len(), "parser output decoded");
        Ok(fields)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::value::FieldValue;

    fn sh(script: &str) -> DocumentParser {
        DocumentParser::new(&ProgramConfig {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), script.to_string()],
        })
    }

    #[tokio::test]
    async fn test_parse_success_passes_path() {
        // With `sh -c`, the appended pdf path becomes $0.
        let parser = sh(r#"printf '{"file": "%s", "vendor": "Acme"}' "$0""#);
        let fields = parser.parse(Path::new("/tmp/a.pdf")).await.unwrap();

        assert_eq!(fields["file"], FieldValue::text("/tmp/a.pdf"));
        assert_eq!(fields["vendor"], FieldValue::text("Acme"));
    }

    #[tokio::test]
    async fn test_nonzero_exit_carries_stderr() {
        let parser = sh("echo 'bad file' >&2; exit 1");
        let err = parser.parse(Path::new("/tmp/a.pdf")).await.unwrap_err();

        match err {
            ClerkError::ExternalProcess { output, .. } => assert_eq!(output, "bad file"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_nonzero_exit_falls_back_to_stdout() {
        let parser = sh(r#"echo '{"error": "No text extracted"}'; exit 1"#);
        let err = parser.parse(Path::new("/tmp/a.pdf")).await.unwrap_err();
        assert!(err.to_string().contains("No text extracted"));
    }

    #[tokio::test]
    async fn test_non_object_output_is_malformed() {
        let parser = sh("echo '[1, 2, 3]'");
        let err = parser.parse(Path::new("/tmp/a.pdf")).await.unwrap_err();
        assert!(matches!(err, ClerkError::MalformedOutput { .. }));
    }

    #[tokio::test]
    async fn test_missing_program_is_launch_error() {
        let parser = DocumentParser::new(&ProgramConfig {
            program: "clerk-no-such-parser".to_string(),
            args: vec![],
        });
        let err = parser.parse(Path::new("/tmp/a.pdf")).await.unwrap_err();
        assert!(matches!(err, ClerkError::Launch { .. }));
    }
}
