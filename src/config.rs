//! Clerk Configuration Module
//!
//! Startup configuration for the external collaborators and the UI.
//!
//! ## Lookup Order
//!
//! 1. `--config <path>` (must exist)
//! 2. `./clerk.toml` if present
//! 3. Defaults
//!
//! The value is built once in `main` and never mutated afterwards.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use ratatui::style::Color;
use serde::Deserialize;

use crate::error::{ClerkError, Result};

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "clerk.toml";

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClerkConfig {
    /// SQLite record store holding `purchase_orders`
    pub database: PathBuf,

    /// Document parser invoked as `program args... <pdf>`
    pub parser: ProgramConfig,

    /// File chooser; prints the selected path on stdout
    pub picker: ProgramConfig,

    pub ui: UiConfig,

    pub log: LogConfig,
}

/// An external program and its leading arguments
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ProgramConfig {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    /// Title band text
    pub title: String,

    /// Accent color (`#rrggbb` or a named color)
    pub accent: String,

    /// Spinner tick interval
    pub tick_rate_ms: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    pub file: PathBuf,

    /// Default filter when `RUST_LOG` is unset
    pub level: String,
}

impl Default for ClerkConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from("warehouse.db"),
            parser: ProgramConfig::parser(),
            picker: ProgramConfig::picker(),
            ui: UiConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl ProgramConfig {
    fn parser() -> Self {
        Self {
            program: "python3".to_string(),
            args: vec!["parse_cli.py".to_string()],
        }
    }

    fn picker() -> Self {
        Self {
            program: "zenity".to_string(),
            args: vec![
                "--file-selection".to_string(),
                "--title=Select a PDF".to_string(),
                "--file-filter=PDF files (pdf) | *.pdf".to_string(),
            ],
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: "PDF PARSER TERMINAL UI".to_string(),
            accent: "#00ff00".to_string(),
            tick_rate_ms: 100,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("clerk.log"),
            level: "info".to_string(),
        }
    }
}

impl ClerkConfig {
    /// Resolve and load configuration
    ///
    /// An explicit path must exist. Without one, `./clerk.toml` is used when
    /// present and defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_file(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load and validate a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| ClerkError::Config {
            reason: format!("Failed to read {}: {}", path.display(), e),
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| ClerkError::Config {
            reason: format!("Failed to parse config: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.parser.program.trim().is_empty() {
            return Err(ClerkError::Config {
                reason: "parser.program must not be empty".to_string(),
            });
        }
        if self.picker.program.trim().is_empty() {
            return Err(ClerkError::Config {
                reason: "picker.program must not be empty".to_string(),
            });
        }
        if self.ui.tick_rate_ms == 0 {
            return Err(ClerkError::Config {
                reason: "ui.tick_rate_ms must be greater than 0".to_string(),
            });
        }
        if Color::from_str(&self.ui.accent).is_err() {
            return Err(ClerkError::Config {
                reason: format!("ui.accent '{}' is not a color", self.ui.accent),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_point_at_stock_collaborators() {
        let config = ClerkConfig::default();
        assert_eq!(config.database, PathBuf::from("warehouse.db"));
        assert_eq!(config.parser.program, "python3");
        assert_eq!(config.parser.args, vec!["parse_cli.py"]);
        assert_eq!(config.picker.program, "zenity");
        assert_eq!(config.ui.tick_rate_ms, 100);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = ClerkConfig::from_toml(
            r#"
database = "/srv/po/warehouse.db"

[ui]
title = "WAREHOUSE CLERK"
"#,
        )
        .unwrap();

        assert_eq!(config.database, PathBuf::from("/srv/po/warehouse.db"));
        assert_eq!(config.ui.title, "WAREHOUSE CLERK");
        assert_eq!(config.ui.accent, "#00ff00");
        assert_eq!(config.parser, ProgramConfig::parser());
    }

    #[test]
    fn test_rejects_zero_tick_rate() {
        let err = ClerkConfig::from_toml("[ui]\ntick_rate_ms = 0\n").unwrap_err();
        assert!(matches!(err, ClerkError::Config { .. }));
    }

    #[test]
    fn test_rejects_empty_parser_program() {
        let err = ClerkConfig::from_toml("[parser]\nprogram = \"  \"\n").unwrap_err();
        assert!(err.to_string().contains("parser.program"));
    }

    #[test]
    fn test_rejects_unknown_accent() {
        let err = ClerkConfig::from_toml("[ui]\naccent = \"not-a-color\"\n").unwrap_err();
        assert!(err.to_string().contains("not-a-color"));
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope.toml");
        assert!(ClerkConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("clerk.toml");
        fs::write(&path, "[log]\nlevel = \"debug\"\n").unwrap();

        let config = ClerkConfig::load(Some(&path)).unwrap();
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.log.file, PathBuf::from("clerk.log"));
    }
}
