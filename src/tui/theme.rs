//! Terminal Theme - Visual Design System
//!
//! Green-on-black terminal aesthetic. Built once from [`UiConfig`] and handed
//! to the renderer; nothing reads colors from globals.

use std::str::FromStr;

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

use crate::config::UiConfig;

/// Color palette and title for the screen
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub title: String,

    // Primary palette
    pub background: Color,
    pub foreground: Color,
    pub accent: Color,

    // Status colors
    pub error_red: Color,
    pub dim_green: Color,

    pub border_type: BorderType,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: "PDF PARSER TERMINAL UI".to_string(),
            background: Color::Rgb(0, 0, 0),     // #000000
            foreground: Color::Rgb(0, 255, 0),   // #00FF00
            accent: Color::Rgb(0, 255, 0),       // #00FF00
            error_red: Color::Rgb(248, 81, 73),  // #F85149
            dim_green: Color::Rgb(0, 128, 0),    // #008000
            border_type: BorderType::Thick,
        }
    }
}

impl Theme {
    /// Build from validated UI config; an unparsable accent keeps the default
    pub fn from_config(ui: &UiConfig) -> Self {
        let defaults = Self::default();
        Self {
            title: ui.title.clone(),
            accent: Color::from_str(&ui.accent).unwrap_or(defaults.accent),
            ..defaults
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Styles
    // ─────────────────────────────────────────────────────────────────────

    /// Base style: foreground on background
    pub fn text(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    pub fn title(&self) -> Style {
        self.text().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn accent(&self) -> Style {
        self.text().fg(self.accent)
    }

    pub fn dimmed(&self) -> Style {
        self.text().fg(self.dim_green)
    }

    pub fn error(&self) -> Style {
        self.text().fg(self.error_red).add_modifier(Modifier::BOLD)
    }

    pub fn border(&self) -> Style {
        self.accent()
    }

    /// Cell under the input cursor
    pub fn cursor(&self) -> Style {
        Style::default().fg(self.background).bg(self.accent)
    }

    /// Table header row
    pub fn header(&self) -> Style {
        self.title().add_modifier(Modifier::UNDERLINED)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Icons and Symbols
// ─────────────────────────────────────────────────────────────────────────────

pub mod icons {
    /// Spinner animation, advanced one frame per tick
    pub const SPINNER: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

    pub fn spinner(frame: usize) -> &'static str {
        SPINNER[frame % SPINNER.len()]
    }
}
