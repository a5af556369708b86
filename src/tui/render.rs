//! Screen rendering
//!
//! [`Screen`] is a pure widget over `(state, theme)`: same inputs, same
//! cells. [`render_text`] draws it off-screen, which is what tests assert on.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Widget, Wrap},
    Frame,
};

use crate::value::{FieldValue, Fields};

use super::input::PLACEHOLDER;
use super::state::{AppState, ErrorNote, Mode};
use super::theme::{icons, Theme};

/// The whole application screen
pub struct Screen<'a> {
    state: &'a AppState,
    theme: &'a Theme,
}

impl<'a> Screen<'a> {
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    fn render_upload(&self, area: Rect, buf: &mut Buffer) {
        if self.state.busy {
            let line = Line::from(vec![
                Span::styled(icons::spinner(self.state.spinner_frame), self.theme.accent()),
                Span::styled(format!(" {}", self.state.status), self.theme.text()),
            ]);
            Paragraph::new(line)
                .alignment(Alignment::Center)
                .render(area, buf);
        } else if let Some(note) = &self.state.parse_error {
            self.render_error(note, area, buf);
        } else if let Some(fields) = &self.state.last_output {
            match &self.state.raw_output {
                Some(raw) => {
                    let rows = (fields.len() as u16).saturating_add(1);
                    let table_height = rows.min(area.height.saturating_sub(2) / 2).max(1);
                    let [table, _, raw_area] = Layout::vertical([
                        Constraint::Length(table_height),
                        Constraint::Length(1),
                        Constraint::Min(0),
                    ])
                    .areas(area);
                    self.render_fields(fields, table, buf);
                    self.render_raw(raw, raw_area, buf);
                }
                None => self.render_fields(fields, area, buf),
            }
        } else {
            Paragraph::new("No output yet.")
                .style(self.theme.text())
                .alignment(Alignment::Center)
                .render(area, buf);
        }
    }

    fn render_error(&self, note: &ErrorNote, area: Rect, buf: &mut Buffer) {
        let mut lines: Vec<Line> = note
            .message
            .lines()
            .map(|line| Line::styled(line.to_string(), self.theme.error()))
            .collect();
        if let Some(fix) = &note.fix {
            lines.push(Line::styled(format!("Fix: {}", fix), self.theme.dimmed()));
        }
        Paragraph::new(Text::from(lines))
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }

    /// Field/Value table, rows sorted case-insensitively
    fn render_fields(&self, fields: &Fields, area: Rect, buf: &mut Buffer) {
        let mut entries: Vec<(&String, &FieldValue)> = fields.iter().collect();
        entries.sort_by_key(|(name, _)| name.to_lowercase());

        let rows = entries.into_iter().map(|(name, value)| {
            let value_style = if value.is_scalar() {
                self.theme.text()
            } else {
                self.theme.dimmed()
            };
            Row::new(vec![
                Cell::from(name.clone()),
                Cell::from(value.to_string().replace('\n', " ")).style(value_style),
            ])
        });

        let header = Row::new(vec!["Field", "Value"]).style(self.theme.header());
        let table = Table::new(rows, [Constraint::Percentage(30), Constraint::Percentage(70)])
            .header(header)
            .style(self.theme.text());
        Widget::render(table, area, buf);
    }

    /// Parser output as indented JSON
    fn render_raw(&self, raw: &str, area: Rect, buf: &mut Buffer) {
        let mut lines = vec![Line::styled("Raw JSON:", self.theme.accent())];
        lines.extend(
            raw.lines()
                .map(|line| Line::styled(line.to_string(), self.theme.dimmed())),
        );
        Paragraph::new(Text::from(lines)).render(area, buf);
    }

    fn render_search(&self, area: Rect, buf: &mut Buffer) {
        let lines = vec![
            Line::styled("Search PO:", self.theme.text()).alignment(Alignment::Center),
            self.input_line(),
            Line::default(),
            Line::styled(self.state.search_result.clone(), self.theme.text())
                .alignment(Alignment::Center),
        ];
        Paragraph::new(Text::from(lines))
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }

    /// Prompt, buffer and highlighted cursor cell
    fn input_line(&self) -> Line<'static> {
        let input = &self.state.search_input;
        let prompt = Span::styled("> ", self.theme.accent());

        if input.is_empty() {
            let (first, rest) = PLACEHOLDER.split_at(1);
            return Line::from(vec![
                prompt,
                Span::styled(first, self.theme.cursor()),
                Span::styled(rest, self.theme.dimmed()),
            ]);
        }

        let chars: Vec<char> = input.value().chars().collect();
        let cursor = input.cursor().min(chars.len());
        let before: String = chars[..cursor].iter().collect();
        let (under, after) = match chars.get(cursor) {
            Some(c) => (c.to_string(), chars[cursor + 1..].iter().collect()),
            None => (" ".to_string(), String::new()),
        };

        Line::from(vec![
            prompt,
            Span::styled(before, self.theme.text()),
            Span::styled(under, self.theme.cursor()),
            Span::styled(after, self.theme.text()),
        ])
    }

    fn footer(&self) -> Line<'static> {
        let mut spans = Vec::new();
        let keys = [
            ("u", "upload"),
            ("s", "search"),
            ("enter", "submit"),
            ("o", "open"),
            ("q", "quit"),
        ];
        for (i, (key, label)) in keys.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" • ", self.theme.dimmed()));
            }
            spans.push(Span::styled(key, self.theme.accent()));
            spans.push(Span::styled(format!(" {}", label), self.theme.dimmed()));
        }
        Line::from(spans)
    }
}

impl Widget for Screen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(self.theme.border_type)
            .border_style(self.theme.border())
            .style(self.theme.text());
        let inner = block.inner(area);
        block.render(area, buf);

        let [title, mode, _, content, status, _, footer] = Layout::vertical([
            Constraint::Length(1), // Title band
            Constraint::Length(1), // Tab indicator
            Constraint::Length(1),
            Constraint::Min(3), // Content
            Constraint::Length(1), // Status
            Constraint::Length(1),
            Constraint::Length(1), // Key hints
        ])
        .areas(inner);

        Paragraph::new(self.theme.title.as_str())
            .style(self.theme.title())
            .alignment(Alignment::Center)
            .render(title, buf);
        Paragraph::new(self.state.mode.label())
            .style(self.theme.title())
            .alignment(Alignment::Center)
            .render(mode, buf);

        match self.state.mode {
            Mode::Upload => self.render_upload(content, buf),
            Mode::Search => self.render_search(content, buf),
        }

        Paragraph::new(format!("Status: {}", self.state.status))
            .style(self.theme.text())
            .alignment(Alignment::Center)
            .render(status, buf);
        Paragraph::new(self.footer())
            .alignment(Alignment::Center)
            .render(footer, buf);
    }
}

/// Draw the screen into a live frame
pub fn draw(frame: &mut Frame, state: &AppState, theme: &Theme) {
    frame.render_widget(Screen::new(state, theme), frame.area());
}

/// Render into an off-screen buffer sized by `state.viewport`
pub fn render_text(state: &AppState, theme: &Theme) -> String {
    let area = Rect::new(0, 0, state.viewport.width, state.viewport.height);
    let mut buffer = Buffer::empty(area);
    Screen::new(state, theme).render(area, &mut buffer);
    buffer_to_string(&buffer)
}

fn buffer_to_string(buffer: &Buffer) -> String {
    let mut lines = Vec::with_capacity(buffer.area.height as usize);
    for y in 0..buffer.area.height {
        let mut line = String::new();
        for x in 0..buffer.area.width {
            line.push_str(buffer[(x, y)].symbol());
        }
        lines.push(line);
    }
    lines.join("\n")
}
