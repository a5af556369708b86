//! State transitions
//!
//! `update` is the only place state changes. It is pure: it takes the old
//! state by value and returns the new one plus the commands to run.

use std::path::Path;

use crossterm::event::KeyEvent;
use tracing::debug;

use crate::adapter::Lookup;
use crate::error::Result;
use crate::value::{pretty_json, Fields};

use super::command::Command;
use super::events::{key_action, Action, Event, Message};
use super::state::{AppState, ErrorNote, Mode, Status, Viewport};

pub const NOT_FOUND_TEXT: &str = "PO not found.";

pub fn update(state: AppState, event: Event) -> (AppState, Vec<Command>) {
    match event {
        Event::Key(key) => on_key(state, key),
        Event::Resize { width, height } => (
            AppState {
                viewport: Viewport { width, height },
                ..state
            },
            Vec::new(),
        ),
        Event::Tick => on_tick(state),
        Event::Completion(message) => on_message(state, message),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Keys
// ─────────────────────────────────────────────────────────────────────────────

fn on_key(mut state: AppState, key: KeyEvent) -> (AppState, Vec<Command>) {
    let action = key_action(key, state.mode, state.resolved_path.is_some());
    match action {
        Action::Quit => {
            state.should_quit = true;
            (state, Vec::new())
        }
        Action::Upload => {
            if state.busy {
                return (state, Vec::new());
            }
            state.mode = Mode::Upload;
            state.busy = true;
            state.status = Status::OpeningPicker;
            (state, vec![Command::pick_file()])
        }
        Action::Search => {
            state.mode = Mode::Search;
            state.status = Status::AwaitingQuery;
            (state, Vec::new())
        }
        Action::Submit => {
            if state.busy {
                return (state, Vec::new());
            }
            let po_number = state.search_input.value().trim().to_string();
            state.busy = true;
            state.status = Status::Searching;
            state.resolved_path = None;
            state.search_result.clear();
            (state, vec![Command::lookup_order(po_number)])
        }
        Action::Open => match state.resolved_path.clone() {
            Some(path) => {
                state.status = Status::OpeningDocument;
                (state, vec![Command::open_document(path)])
            }
            None => (state, Vec::new()),
        },
        Action::Edit => {
            state.search_input.handle_key(key);
            (state, Vec::new())
        }
        Action::None => (state, Vec::new()),
    }
}

fn on_tick(mut state: AppState) -> (AppState, Vec<Command>) {
    if state.busy {
        state.spinner_frame = state.spinner_frame.wrapping_add(1);
    }
    (state, Vec::new())
}

// ─────────────────────────────────────────────────────────────────────────────
// Completions
// ─────────────────────────────────────────────────────────────────────────────

fn on_message(state: AppState, message: Message) -> (AppState, Vec<Command>) {
    match message {
        Message::FileSelected(None) => (
            AppState {
                busy: false,
                status: Status::NoFileSelected,
                ..state
            },
            Vec::new(),
        ),
        Message::FileSelected(Some(path)) => {
            debug!(path = %path.display(), "file selected");
            let state = AppState {
                busy: true,
                status: Status::Parsing {
                    file: file_name(&path),
                },
                parse_error: None,
                ..state
            };
            (state, vec![Command::parse_document(path)])
        }
        Message::ParseCompleted(result) => (on_parsed(state, result), Vec::new()),
        Message::SearchCompleted(result) => (on_searched(state, result), Vec::new()),
    }
}

fn on_parsed(state: AppState, result: Result<Fields>) -> AppState {
    match result {
        Ok(fields) => AppState {
            busy: false,
            status: Status::ParseComplete,
            raw_output: Some(pretty_json(&fields)),
            last_output: Some(fields),
            parse_error: None,
            ..state
        },
        Err(e) => AppState {
            busy: false,
            status: Status::ParseError,
            parse_error: Some(ErrorNote::from_error(&e)),
            ..state
        },
    }
}

fn on_searched(state: AppState, result: Result<Lookup>) -> AppState {
    let (status, search_result, resolved_path) = match result {
        Ok(Lookup::Found(path)) => (
            Status::SearchComplete { found: true },
            format!("PDF found: {}", path.display()),
            Some(path),
        ),
        Ok(Lookup::NotFound) => (
            Status::SearchComplete { found: false },
            NOT_FOUND_TEXT.to_string(),
            None,
        ),
        Err(e) => (Status::SearchError, e.to_string(), None),
    };
    AppState {
        busy: false,
        status,
        search_result,
        resolved_path,
        ..state
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClerkError;
    use crate::tui::input::SearchInput;
    use crate::value::FieldValue;
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::path::PathBuf;

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    fn enter() -> Event {
        Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
    }

    fn search_state(po: &str) -> AppState {
        AppState {
            mode: Mode::Search,
            status: Status::AwaitingQuery,
            search_input: SearchInput::with_value(po),
            ..AppState::default()
        }
    }

    fn vendor_fields() -> Fields {
        let mut fields = Fields::new();
        fields.insert("vendor".into(), FieldValue::text("Acme"));
        fields
    }

    #[test]
    fn test_quit() {
        let (state, cmds) = update(AppState::default(), key('q'));
        assert!(state.should_quit);
        assert!(cmds.is_empty());

        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        let (state, _) = update(search_state("PO"), ctrl_c);
        assert!(state.should_quit);
    }

    #[test]
    fn test_upload_starts_picker() {
        let (state, cmds) = update(AppState::default(), key('u'));
        assert!(state.busy);
        assert_eq!(state.mode, Mode::Upload);
        assert_eq!(state.status, Status::OpeningPicker);
        assert_eq!(cmds, vec![Command::pick_file()]);
    }

    #[test]
    fn test_upload_ignored_while_busy() {
        let busy = AppState {
            busy: true,
            status: Status::Searching,
            mode: Mode::Search,
            ..AppState::default()
        };
        let (state, cmds) = update(busy, key('u'));
        assert!(cmds.is_empty());
        assert_eq!(state.mode, Mode::Search);
        assert_eq!(state.status, Status::Searching);
    }

    #[test]
    fn test_search_key_switches_mode() {
        let (state, cmds) = update(AppState::default(), key('s'));
        assert_eq!(state.mode, Mode::Search);
        assert_eq!(state.status, Status::AwaitingQuery);
        assert!(cmds.is_empty());
    }

    #[test]
    fn test_submit_trims_and_clears() {
        let start = AppState {
            resolved_path: Some("/docs/old.pdf".into()),
            search_result: "PDF found: /docs/old.pdf".into(),
            ..search_state("  PO-7 ")
        };
        let (state, cmds) = update(start, enter());
        assert!(state.busy);
        assert_eq!(state.status, Status::Searching);
        assert!(state.resolved_path.is_none());
        assert!(state.search_result.is_empty());
        assert_eq!(cmds, vec![Command::lookup_order("PO-7")]);
    }

    #[test]
    fn test_submit_ignored_while_busy() {
        let start = AppState {
            busy: true,
            ..search_state("PO-7")
        };
        let (state, cmds) = update(start, enter());
        assert!(cmds.is_empty());
        assert_eq!(state.status, Status::AwaitingQuery);
    }

    #[test]
    fn test_busy_toggles_on_completion() {
        let (state, _) = update(AppState::default(), key('u'));
        assert!(state.busy);
        let (state, _) = update(state, Event::Completion(Message::FileSelected(None)));
        assert!(!state.busy);

        let (state, _) = update(search_state("PO-7"), enter());
        assert!(state.busy);
        let (state, _) = update(
            state,
            Event::Completion(Message::SearchCompleted(Ok(Lookup::NotFound))),
        );
        assert!(!state.busy);
    }

    #[test]
    fn test_file_cancelled() {
        let (state, _) = update(AppState::default(), key('u'));
        let (state, cmds) = update(state, Event::Completion(Message::FileSelected(None)));
        assert!(!state.busy);
        assert_eq!(state.status.to_string(), "No file selected.");
        assert!(cmds.is_empty());
    }

    #[test]
    fn test_file_selected_starts_parse() {
        let start = AppState {
            busy: true,
            last_output: Some(vendor_fields()),
            ..AppState::default()
        };
        let path = PathBuf::from("/tmp/po-77.pdf");
        let (state, cmds) = update(
            start,
            Event::Completion(Message::FileSelected(Some(path.clone()))),
        );
        assert!(state.busy);
        assert_eq!(state.last_output, Some(vendor_fields()));
        assert!(state.parse_error.is_none());
        assert_eq!(state.status.to_string(), "Parsing po-77.pdf...");
        assert_eq!(cmds, vec![Command::parse_document(path)]);
    }

    #[test]
    fn test_parse_completed() {
        let start = AppState {
            busy: true,
            ..AppState::default()
        };
        let (state, cmds) = update(
            start,
            Event::Completion(Message::ParseCompleted(Ok(vendor_fields()))),
        );
        assert!(!state.busy);
        assert_eq!(state.status, Status::ParseComplete);
        assert_eq!(state.last_output, Some(vendor_fields()));
        assert_eq!(
            state.raw_output.as_deref(),
            Some("{\n  \"vendor\": \"Acme\"\n}")
        );
        assert!(cmds.is_empty());
    }

    #[test]
    fn test_parse_round_trip_shows_names_and_values() {
        let fields =
            crate::value::decode_fields(r#"{"po_number": "PO-100", "amount": "42"}"#).unwrap();
        let (state, _) = update(
            AppState {
                busy: true,
                ..AppState::default()
            },
            Event::Completion(Message::ParseCompleted(Ok(fields))),
        );

        let mut expected = Fields::new();
        expected.insert("po_number".into(), FieldValue::text("PO-100"));
        expected.insert("amount".into(), FieldValue::text("42"));
        assert_eq!(state.last_output, Some(expected));

        let screen = crate::tui::render::render_text(&state, &crate::tui::theme::Theme::default());
        let po_row = screen.lines().find(|l| l.contains("po_number")).unwrap();
        assert!(po_row.contains("PO-100"));
        let amount_row = screen.lines().find(|l| l.contains("amount")).unwrap();
        assert!(amount_row.contains("42"));
    }

    #[test]
    fn test_failed_reupload_keeps_previous_table() {
        let (state, _) = update(AppState::default(), key('u'));
        let (state, _) = update(
            state,
            Event::Completion(Message::FileSelected(Some("/tmp/first.pdf".into()))),
        );
        let (state, _) = update(
            state,
            Event::Completion(Message::ParseCompleted(Ok(vendor_fields()))),
        );

        let (state, _) = update(state, key('u'));
        let (state, _) = update(
            state,
            Event::Completion(Message::FileSelected(Some("/tmp/second.pdf".into()))),
        );
        let err = ClerkError::ExternalProcess {
            program: "python3".into(),
            status: "exit status: 1".into(),
            output: "bad file".into(),
        };
        let (state, _) = update(state, Event::Completion(Message::ParseCompleted(Err(err))));

        assert!(!state.busy);
        assert_eq!(state.status, Status::ParseError);
        assert_eq!(state.last_output, Some(vendor_fields()));
        assert!(state.raw_output.unwrap().contains("Acme"));
    }

    #[test]
    fn test_parse_failure_keeps_output() {
        let start = AppState {
            busy: true,
            last_output: Some(vendor_fields()),
            ..AppState::default()
        };
        let err = ClerkError::ExternalProcess {
            program: "python3".into(),
            status: "exit status: 1".into(),
            output: "bad file".into(),
        };
        let (state, _) = update(start, Event::Completion(Message::ParseCompleted(Err(err))));
        assert!(!state.busy);
        assert_eq!(state.status.to_string(), "Error parsing file.");
        assert_eq!(state.last_output, Some(vendor_fields()));
        assert!(state.parse_error.unwrap().message.contains("bad file"));
    }

    #[test]
    fn test_search_found_then_open() {
        let (state, _) = update(search_state("PO-7"), enter());
        let (state, _) = update(
            state,
            Event::Completion(Message::SearchCompleted(Ok(Lookup::Found(
                "/docs/7.pdf".into(),
            )))),
        );
        assert_eq!(state.search_result, "PDF found: /docs/7.pdf");
        assert_eq!(state.resolved_path, Some(PathBuf::from("/docs/7.pdf")));

        let (state, cmds) = update(state, key('o'));
        assert_eq!(state.status, Status::OpeningDocument);
        assert_eq!(cmds, vec![Command::open_document("/docs/7.pdf")]);
        assert!(!state.busy);
    }

    #[test]
    fn test_search_not_found_blocks_open() {
        let (state, _) = update(search_state("PO-7"), enter());
        let (state, _) = update(
            state,
            Event::Completion(Message::SearchCompleted(Ok(Lookup::NotFound))),
        );
        assert_eq!(state.search_result, NOT_FOUND_TEXT);
        assert!(state.resolved_path.is_none());

        let (state, cmds) = update(state, key('o'));
        assert!(cmds.is_empty());
        assert_eq!(state.status, Status::SearchComplete { found: false });
    }

    #[test]
    fn test_search_error() {
        let (state, _) = update(search_state("PO-7"), enter());
        let err = ClerkError::StorageUnavailable {
            path: "warehouse.db".into(),
            reason: "unable to open database file".into(),
        };
        let (state, _) = update(state, Event::Completion(Message::SearchCompleted(Err(err))));
        assert!(!state.busy);
        assert_eq!(state.status, Status::SearchError);
        assert!(state.search_result.starts_with("DB open error"));
        assert!(state.resolved_path.is_none());
    }

    #[test]
    fn test_typing_in_search() {
        let (state, _) = update(search_state(""), key('7'));
        let (state, _) = update(state, key('o'));
        assert_eq!(state.search_input.value(), "7o");

        let (state, _) = update(AppState::default(), key('7'));
        assert!(state.search_input.is_empty());
    }

    #[test]
    fn test_resize_and_tick() {
        let (state, _) = update(
            AppState::default(),
            Event::Resize {
                width: 120,
                height: 40,
            },
        );
        assert_eq!(state.viewport, Viewport { width: 120, height: 40 });

        let (state, _) = update(state, Event::Tick);
        assert_eq!(state.spinner_frame, 0);

        let busy = AppState { busy: true, ..state };
        let (state, _) = update(busy, Event::Tick);
        assert_eq!(state.spinner_frame, 1);
    }

    #[test]
    fn test_tab_switch_keeps_output() {
        let start = AppState {
            last_output: Some(vendor_fields()),
            ..AppState::default()
        };
        let (state, _) = update(start, key('s'));
        assert_eq!(state.last_output, Some(vendor_fields()));
    }
}
