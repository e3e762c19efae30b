//! Key handling for the full-screen interface.
//!
//! [`App`] owns the API and a snapshot of the list. It never touches the
//! terminal, so every key sequence can be replayed in tests against the
//! in-memory repository.
//!
//! ```text
//!            a              Enter/Esc
//!   Normal ─────▶ Input ─────────────▶ Normal
//!     │  e               Enter/Esc
//!     ├─────────▶ Edit ──────────────▶ Normal
//!     │  d               y / n / Esc
//!     └─────────▶ Confirmation ──────▶ Normal
//! ```
//!
//! Ctrl-C quits from every mode. After each mutation the list is refetched,
//! because a delete renumbers the todos after it.

use crate::cli::render::render_error;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use gctapp::api::GctApi;
use gctapp::clock::Clock;
use gctapp::commands::CmdResult;
use gctapp::error::{GctError, Result};
use gctapp::store::TodoRepository;
use gctapp::Todo;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Input,
    Edit,
    Confirmation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

pub struct App<R: TodoRepository, C: Clock> {
    api: GctApi<R, C>,
    pub todos: Vec<Todo>,
    pub selected: usize,
    pub mode: Mode,
    pub input: String,
    pub status: Option<Status>,
    pub should_quit: bool,
    // Target of the pending edit or delete
    target: Option<u64>,
}

impl<R: TodoRepository, C: Clock> App<R, C> {
    pub fn new(api: GctApi<R, C>) -> Self {
        let mut app = Self {
            api,
            todos: Vec::new(),
            selected: 0,
            mode: Mode::Normal,
            input: String::new(),
            status: None,
            should_quit: false,
            target: None,
        };
        app.refresh();
        app
    }

    pub fn selected_todo(&self) -> Option<&Todo> {
        self.todos.get(self.selected)
    }

    /// Todo awaiting delete confirmation.
    pub fn pending_delete(&self) -> Option<u64> {
        match self.mode {
            Mode::Confirmation => self.target,
            _ => None,
        }
    }

    /// Reload from the repository and keep the selection in range.
    pub fn refresh(&mut self) {
        match self.api.list_todos() {
            Ok(result) => {
                self.todos = result.listed_todos;
                self.clamp_selection();
            }
            Err(e) => self.show_error(&e),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.mode {
            Mode::Normal => self.handle_normal(key),
            Mode::Input | Mode::Edit => self.handle_text(key),
            Mode::Confirmation => self.handle_confirmation(key),
        }
    }

    fn handle_normal(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Char('j') | KeyCode::Down => {
                if self.selected + 1 < self.todos.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Char('g') => self.selected = 0,
            KeyCode::Char('G') => self.selected = self.todos.len().saturating_sub(1),
            KeyCode::Char(' ') => self.toggle_selected(),
            KeyCode::Char('a') => {
                self.input.clear();
                self.mode = Mode::Input;
            }
            KeyCode::Char('e') => {
                if let Some((id, description)) = self
                    .selected_todo()
                    .map(|t| (t.id, t.description.clone()))
                {
                    self.input = description;
                    self.target = Some(id);
                    self.mode = Mode::Edit;
                }
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.selected_todo().map(|t| t.id) {
                    self.target = Some(id);
                    self.mode = Mode::Confirmation;
                }
            }
            KeyCode::Char('r') => {
                self.status = None;
                self.refresh();
            }
            KeyCode::Esc => self.status = None,
            _ => {}
        }
    }

    fn handle_text(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.back_to_normal(),
            KeyCode::Enter => self.submit_text(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.push(c);
            }
            _ => {}
        }
    }

    fn handle_confirmation(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                if let Some(id) = self.target {
                    let outcome = self.api.delete_todo(id as i64);
                    self.finish(outcome);
                }
                self.back_to_normal();
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => self.back_to_normal(),
            _ => {}
        }
    }

    fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_todo().map(|t| t.id) {
            let outcome = self.api.toggle_todo(id as i64);
            self.finish(outcome);
        }
    }

    fn submit_text(&mut self) {
        let outcome = match (self.mode, self.target) {
            (Mode::Edit, Some(id)) => self.api.update_todo(id as i64, &self.input),
            _ => self.api.add_todo(&self.input),
        };

        // On failure keep the text so it can be fixed
        let added = self.mode == Mode::Input;
        match outcome {
            Ok(result) => {
                let new_id = result.affected().map(|t| t.id);
                self.finish(Ok(result));
                if let (true, Some(id)) = (added, new_id) {
                    self.select_id(id);
                }
                self.back_to_normal();
            }
            Err(e) => self.show_error(&e),
        }
    }

    fn finish(&mut self, outcome: Result<CmdResult>) {
        match outcome {
            Ok(result) => {
                self.status = result
                    .messages
                    .last()
                    .map(|m| Status::Info(m.content.clone()));
                self.refresh();
            }
            Err(e) => self.show_error(&e),
        }
    }

    fn back_to_normal(&mut self) {
        self.mode = Mode::Normal;
        self.input.clear();
        self.target = None;
    }

    fn select_id(&mut self, id: u64) {
        if let Some(index) = self.todos.iter().position(|t| t.id == id) {
            self.selected = index;
        }
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.todos.len().saturating_sub(1));
    }

    fn show_error(&mut self, err: &GctError) {
        self.status = Some(Status::Error(render_error(err)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gctapp::clock::ManualClock;
    use gctapp::store::mem_backend::MemBackend;
    use gctapp::store::InMemoryRepository;
    use gctapp::test_utils::manual_clock;

    type TestApp = App<InMemoryRepository, ManualClock>;

    fn make_app(descriptions: &[&str]) -> TestApp {
        let mut api = GctApi::new(
            InMemoryRepository::with_backend(MemBackend::new()),
            manual_clock(),
        );
        for d in descriptions {
            api.add_todo(d).unwrap();
        }
        App::new(api)
    }

    fn press(app: &mut TestApp, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut TestApp, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn descriptions(app: &TestApp) -> Vec<&str> {
        app.todos.iter().map(|t| t.description.as_str()).collect()
    }

    #[test]
    fn starts_with_current_list() {
        let app = make_app(&["a", "b"]);
        assert_eq!(descriptions(&app), vec!["a", "b"]);
        assert_eq!(app.selected, 0);
        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn navigation_stays_in_bounds() {
        let mut app = make_app(&["a", "b", "c"]);
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.selected, 0);

        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected, 2);

        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.selected, 0);
        press(&mut app, KeyCode::Char('G'));
        assert_eq!(app.selected, 2);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.selected, 1);
    }

    #[test]
    fn space_toggles_selected() {
        let mut app = make_app(&["a", "b"]);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char(' '));

        assert!(!app.todos[0].done);
        assert!(app.todos[1].done);
        assert_eq!(
            app.status,
            Some(Status::Info("Todo 2 marked as complete: b".into()))
        );
    }

    #[test]
    fn add_flow_selects_new_todo() {
        let mut app = make_app(&["a"]);
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.mode, Mode::Input);

        type_text(&mut app, "new onee");
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(descriptions(&app), vec!["a", "new one"]);
        assert_eq!(app.selected, 1);
        assert!(app.input.is_empty());
    }

    #[test]
    fn letters_in_input_mode_are_text_not_commands() {
        let mut app = make_app(&[]);
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "qjd");
        assert!(!app.should_quit);
        assert_eq!(app.input, "qjd");
    }

    #[test]
    fn empty_add_shows_error_and_keeps_mode() {
        let mut app = make_app(&[]);
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, Mode::Input);
        assert_eq!(
            app.status,
            Some(Status::Error("Error: description cannot be empty".into()))
        );
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Normal);
        assert!(app.todos.is_empty());
    }

    #[test]
    fn edit_prefills_and_replaces() {
        let mut app = make_app(&["old"]);
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.mode, Mode::Edit);
        assert_eq!(app.input, "old");

        for _ in 0..3 {
            press(&mut app, KeyCode::Backspace);
        }
        type_text(&mut app, "fresh");
        press(&mut app, KeyCode::Enter);

        assert_eq!(descriptions(&app), vec!["fresh"]);
        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn edit_on_empty_list_does_nothing() {
        let mut app = make_app(&[]);
        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut app = make_app(&["a", "b", "c"]);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.mode, Mode::Confirmation);
        assert_eq!(app.pending_delete(), Some(2));

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.todos.len(), 3);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.mode, Mode::Normal);
        let ids: Vec<u64> = app.todos.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(descriptions(&app), vec!["a", "c"]);
    }

    #[test]
    fn deleting_last_row_clamps_selection() {
        let mut app = make_app(&["a", "b"]);
        press(&mut app, KeyCode::Char('G'));
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('Y'));

        assert_eq!(app.todos.len(), 1);
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn quit_keys() {
        let mut app = make_app(&[]);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);

        let mut app = make_app(&[]);
        press(&mut app, KeyCode::Char('a'));
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn esc_clears_status_in_normal_mode() {
        let mut app = make_app(&["a"]);
        press(&mut app, KeyCode::Char(' '));
        assert!(app.status.is_some());
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.status, None);
    }
}
