//! Application state for the reelshelf TUI.

use crate::event::{AppEvent, Command};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{debug, info};
use reelshelf_core::{AddForm, Catalog, FormField, IdSource};
use std::sync::Arc;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Which part of the main screen receives typed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    Add(FormField),
    List,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Search => Focus::Add(FormField::Title),
            Focus::Add(FormField::Year) => Focus::List,
            Focus::Add(field) => Focus::Add(field.next()),
            Focus::List => Focus::Search,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::Search => Focus::List,
            Focus::Add(FormField::Title) => Focus::Search,
            Focus::Add(field) => Focus::Add(field.prev()),
            Focus::List => Focus::Add(FormField::Year),
        }
    }
}

/// Top-level application state for the TUI.
pub struct App {
    /// Cache, search, drafts and notices.
    pub catalog: Catalog,
    /// Add-record form contents.
    pub add_form: AddForm,
    /// Focused input area.
    pub focus: Focus,
    /// Index of the highlighted row among visible rows.
    pub selected: usize,
    /// Collection endpoint shown in the header.
    pub endpoint: String,
    /// Status line text.
    pub status: String,
    /// Requests started but not yet finished.
    pub in_flight: usize,
    spinner: usize,
    ids: Arc<dyn IdSource>,
}

impl App {
    pub fn new(endpoint: impl Into<String>, ids: Arc<dyn IdSource>) -> Self {
        Self {
            catalog: Catalog::new(),
            add_form: AddForm::default(),
            focus: Focus::Search,
            selected: 0,
            endpoint: endpoint.into(),
            status: "idle".to_string(),
            in_flight: 0,
            spinner: 0,
            ids,
        }
    }

    /// Record that the event loop started a request for `command`.
    pub fn started(&mut self, command: &Command) {
        self.status = match command {
            Command::Quit => return,
            Command::Reload => "loading".to_string(),
            Command::Create(_) => "adding".to_string(),
            Command::Update(_) => "saving".to_string(),
            Command::Delete(_) => "deleting".to_string(),
        };
        self.in_flight += 1;
    }

    pub fn spinner(&self) -> &'static str {
        if self.in_flight == 0 {
            " "
        } else {
            SPINNER[self.spinner % SPINNER.len()]
        }
    }

    /// Apply an event; returns follow-up work for the event loop.
    pub fn handle_event(&mut self, event: AppEvent) -> Option<Command> {
        match event {
            AppEvent::Input(key) => self.handle_key(key),
            AppEvent::Tick => {
                if self.in_flight > 0 {
                    self.spinner = self.spinner.wrapping_add(1);
                }
                None
            }
            AppEvent::Fetched(result) => {
                self.finished();
                let _ = self.catalog.apply_fetch(result);
                self.clamp_selection();
                None
            }
            AppEvent::Created(result) => {
                self.finished();
                self.catalog
                    .finish_create(result, &mut self.add_form)
                    .ok()
                    .map(|_| Command::Reload)
            }
            AppEvent::Updated(id, result) => {
                self.finished();
                self.catalog
                    .finish_update(&id, result)
                    .ok()
                    .map(|_| Command::Reload)
            }
            AppEvent::Deleted(id, result) => {
                self.finished();
                self.catalog
                    .finish_delete(&id, result)
                    .ok()
                    .map(|_| Command::Reload)
            }
        }
    }

    /// Dispatch a key press. Open dialogs take input before the main screen:
    /// notices first, then the delete confirmation, then the edit form.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Command> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            info!("quit requested");
            return Some(Command::Quit);
        }
        if self.catalog.current_notice().is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.catalog.take_notice();
            }
            return None;
        }
        if self.catalog.pending_delete().is_some() {
            return self.handle_confirm_key(key);
        }
        if self.catalog.edit().is_some() {
            return self.handle_edit_key(key);
        }
        if key.code == KeyCode::F(5) {
            return Some(Command::Reload);
        }
        match key.code {
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return None;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                return None;
            }
            _ => {}
        }
        match self.focus {
            Focus::Search => self.handle_search_key(key),
            Focus::Add(field) => self.handle_add_key(key, field),
            Focus::List => self.handle_list_key(key),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Option<Command> {
        let mut search = self.catalog.search().to_string();
        match key.code {
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                search.push(ch)
            }
            KeyCode::Backspace => {
                search.pop();
            }
            KeyCode::Esc => search.clear(),
            KeyCode::Down | KeyCode::Enter => {
                self.focus = Focus::List;
                return None;
            }
            _ => return None,
        }
        self.catalog.set_search(search);
        self.selected = 0;
        None
    }

    fn handle_add_key(&mut self, key: KeyEvent, field: FormField) -> Option<Command> {
        match key.code {
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.add_form.field_mut(field).push(ch);
            }
            KeyCode::Backspace => {
                self.add_form.field_mut(field).pop();
            }
            KeyCode::Down => self.focus = Focus::Add(field.next()),
            KeyCode::Up => self.focus = Focus::Add(field.prev()),
            KeyCode::Esc => self.focus = Focus::List,
            KeyCode::Enter => {
                let request = self
                    .catalog
                    .prepare_create(&self.add_form, self.ids.as_ref())
                    .ok()?;
                debug!("create submitted (title={})", request.title);
                return Some(Command::Create(request));
            }
            _ => {}
        }
        None
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Option<Command> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.catalog.visible().len() {
                    self.selected += 1;
                }
            }
            KeyCode::Home => self.selected = 0,
            KeyCode::End => {
                self.selected = self.catalog.visible().len().saturating_sub(1);
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                let id = self.selected_id()?;
                let _ = self.catalog.begin_edit(&id);
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                let id = self.selected_id()?;
                self.catalog.request_delete(id);
            }
            KeyCode::Char('r') => return Some(Command::Reload),
            KeyCode::Char('/') => self.focus = Focus::Search,
            KeyCode::Char('a') => self.focus = Focus::Add(FormField::Title),
            KeyCode::Char('q') => return Some(Command::Quit),
            _ => {}
        }
        None
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) -> Option<Command> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                self.catalog.confirm_delete().map(Command::Delete)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.catalog.cancel_delete();
                None
            }
            _ => None,
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) -> Option<Command> {
        match key.code {
            KeyCode::Esc => {
                self.catalog.cancel_edit();
                None
            }
            KeyCode::Enter => self.catalog.prepare_update().ok().map(Command::Update),
            code => {
                let form = self.catalog.edit_mut()?;
                match code {
                    KeyCode::Tab | KeyCode::Down => form.focus = form.focus.next(),
                    KeyCode::BackTab | KeyCode::Up => form.focus = form.focus.prev(),
                    KeyCode::Backspace => {
                        form.focused_mut().pop();
                    }
                    KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                        form.focused_mut().push(ch);
                    }
                    _ => {}
                }
                None
            }
        }
    }

    fn selected_id(&self) -> Option<reelshelf_protocol::MovieId> {
        self.catalog
            .visible()
            .get(self.selected)
            .map(|movie| movie.id.clone())
    }

    fn finished(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if self.in_flight == 0 {
            self.status = "idle".to_string();
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.catalog.visible().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }
}
