//! Application state and core logic

use crate::config::TuiConfig;
use crate::engine::FieldValues;
use crate::platform::Shortcut;
use crate::schema::{FieldType, FormCategory, FormSchema, SchemaRegistry};
use crate::sink::FormSink;
use crate::state::{
    AppState, FieldEdit, FormAction, FormController, FormSession, StatusKind, View,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;
use std::sync::Arc;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Every form the catalog can open
    pub registry: SchemaRegistry,
    pub config: TuiConfig,
    /// Receives saved drafts and accepted submissions
    sink: Box<dyn FormSink>,
    /// The form being filled in, if any
    pub session: Option<FormSession>,
    /// Last saved values per form id, restored when a form is reopened
    drafts: HashMap<String, FieldValues>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance
    pub fn new(registry: SchemaRegistry, config: TuiConfig, sink: Box<dyn FormSink>) -> Self {
        let mut state = AppState::default();
        if let Some(category) = config.start_category() {
            state.select_category(category);
        }

        Self {
            state,
            registry,
            config,
            sink,
            session: None,
            drafts: HashMap::new(),
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Forms listed under the current category tab
    pub fn catalog_forms(&self) -> Vec<Arc<FormSchema>> {
        self.registry.by_category(self.state.category())
    }

    pub fn selected_form(&self) -> Option<Arc<FormSchema>> {
        self.catalog_forms().get(self.state.selected_index).cloned()
    }

    pub fn has_draft(&self, form_id: &str) -> bool {
        self.drafts.contains_key(form_id)
    }

    /// Open the highlighted catalog entry
    pub fn open_selected_form(&mut self) {
        if let Some(schema) = self.selected_form() {
            self.open_form(schema);
        }
    }

    /// Open a form, restoring its last saved draft if there is one
    pub fn open_form(&mut self, schema: Arc<FormSchema>) {
        let controller = match self.drafts.get(&schema.id) {
            Some(values) => {
                self.state
                    .set_status(StatusKind::Info, format!("Restored draft of {}", schema.title));
                FormController::with_values(schema, values.clone())
            }
            None => FormController::new(schema),
        };
        tracing::info!("Opened form {}", controller.schema().id);
        self.session = Some(FormSession::new(controller));
        self.state.current_view = View::Form;
        self.state.discard_pending = false;
    }

    /// Drop the open form and go back to the catalog
    pub fn close_form(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::debug!("Closed form {}", session.controller.schema().id);
        }
        self.state.current_view = View::Catalog;
        self.state.discard_pending = false;
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Clear any status messages on key press
        self.state.clear_status();

        match self.state.current_view {
            View::Catalog => self.handle_catalog_key(key),
            View::Form => self.handle_form_key(key).await,
        }
        Ok(())
    }

    /// Handle keys in the catalog view
    fn handle_catalog_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                let count = self.catalog_forms().len();
                self.state.move_selection_down(count);
            }
            KeyCode::Char('k') | KeyCode::Up => self.state.move_selection_up(),
            KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab => self.state.next_category(),
            KeyCode::Char('h') | KeyCode::Left | KeyCode::BackTab => self.state.prev_category(),
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                if let Some(category) = FormCategory::ALL.get(index) {
                    self.state.select_category(*category);
                }
            }
            KeyCode::Enter => self.open_selected_form(),
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
    }

    /// Handle keys while a form is open
    async fn handle_form_key(&mut self, key: KeyEvent) {
        let Some(session) = self.session.as_ref() else {
            self.close_form();
            return;
        };
        let on_actions = session.is_actions_row_active();
        let action = session.selected_action();

        let requests_cancel = key.code == KeyCode::Esc
            || (on_actions && key.code == KeyCode::Enter && action == FormAction::Cancel);
        if !requests_cancel {
            self.state.discard_pending = false;
        }

        match key.code {
            // Keyboard shortcuts (work from anywhere)
            _ if Shortcut::SAVE.matches(&key) => self.save_form().await,
            _ if Shortcut::SUBMIT.matches(&key) => self.submit_form().await,
            KeyCode::Esc => self.cancel_form(),
            KeyCode::Enter if on_actions => self.run_action(action).await,
            _ => self.handle_field_key(key, on_actions),
        }
    }

    /// Navigation and editing keys for the focused field or the actions row
    fn handle_field_key(&mut self, key: KeyEvent, on_actions: bool) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let is_select = session
            .active_field()
            .is_some_and(|f| f.field_type == FieldType::Select);

        match key.code {
            KeyCode::Tab | KeyCode::Down => session.next_field(),
            KeyCode::BackTab | KeyCode::Up => session.prev_field(),
            // Left/Right move between buttons on the actions row
            KeyCode::Left | KeyCode::Char('h') if on_actions => session.prev_action(),
            KeyCode::Right | KeyCode::Char('l') if on_actions => session.next_action(),
            KeyCode::Left if is_select => {
                session.apply(FieldEdit::PrevOption);
            }
            KeyCode::Right if is_select => {
                session.apply(FieldEdit::NextOption);
            }
            KeyCode::Enter => {
                if session.is_active_field_multiline() {
                    session.apply(FieldEdit::Newline);
                } else {
                    session.next_field();
                }
            }
            KeyCode::Backspace => {
                session.apply(FieldEdit::Backspace);
            }
            KeyCode::Delete => {
                session.apply(FieldEdit::Clear);
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER) =>
            {
                session.apply(FieldEdit::Insert(c));
            }
            _ => {}
        }
    }

    /// Run the button selected on the actions row
    async fn run_action(&mut self, action: FormAction) {
        match action {
            FormAction::Submit => self.submit_form().await,
            FormAction::Save => self.save_form().await,
            FormAction::Reset => {
                if let Some(session) = self.session.as_mut() {
                    session.controller.reset();
                    self.state.set_status(StatusKind::Info, "Form reset");
                }
            }
            FormAction::Cancel => self.cancel_form(),
        }
    }

    /// Store a draft snapshot and hand it to the sink
    async fn save_form(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let form_id = session.controller.schema().id.clone();
        let values = session.controller.save();
        self.drafts.insert(form_id.clone(), values.clone());

        match self.sink.on_save(&form_id, &values).await {
            Ok(()) => self.state.set_status(StatusKind::Success, "Draft saved"),
            Err(e) => {
                tracing::error!("Failed to save draft of {form_id}: {e:#}");
                self.state
                    .set_status(StatusKind::Error, format!("Failed to save draft: {e}"));
            }
        }
    }

    /// Validate the whole form and hand the values to the sink if it passes
    async fn submit_form(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.blur_active();
        let form_id = session.controller.schema().id.clone();
        let title = session.controller.schema().title.clone();

        let Some(values) = session.controller.submit() else {
            let count = session.controller.error_count();
            session.focus_first_invalid();
            self.state.set_status(
                StatusKind::Error,
                format!("Cannot submit: {count} required field(s) missing"),
            );
            return;
        };

        match self.sink.on_submit(&form_id, &values).await {
            Ok(()) => {
                self.drafts.remove(&form_id);
                self.close_form();
                self.state
                    .set_status(StatusKind::Success, format!("{title} submitted"));
            }
            Err(e) => {
                tracing::error!("Failed to submit {form_id}: {e:#}");
                self.state
                    .set_status(StatusKind::Error, format!("Failed to submit: {e}"));
            }
        }
    }

    /// Whether the open form holds edits that are neither initial nor saved
    fn has_unsaved_changes(&self) -> bool {
        let Some(session) = self.session.as_ref() else {
            return false;
        };
        let controller = &session.controller;
        controller.is_dirty()
            && self.drafts.get(&controller.schema().id) != Some(&controller.state().values)
    }

    /// Leave the form, asking once for confirmation when edits would be lost
    fn cancel_form(&mut self) {
        if self.has_unsaved_changes()
            && self.config.confirm_discard()
            && !self.state.discard_pending
        {
            self.state.discard_pending = true;
            self.state.set_status(
                StatusKind::Info,
                "Unsaved changes. Press Esc again to discard them",
            );
            return;
        }
        self.close_form();
    }
}
