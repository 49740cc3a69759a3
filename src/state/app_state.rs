//! Application state definitions

use crate::schema::FormCategory;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Catalog,
    Form,
}

/// Tone of a status bar message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

/// One-line feedback shown in the status bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    pub current_view: View,

    // Catalog browsing
    pub category_index: usize,
    pub selected_index: usize,

    pub status_message: Option<StatusMessage>,
    /// Esc was pressed once on a dirty form
    pub discard_pending: bool,
}

impl AppState {
    /// Category tab currently selected
    pub fn category(&self) -> FormCategory {
        FormCategory::ALL[self.category_index % FormCategory::ALL.len()]
    }

    /// Select a category tab and start at its first form
    pub fn select_category(&mut self, category: FormCategory) {
        self.category_index = FormCategory::ALL
            .iter()
            .position(|c| *c == category)
            .unwrap_or(0);
        self.reset_selection();
    }

    pub fn next_category(&mut self) {
        self.category_index = (self.category_index + 1) % FormCategory::ALL.len();
        self.reset_selection();
    }

    pub fn prev_category(&mut self) {
        if self.category_index == 0 {
            self.category_index = FormCategory::ALL.len() - 1;
        } else {
            self.category_index -= 1;
        }
        self.reset_selection();
    }

    /// Move selection down
    pub fn move_selection_down(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Reset selection
    pub fn reset_selection(&mut self) {
        self.selected_index = 0;
    }

    pub fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_view_is_catalog() {
        let state = AppState::default();
        assert_eq!(state.current_view, View::Catalog);
        assert_eq!(state.category(), FormCategory::Income);
    }

    #[test]
    fn test_category_cycle_wraps_and_resets_selection() {
        let mut state = AppState::default();
        state.selected_index = 2;
        state.prev_category();
        assert_eq!(state.category(), FormCategory::Business);
        assert_eq!(state.selected_index, 0);
        state.next_category();
        assert_eq!(state.category(), FormCategory::Income);
    }

    #[test]
    fn test_select_category() {
        let mut state = AppState::default();
        state.select_category(FormCategory::Authorization);
        assert_eq!(state.category(), FormCategory::Authorization);
    }

    #[test]
    fn test_selection_bounds() {
        let mut state = AppState::default();
        state.move_selection_up();
        assert_eq!(state.selected_index, 0);
        state.move_selection_down(2);
        state.move_selection_down(2);
        assert_eq!(state.selected_index, 1);
        state.move_selection_down(0);
        assert_eq!(state.selected_index, 1);
    }

    #[test]
    fn test_status_message() {
        let mut state = AppState::default();
        state.set_status(StatusKind::Error, "Nope");
        assert_eq!(state.status_message.as_ref().unwrap().kind, StatusKind::Error);
        state.clear_status();
        assert!(state.status_message.is_none());
    }
}
