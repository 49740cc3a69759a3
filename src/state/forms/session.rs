//! Focus and action handling around a form controller

use super::field::{apply_edit, Control, FieldEdit};
use super::form_state::FormController;
use crate::schema::FormField;

/// Buttons on the actions row, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Submit,
    Save,
    Reset,
    Cancel,
}

impl FormAction {
    pub const ALL: [FormAction; 4] = [
        FormAction::Submit,
        FormAction::Save,
        FormAction::Reset,
        FormAction::Cancel,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Submit => "Submit",
            Self::Save => "Save Draft",
            Self::Reset => "Reset",
            Self::Cancel => "Cancel",
        }
    }
}

/// An open form as the terminal presents it: the controller plus which
/// field (or the actions row) has focus
#[derive(Debug, Clone)]
pub struct FormSession {
    pub controller: FormController,
    /// Focusable field ids in layout order
    field_order: Vec<String>,
    /// Index into `field_order`; `field_order.len()` is the actions row
    active_index: usize,
    pub selected_action: usize,
}

impl FormSession {
    pub fn new(controller: FormController) -> Self {
        let mut field_order: Vec<String> = Vec::new();
        for (_, fields) in controller.schema().groups() {
            for field in fields {
                if !field_order.contains(&field.id) {
                    field_order.push(field.id.clone());
                }
            }
        }
        Self {
            controller,
            field_order,
            active_index: 0,
            selected_action: 0,
        }
    }

    /// Focus positions, counting the actions row
    pub fn position_count(&self) -> usize {
        self.field_order.len() + 1
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn is_actions_row_active(&self) -> bool {
        self.active_index == self.field_order.len()
    }

    pub fn active_field(&self) -> Option<&FormField> {
        self.field_order
            .get(self.active_index)
            .and_then(|id| self.controller.schema().field(id))
    }

    pub fn is_active(&self, field_id: &str) -> bool {
        self.field_order.get(self.active_index).map(String::as_str) == Some(field_id)
    }

    pub fn is_active_field_multiline(&self) -> bool {
        self.active_field()
            .is_some_and(|f| Control::for_type(f.field_type).is_multiline())
    }

    /// Move focus, blurring the field being left
    pub fn focus(&mut self, index: usize) {
        let index = index.min(self.position_count() - 1);
        if index == self.active_index {
            return;
        }
        self.blur_active();
        self.active_index = index;
    }

    pub fn next_field(&mut self) {
        let count = self.position_count();
        self.focus((self.active_index + 1) % count);
    }

    pub fn prev_field(&mut self) {
        let count = self.position_count();
        if self.active_index == 0 {
            self.focus(count - 1);
        } else {
            self.focus(self.active_index - 1);
        }
    }

    /// Blur the focused field without moving focus
    pub fn blur_active(&mut self) {
        if let Some(id) = self.field_order.get(self.active_index).cloned() {
            self.controller.mark_touched(&id);
        }
    }

    /// Route an edit to the focused field. Returns whether a value changed.
    pub fn apply(&mut self, edit: FieldEdit) -> bool {
        let Some(field) = self.active_field() else {
            return false;
        };
        let id = field.id.clone();
        match apply_edit(field, self.controller.value(&id), edit) {
            Some(value) => {
                self.controller.set_value(&id, value);
                true
            }
            None => false,
        }
    }

    pub fn selected_action(&self) -> FormAction {
        FormAction::ALL[self.selected_action % FormAction::ALL.len()]
    }

    /// Move to the next button (wraps around)
    pub fn next_action(&mut self) {
        self.selected_action = (self.selected_action + 1) % FormAction::ALL.len();
    }

    /// Move to the previous button (wraps around)
    pub fn prev_action(&mut self) {
        if self.selected_action == 0 {
            self.selected_action = FormAction::ALL.len() - 1;
        } else {
            self.selected_action -= 1;
        }
    }

    /// Focus the first field holding an error, surfaced or not.
    /// Returns whether such a field exists.
    pub fn focus_first_invalid(&mut self) -> bool {
        let errors = &self.controller.state().errors;
        let first = self.field_order.iter().position(|id| errors.contains_key(id));
        match first {
            Some(index) => {
                self.focus(index);
                true
            }
            None => false,
        }
    }
}
