//! Form state controller
//!
//! Owns the values/errors/touched bundle of one open form. Editing a field
//! clears its error without re-validating; errors are recomputed on blur
//! (`mark_touched`) and on `validate_all`. Errors of untouched fields are
//! kept but never surfaced.

use crate::engine::{
    format_value, progress, validate_field, validate_form, FieldErrors, FieldValue, FieldValues,
};
use crate::schema::{FieldType, FormSchema};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Mutable session state of one in-progress form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormInstanceState {
    pub values: FieldValues,
    pub errors: FieldErrors,
    pub touched: BTreeSet<String>,
}

/// The single writer of a [`FormInstanceState`]
#[derive(Debug, Clone)]
pub struct FormController {
    schema: Arc<FormSchema>,
    initial: FieldValues,
    state: FormInstanceState,
}

impl FormController {
    /// Open an empty form. Text-like fields start as an empty string, the
    /// way a blank input reads; checkboxes stay unset.
    pub fn new(schema: Arc<FormSchema>) -> Self {
        let blank = schema
            .fields
            .iter()
            .filter(|field| field.field_type != FieldType::Checkbox)
            .map(|field| (field.id.clone(), FieldValue::text("")))
            .collect();
        Self::with_values(schema, blank)
    }

    /// Open a form pre-populated with caller data, stored as given
    pub fn with_values(schema: Arc<FormSchema>, initial: FieldValues) -> Self {
        Self {
            schema,
            state: FormInstanceState {
                values: initial.clone(),
                ..Default::default()
            },
            initial,
        }
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn state(&self) -> &FormInstanceState {
        &self.state
    }

    pub fn value(&self, field_id: &str) -> Option<&FieldValue> {
        self.state.values.get(field_id)
    }

    pub fn is_touched(&self, field_id: &str) -> bool {
        self.state.touched.contains(field_id)
    }

    /// Store an edit after masking, and drop the field's current error
    pub fn set_value(&mut self, field_id: &str, value: FieldValue) {
        let stored = match self.schema.field(field_id) {
            Some(field) => format_value(field.field_type, value),
            None => value,
        };
        tracing::debug!("{}: set {field_id}", self.schema.id);
        self.state.values.insert(field_id.to_string(), stored);
        self.state.errors.remove(field_id);
    }

    /// Blur: remember the field was visited and re-validate it
    pub fn mark_touched(&mut self, field_id: &str) {
        self.state.touched.insert(field_id.to_string());
        match validate_field(&self.schema, field_id, self.state.values.get(field_id)) {
            Ok(()) => {
                self.state.errors.remove(field_id);
            }
            Err(e) => {
                tracing::debug!("{}: {field_id} invalid: {e}", self.schema.id);
                self.state.errors.insert(field_id.to_string(), e.message);
            }
        }
    }

    /// Replace all errors with the required-only form pass.
    /// Returns whether the form can be submitted.
    pub fn validate_all(&mut self) -> bool {
        self.state.errors = validate_form(&self.schema, &self.state.values);
        self.state.errors.is_empty()
    }

    /// Error for a field, only once the field has been touched
    pub fn visible_error(&self, field_id: &str) -> Option<&str> {
        if !self.is_touched(field_id) {
            return None;
        }
        self.state.errors.get(field_id).map(String::as_str)
    }

    /// Snapshot of the stored values
    pub fn save(&self) -> FieldValues {
        tracing::info!("{}: saving {} values", self.schema.id, self.state.values.len());
        self.state.values.clone()
    }

    /// Snapshot of the stored values if the form validates, `None` otherwise
    pub fn submit(&mut self) -> Option<FieldValues> {
        if !self.validate_all() {
            tracing::warn!(
                "{}: submit blocked by {} invalid fields",
                self.schema.id,
                self.state.errors.len()
            );
            return None;
        }
        tracing::info!("{}: submitted", self.schema.id);
        Some(self.state.values.clone())
    }

    /// Back to the values the form was opened with
    pub fn reset(&mut self) {
        self.state = FormInstanceState {
            values: self.initial.clone(),
            ..Default::default()
        };
    }

    /// Whether values differ from those the form was opened with
    pub fn is_dirty(&self) -> bool {
        self.state.values != self.initial
    }

    /// Number of errors currently held, surfaced or not
    pub fn error_count(&self) -> usize {
        self.state.errors.len()
    }

    pub fn progress(&self) -> f64 {
        progress(&self.schema, &self.state.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FormCategory, FormField};

    fn schema() -> Arc<FormSchema> {
        Arc::new(FormSchema {
            id: "w9".to_string(),
            title: "W-9".to_string(),
            category: FormCategory::Business,
            description: String::new(),
            reference_link: None,
            fields: vec![
                FormField::new("name", "Name", FieldType::Text).required(),
                FormField::new("ssn", "SSN", FieldType::Ssn)
                    .pattern(r"^\d{3}-\d{2}-\d{4}$", "Enter a 9-digit SSN"),
                FormField::new("ein", "EIN", FieldType::Ein),
                FormField::new("agree", "Agreement", FieldType::Checkbox).required(),
            ],
            sections: None,
        })
    }

    fn text(s: &str) -> FieldValue {
        FieldValue::text(s)
    }

    mod set_value {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_masks_before_storing() {
            let mut form = FormController::new(schema());
            form.set_value("ssn", text("123456789"));
            form.set_value("ein", text("123456789"));
            assert_eq!(form.value("ssn"), Some(&text("123-45-6789")));
            assert_eq!(form.value("ein"), Some(&text("12-3456789")));
        }

        #[test]
        fn test_idempotent_for_formatted_value() {
            let mut form = FormController::new(schema());
            form.set_value("ssn", text("123-45-6789"));
            let first = form.value("ssn").cloned();
            form.set_value("ssn", text("123-45-6789"));
            assert_eq!(form.value("ssn").cloned(), first);
        }

        #[test]
        fn test_clears_error_but_keeps_touched() {
            let mut form = FormController::new(schema());
            form.mark_touched("name");
            assert_eq!(form.visible_error("name"), Some("Name is required"));

            // Still invalid, but edits never re-validate
            form.set_value("name", text(""));
            assert_eq!(form.visible_error("name"), None);
            assert!(form.is_touched("name"));
        }

        #[test]
        fn test_unknown_field_stored_as_is() {
            let mut form = FormController::new(schema());
            form.set_value("extra", text("123456789"));
            assert_eq!(form.value("extra"), Some(&text("123456789")));
        }
    }

    mod touched_gating {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_untouched_invalid_field_hides_error() {
            let mut form = FormController::new(schema());
            form.set_value("ssn", text("12"));
            assert!(!form.validate_all());
            assert_eq!(form.visible_error("name"), None);
            assert!(form.state().errors.contains_key("name"));
        }

        #[test]
        fn test_blur_surfaces_error() {
            let mut form = FormController::new(schema());
            form.set_value("ssn", text("12"));
            assert_eq!(form.visible_error("ssn"), None);
            form.mark_touched("ssn");
            assert_eq!(form.visible_error("ssn"), Some("Enter a 9-digit SSN"));
        }

        #[test]
        fn test_blur_on_valid_field_removes_error() {
            let mut form = FormController::new(schema());
            form.mark_touched("name");
            form.set_value("name", text("Ada"));
            form.mark_touched("name");
            assert_eq!(form.visible_error("name"), None);
            assert_eq!(form.error_count(), 0);
        }

        #[test]
        fn test_validate_all_surfaces_only_touched_fields() {
            let mut form = FormController::new(schema());
            form.mark_touched("name");
            form.set_value("name", text(""));
            assert!(!form.validate_all());
            assert_eq!(form.visible_error("name"), Some("Name is required"));
            assert_eq!(form.visible_error("agree"), None);
        }
    }

    mod submission {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_submit_blocked_when_required_missing() {
            let mut form = FormController::new(schema());
            form.set_value("agree", FieldValue::Bool(true));
            assert_eq!(form.submit(), None);
            assert_eq!(
                form.state().errors.get("name").map(String::as_str),
                Some("Name is required")
            );
            assert_eq!(form.visible_error("name"), None);
        }

        #[test]
        fn test_submit_ignores_pattern_rules() {
            let mut form = FormController::new(schema());
            form.set_value("name", text("Ada"));
            form.set_value("ssn", text("12"));
            form.set_value("agree", FieldValue::Bool(true));
            let submitted = form.submit().unwrap();
            assert_eq!(submitted.get("ssn"), Some(&text("12")));
        }

        #[test]
        fn test_unchecked_required_box_blocks_submit() {
            let mut form = FormController::new(schema());
            form.set_value("name", text("Ada"));
            form.set_value("agree", FieldValue::Bool(false));
            assert!(form.submit().is_none());
        }

        #[test]
        fn test_save_round_trips_through_reopen() {
            let mut form = FormController::new(schema());
            form.set_value("name", text("Ada"));
            form.set_value("ssn", text("123456789"));
            form.set_value("agree", FieldValue::Bool(false));
            let snapshot = form.save();

            let reopened = FormController::with_values(schema(), snapshot.clone());
            assert_eq!(reopened.state().values, snapshot);
            assert_eq!(reopened.save(), form.save());
        }
    }

    mod lifecycle {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_reset_restores_initial_values() {
            let mut initial = FieldValues::new();
            initial.insert("name".to_string(), text("Ada"));
            let mut form = FormController::with_values(schema(), initial.clone());

            form.set_value("name", text(""));
            form.mark_touched("name");
            assert!(form.is_dirty());

            form.reset();
            assert_eq!(form.state().values, initial);
            assert!(form.state().errors.is_empty());
            assert!(form.state().touched.is_empty());
            assert!(!form.is_dirty());
        }

        #[test]
        fn test_new_form_starts_blank() {
            let form = FormController::new(schema());
            assert_eq!(form.value("name"), Some(&text("")));
            assert_eq!(form.value("ein"), Some(&text("")));
            assert_eq!(form.value("agree"), None);
            assert!(!form.is_dirty());
        }

        #[test]
        fn test_blank_optional_pattern_field_fails_blur() {
            let mut form = FormController::new(schema());
            form.mark_touched("ssn");
            assert_eq!(form.visible_error("ssn"), Some("Enter a 9-digit SSN"));
        }

        #[test]
        fn test_progress_tracks_values() {
            let mut form = FormController::new(schema());
            assert_eq!(form.progress(), 0.0);
            form.set_value("name", text("Ada"));
            form.set_value("agree", FieldValue::Bool(false));
            assert_eq!(form.progress(), 25.0);
            form.set_value("agree", FieldValue::Bool(true));
            assert_eq!(form.progress(), 50.0);
        }
    }
}
