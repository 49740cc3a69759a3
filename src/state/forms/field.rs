//! Per-type controls and the edits they accept

use crate::engine::FieldValue;
use crate::schema::{FieldType, FormField, SelectOption};

/// Kind of control a field type is presented with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Single-line free text
    TextInput,
    /// Single-line input restricted to numeric characters
    NumericInput,
    /// Digits only; separators come from the mask
    MaskedInput,
    TextArea,
    Checkbox,
    Select,
}

impl Control {
    pub fn for_type(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Text | FieldType::Email | FieldType::Phone | FieldType::Date => {
                Control::TextInput
            }
            FieldType::Currency | FieldType::Number => Control::NumericInput,
            FieldType::Ssn | FieldType::Ein => Control::MaskedInput,
            FieldType::Textarea => Control::TextArea,
            FieldType::Checkbox => Control::Checkbox,
            FieldType::Select => Control::Select,
        }
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self, Control::TextArea)
    }
}

/// A keystroke-level edit routed to the focused field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEdit {
    Insert(char),
    Backspace,
    Newline,
    Toggle,
    NextOption,
    PrevOption,
    Clear,
}

/// Raw value an edit produces from the current stored value.
///
/// Returns `None` when the control ignores the edit. The result still goes
/// through the controller's formatter before it is stored.
pub fn apply_edit(
    field: &FormField,
    current: Option<&FieldValue>,
    edit: FieldEdit,
) -> Option<FieldValue> {
    let control = Control::for_type(field.field_type);
    let text = current.map(FieldValue::as_text).unwrap_or("");

    match (control, edit) {
        (_, FieldEdit::Clear) => Some(match control {
            Control::Checkbox => FieldValue::Bool(false),
            _ => FieldValue::text(""),
        }),
        (Control::Checkbox, FieldEdit::Toggle | FieldEdit::Insert(' ')) => {
            let checked = current.and_then(FieldValue::as_bool).unwrap_or(false);
            Some(FieldValue::Bool(!checked))
        }
        (Control::Checkbox, _) => None,
        (Control::Select, FieldEdit::NextOption | FieldEdit::Insert(' ')) => {
            cycle_option(field.options(), text, 1).map(FieldValue::text)
        }
        (Control::Select, FieldEdit::PrevOption) => {
            cycle_option(field.options(), text, -1).map(FieldValue::text)
        }
        (Control::Select, _) => None,
        (Control::NumericInput, FieldEdit::Insert(c))
            if !(c.is_ascii_digit() || matches!(c, '.' | '-' | ',')) =>
        {
            None
        }
        (Control::MaskedInput, FieldEdit::Insert(c)) if !c.is_ascii_digit() => None,
        (Control::TextArea, FieldEdit::Newline) => Some(FieldValue::text(format!("{text}\n"))),
        (_, FieldEdit::Insert(c)) => Some(FieldValue::text(format!("{text}{c}"))),
        (_, FieldEdit::Backspace) => {
            let mut next = text.to_string();
            next.pop();
            Some(FieldValue::text(next))
        }
        (
            Control::TextInput | Control::NumericInput | Control::MaskedInput | Control::TextArea,
            FieldEdit::Newline | FieldEdit::Toggle | FieldEdit::NextOption | FieldEdit::PrevOption,
        ) => None,
    }
}

/// Step through declared options only; an unset or stale value starts at the
/// first (forward) or last (backward) option
fn cycle_option(options: &[SelectOption], current: &str, step: isize) -> Option<String> {
    if options.is_empty() {
        return None;
    }
    let len = options.len() as isize;
    let next = match options.iter().position(|o| o.value == current) {
        Some(i) => (i as isize + step).rem_euclid(len),
        None if step > 0 => 0,
        None => len - 1,
    };
    Some(options[next as usize].value.clone())
}

/// Text shown for a stored value
pub fn display_value(field: &FormField, value: Option<&FieldValue>) -> String {
    match (Control::for_type(field.field_type), value) {
        (Control::Checkbox, v) => {
            let checked = v.and_then(FieldValue::as_bool).unwrap_or(false);
            let mark = if checked { "[x]" } else { "[ ]" };
            mark.to_string()
        }
        (Control::Select, Some(v)) => field
            .options()
            .iter()
            .find(|o| o.value == v.as_text())
            .map(|o| o.label.clone())
            .unwrap_or_default(),
        (_, None | Some(FieldValue::Null)) => String::new(),
        (_, Some(v)) => v.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(field_type: FieldType) -> FormField {
        FormField::new("f", "F", field_type)
    }

    fn status() -> FormField {
        FormField::select(
            "status",
            "Status",
            vec![
                SelectOption::new("single", "Single"),
                SelectOption::new("joint", "Married filing jointly"),
                SelectOption::new("head", "Head of household"),
            ],
        )
    }

    mod control_dispatch {
        use super::*;

        #[test]
        fn test_every_type_has_a_control() {
            assert_eq!(Control::for_type(FieldType::Ssn), Control::MaskedInput);
            assert_eq!(Control::for_type(FieldType::Ein), Control::MaskedInput);
            assert_eq!(Control::for_type(FieldType::Currency), Control::NumericInput);
            assert_eq!(Control::for_type(FieldType::Textarea), Control::TextArea);
            assert_eq!(Control::for_type(FieldType::Checkbox), Control::Checkbox);
            assert_eq!(Control::for_type(FieldType::Select), Control::Select);
            assert_eq!(Control::for_type(FieldType::Email), Control::TextInput);
        }

        #[test]
        fn test_only_textarea_is_multiline() {
            assert!(Control::TextArea.is_multiline());
            assert!(!Control::TextInput.is_multiline());
        }
    }

    mod text_edits {
        use super::*;

        #[test]
        fn test_insert_and_backspace() {
            let f = field(FieldType::Text);
            let v = apply_edit(&f, None, FieldEdit::Insert('a')).unwrap();
            assert_eq!(v, FieldValue::text("a"));
            let v = apply_edit(&f, Some(&v), FieldEdit::Insert('b')).unwrap();
            assert_eq!(v, FieldValue::text("ab"));
            let v = apply_edit(&f, Some(&v), FieldEdit::Backspace).unwrap();
            assert_eq!(v, FieldValue::text("a"));
        }

        #[test]
        fn test_newline_only_in_textarea() {
            let current = FieldValue::text("line");
            assert_eq!(
                apply_edit(&field(FieldType::Textarea), Some(&current), FieldEdit::Newline),
                Some(FieldValue::text("line\n"))
            );
            assert_eq!(
                apply_edit(&field(FieldType::Text), Some(&current), FieldEdit::Newline),
                None
            );
        }

        #[test]
        fn test_numeric_input_rejects_letters() {
            let f = field(FieldType::Currency);
            assert_eq!(apply_edit(&f, None, FieldEdit::Insert('x')), None);
            assert_eq!(
                apply_edit(&f, None, FieldEdit::Insert('7')),
                Some(FieldValue::text("7"))
            );
        }

        #[test]
        fn test_masked_input_accepts_digits_only() {
            let f = field(FieldType::Ssn);
            let current = FieldValue::text("123-4");
            assert_eq!(apply_edit(&f, Some(&current), FieldEdit::Insert('-')), None);
            assert_eq!(
                apply_edit(&f, Some(&current), FieldEdit::Insert('5')),
                Some(FieldValue::text("123-45"))
            );
        }

        #[test]
        fn test_clear() {
            let current = FieldValue::text("abc");
            assert_eq!(
                apply_edit(&field(FieldType::Text), Some(&current), FieldEdit::Clear),
                Some(FieldValue::text(""))
            );
        }
    }

    mod checkbox {
        use super::*;

        #[test]
        fn test_toggle_from_unset() {
            let f = field(FieldType::Checkbox);
            assert_eq!(
                apply_edit(&f, None, FieldEdit::Toggle),
                Some(FieldValue::Bool(true))
            );
            assert_eq!(
                apply_edit(&f, Some(&FieldValue::Bool(true)), FieldEdit::Insert(' ')),
                Some(FieldValue::Bool(false))
            );
        }

        #[test]
        fn test_ignores_text_edits() {
            let f = field(FieldType::Checkbox);
            assert_eq!(apply_edit(&f, None, FieldEdit::Insert('y')), None);
            assert_eq!(apply_edit(&f, None, FieldEdit::Backspace), None);
        }

        #[test]
        fn test_display() {
            let f = field(FieldType::Checkbox);
            assert_eq!(display_value(&f, None), "[ ]");
            assert_eq!(display_value(&f, Some(&FieldValue::Bool(true))), "[x]");
        }
    }

    mod select {
        use super::*;

        #[test]
        fn test_next_starts_at_first_option() {
            assert_eq!(
                apply_edit(&status(), None, FieldEdit::NextOption),
                Some(FieldValue::text("single"))
            );
        }

        #[test]
        fn test_prev_starts_at_last_option() {
            assert_eq!(
                apply_edit(&status(), None, FieldEdit::PrevOption),
                Some(FieldValue::text("head"))
            );
        }

        #[test]
        fn test_cycles_and_wraps() {
            let head = FieldValue::text("head");
            assert_eq!(
                apply_edit(&status(), Some(&head), FieldEdit::NextOption),
                Some(FieldValue::text("single"))
            );
            let single = FieldValue::text("single");
            assert_eq!(
                apply_edit(&status(), Some(&single), FieldEdit::PrevOption),
                Some(FieldValue::text("head"))
            );
        }

        #[test]
        fn test_never_offers_an_implicit_none() {
            let mut current = None;
            for _ in 0..6 {
                let next = apply_edit(&status(), current.as_ref(), FieldEdit::NextOption).unwrap();
                assert!(status().options().iter().any(|o| o.value == next.as_text()));
                current = Some(next);
            }
        }

        #[test]
        fn test_display_uses_label() {
            let joint = FieldValue::text("joint");
            assert_eq!(display_value(&status(), Some(&joint)), "Married filing jointly");
            assert_eq!(display_value(&status(), None), "");
        }
    }
}
