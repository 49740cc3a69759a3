//! Field and form validation
//!
//! Rules run in a fixed order (required, min, max, pattern) and only the
//! first failure is reported. The whole-form pass re-checks `required` only;
//! range and pattern rules are enforced per field when it is blurred.

use super::value::{is_empty_value, FieldValue, FieldValues};
use crate::schema::{FieldType, FormField, FormSchema};
use regex::{Regex, RegexBuilder};
use std::collections::BTreeMap;
use thiserror::Error;

/// Field id → message for every field currently judged invalid
pub type FieldErrors = BTreeMap<String, String>;

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Validate one field against a candidate value.
///
/// Ids the schema does not declare are always valid.
pub fn validate_field(
    schema: &FormSchema,
    field_id: &str,
    value: Option<&FieldValue>,
) -> Result<(), ValidationError> {
    match schema.field(field_id) {
        Some(field) => check_field(field, value),
        None => Ok(()),
    }
}

/// Required-only pass over every declared field
pub fn validate_form(schema: &FormSchema, values: &FieldValues) -> FieldErrors {
    schema
        .fields
        .iter()
        .filter_map(|field| {
            check_required(field, values.get(&field.id))
                .err()
                .map(|e| (field.id.clone(), e.message))
        })
        .collect()
}

/// Whether a required field counts as unanswered.
///
/// Checkboxes must be explicitly `true`; every other type uses the shared
/// emptiness test.
pub fn is_unanswered(field: &FormField, value: Option<&FieldValue>) -> bool {
    match field.field_type {
        FieldType::Checkbox => !matches!(value, Some(FieldValue::Bool(true))),
        _ => is_empty_value(value),
    }
}

fn check_required(field: &FormField, value: Option<&FieldValue>) -> Result<(), ValidationError> {
    if field.required && is_unanswered(field, value) {
        return Err(ValidationError::new(format!("{} is required", field.label)));
    }
    Ok(())
}

fn check_field(field: &FormField, value: Option<&FieldValue>) -> Result<(), ValidationError> {
    check_required(field, value)?;

    let Some(rule) = &field.validation else {
        return Ok(());
    };
    let fail = |default: String| ValidationError::new(rule.message.clone().unwrap_or(default));

    // A missing value or non-numeric text has no number and passes both bounds
    let number = value.and_then(FieldValue::as_number);
    if let (Some(min), Some(n)) = (rule.min, number) {
        if n < min {
            return Err(fail(format!("Minimum value is {}", FieldValue::Number(min))));
        }
    }
    if let (Some(max), Some(n)) = (rule.max, number) {
        if n > max {
            return Err(fail(format!("Maximum value is {}", FieldValue::Number(max))));
        }
    }

    if let Some(pattern) = &rule.pattern {
        match compile_pattern(pattern) {
            Ok(re) => {
                if !re.is_match(&stringify(value)) {
                    return Err(fail("Invalid format".to_string()));
                }
            }
            Err(e) => {
                tracing::warn!("Skipping invalid pattern on field {}: {e}", field.id);
            }
        }
    }

    Ok(())
}

/// Text a pattern is tested against; a missing value reads as `undefined`
fn stringify(value: Option<&FieldValue>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => "undefined".to_string(),
    }
}

/// Compile a rule pattern with ASCII-only `\d`, `\w` and `\b`.
///
/// The regex crate reads these classes as Unicode; rule patterns are
/// written for ASCII digits and word characters.
pub fn compile_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&ascii_classes(pattern)).build()
}

fn ascii_classes(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    let mut in_class = false;
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let Some(next) = chars.next() else {
                    out.push(c);
                    break;
                };
                let replacement = match (in_class, next) {
                    (false, 'd') => "[0-9]",
                    (false, 'D') => "[^0-9]",
                    (false, 'w') => "[0-9A-Za-z_]",
                    (false, 'W') => "[^0-9A-Za-z_]",
                    (false, 'b') => "(?-u:\\b)",
                    (false, 'B') => "(?-u:\\B)",
                    (true, 'd') => "[:digit:]",
                    (true, 'D') => "[:^digit:]",
                    (true, 'w') => "[:word:]",
                    (true, 'W') => "[:^word:]",
                    // Inside a class `\b` is a backspace
                    (true, 'b') => "\\x08",
                    _ => {
                        out.push(c);
                        out.push(next);
                        continue;
                    }
                };
                out.push_str(replacement);
            }
            '[' if !in_class => {
                in_class = true;
                out.push(c);
            }
            ']' if in_class => {
                in_class = false;
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}
