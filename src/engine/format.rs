//! Keystroke formatting for masked field types

use super::value::FieldValue;
use crate::schema::FieldType;

const SSN_DIGITS: usize = 9;
const EIN_DIGITS: usize = 9;

/// Transform an edited value into its stored form.
///
/// Only text values of masked types change; everything else is stored as
/// entered and coerced later by whoever consumes it.
pub fn format_value(field_type: FieldType, value: FieldValue) -> FieldValue {
    match (field_type, value) {
        (FieldType::Ssn, FieldValue::Text(raw)) => FieldValue::Text(format_ssn(&raw)),
        (FieldType::Ein, FieldValue::Text(raw)) => FieldValue::Text(format_ein(&raw)),
        (
            FieldType::Text
            | FieldType::Currency
            | FieldType::Number
            | FieldType::Checkbox
            | FieldType::Date
            | FieldType::Email
            | FieldType::Ssn
            | FieldType::Ein
            | FieldType::Phone
            | FieldType::Select
            | FieldType::Textarea,
            value,
        ) => value,
    }
}

/// `DDD-DD-DDDD`, built up as digits arrive
pub fn format_ssn(raw: &str) -> String {
    let digits = digits_only(raw, SSN_DIGITS);
    match digits.len() {
        0..=3 => digits,
        4..=5 => format!("{}-{}", &digits[..3], &digits[3..]),
        _ => format!("{}-{}-{}", &digits[..3], &digits[3..5], &digits[5..]),
    }
}

/// `DD-DDDDDDD`, built up as digits arrive
pub fn format_ein(raw: &str) -> String {
    let digits = digits_only(raw, EIN_DIGITS);
    match digits.len() {
        0..=2 => digits,
        _ => format!("{}-{}", &digits[..2], &digits[2..]),
    }
}

fn digits_only(raw: &str, limit: usize) -> String {
    raw.chars().filter(char::is_ascii_digit).take(limit).collect()
}
