//! Completion ratio of a form

use super::validation::is_unanswered;
use super::value::FieldValues;
use crate::schema::{FormField, FormSchema, FormSection};

/// Percentage of declared fields that are answered, judged the same way as
/// `required` (a checkbox only counts once ticked).
///
/// A schema with no fields is 0% complete.
pub fn progress(schema: &FormSchema, values: &FieldValues) -> f64 {
    ratio(schema.fields.iter(), values)
}

/// Percentage for the fields of one section
pub fn section_progress(schema: &FormSchema, section: &FormSection, values: &FieldValues) -> f64 {
    ratio(
        section.field_ids.iter().filter_map(|id| schema.field(id)),
        values,
    )
}

fn ratio<'a>(fields: impl Iterator<Item = &'a FormField>, values: &FieldValues) -> f64 {
    let (filled, total) = fields.fold((0usize, 0usize), |(filled, total), field| {
        let filled = filled + usize::from(!is_unanswered(field, values.get(&field.id)));
        (filled, total + 1)
    });
    if total == 0 {
        return 0.0;
    }
    100.0 * filled as f64 / total as f64
}
