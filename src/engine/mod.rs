//! Form engine
//!
//! Pure functions over a schema and a values snapshot:
//! - `value`: stored field values and the shared emptiness test
//! - `validation`: per-field and whole-form rules
//! - `format`: masked input (SSN/EIN)
//! - `progress`: completion ratio

mod format;
mod progress;
mod validation;
mod value;

pub use format::format_value;
pub use progress::{progress, section_progress};
pub use validation::{compile_pattern, validate_field, validate_form, FieldErrors};
pub use value::{FieldValue, FieldValues};
