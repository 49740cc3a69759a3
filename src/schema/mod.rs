//! Form schema layer
//!
//! - `model`: declarative schema types
//! - `registry`: immutable schema lookup
//! - `catalog`: the built-in IRS forms

mod catalog;
mod model;
mod registry;

pub use catalog::builtin_registry;
pub use model::{
    FieldType, FormCategory, FormField, FormSchema, FormSection, SelectOption, ValidationRule,
};
pub use registry::SchemaRegistry;
