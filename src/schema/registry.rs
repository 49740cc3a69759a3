//! Immutable catalog of form schemas

use super::model::{FieldType, FormCategory, FormSchema};
use crate::engine::compile_pattern;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use thiserror::Error;

/// Schema authoring defects rejected at registration
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("form id '{0}' is registered more than once")]
    DuplicateFormId(String),

    #[error("form '{form}' declares field '{field}' more than once")]
    DuplicateFieldId { form: String, field: String },

    #[error("select field '{field}' in form '{form}' has no options")]
    EmptySelectOptions { form: String, field: String },

    #[error("section '{section}' in form '{form}' references unknown field '{field}'")]
    UnknownSectionField {
        form: String,
        section: String,
        field: String,
    },

    #[error("field '{field}' in form '{form}' has an invalid pattern: {source}")]
    InvalidPattern {
        form: String,
        field: String,
        #[source]
        source: regex::Error,
    },

    #[error("field '{field}' in form '{form}' has min greater than max")]
    InvalidRange { form: String, field: String },
}

/// Read-only lookup over registered schemas.
///
/// Schemas are shared behind `Arc` so any number of open forms can hold one
/// without copying; nothing mutates them after construction.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: Vec<Arc<FormSchema>>,
    index: HashMap<String, usize>,
}

impl SchemaRegistry {
    /// Build a registry, rejecting the whole catalog on the first defect
    pub fn new(schemas: Vec<FormSchema>) -> Result<Self, SchemaError> {
        let mut registry = Self::default();
        for schema in schemas {
            check_schema(&schema)?;
            if registry.index.contains_key(&schema.id) {
                return Err(SchemaError::DuplicateFormId(schema.id));
            }
            registry
                .index
                .insert(schema.id.clone(), registry.schemas.len());
            registry.schemas.push(Arc::new(schema));
        }
        tracing::debug!("Registered {} form schemas", registry.schemas.len());
        Ok(registry)
    }

    /// Exact, case-sensitive lookup
    pub fn get(&self, id: &str) -> Option<Arc<FormSchema>> {
        self.index.get(id).map(|&i| Arc::clone(&self.schemas[i]))
    }

    /// Schemas of one category in registration order
    pub fn by_category(&self, category: FormCategory) -> Vec<Arc<FormSchema>> {
        self.schemas
            .iter()
            .filter(|s| s.category == category)
            .cloned()
            .collect()
    }

    /// Every schema in registration order
    pub fn all(&self) -> &[Arc<FormSchema>] {
        &self.schemas
    }
}

fn check_schema(schema: &FormSchema) -> Result<(), SchemaError> {
    let mut ids = HashSet::new();
    for field in &schema.fields {
        if !ids.insert(field.id.as_str()) {
            return Err(SchemaError::DuplicateFieldId {
                form: schema.id.clone(),
                field: field.id.clone(),
            });
        }

        if field.field_type == FieldType::Select && field.options().is_empty() {
            return Err(SchemaError::EmptySelectOptions {
                form: schema.id.clone(),
                field: field.id.clone(),
            });
        }

        if let Some(rule) = &field.validation {
            if let Some(pattern) = &rule.pattern {
                compile_pattern(pattern).map_err(|source| SchemaError::InvalidPattern {
                    form: schema.id.clone(),
                    field: field.id.clone(),
                    source,
                })?;
            }
            if let (Some(min), Some(max)) = (rule.min, rule.max) {
                if min > max {
                    return Err(SchemaError::InvalidRange {
                        form: schema.id.clone(),
                        field: field.id.clone(),
                    });
                }
            }
        }
    }

    for section in schema.sections.iter().flatten() {
        if let Some(missing) = section.field_ids.iter().find(|id| !ids.contains(id.as_str())) {
            return Err(SchemaError::UnknownSectionField {
                form: schema.id.clone(),
                section: section.title.clone(),
                field: missing.clone(),
            });
        }
    }

    Ok(())
}
