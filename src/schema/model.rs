//! Declarative form schema types
//!
//! These structs are the interchange shape for form catalogs. Field names
//! serialize in camelCase so catalogs authored for other hosts load as-is.

use serde::{Deserialize, Serialize};

/// Closed set of field types a schema may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Currency,
    Number,
    Checkbox,
    Date,
    Email,
    Ssn,
    Ein,
    Phone,
    Select,
    Textarea,
}

impl FieldType {
    /// Wire name of the type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Currency => "currency",
            Self::Number => "number",
            Self::Checkbox => "checkbox",
            Self::Date => "date",
            Self::Email => "email",
            Self::Ssn => "ssn",
            Self::Ein => "ein",
            Self::Phone => "phone",
            Self::Select => "select",
            Self::Textarea => "textarea",
        }
    }
}

/// Form category used for catalog grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormCategory {
    Income,
    Employment,
    Authorization,
    Business,
}

impl FormCategory {
    pub const ALL: [FormCategory; 4] = [
        FormCategory::Income,
        FormCategory::Employment,
        FormCategory::Authorization,
        FormCategory::Business,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Employment => "Employment",
            Self::Authorization => "Authorization",
            Self::Business => "Business",
        }
    }

    /// Parse a lowercase category name (as used in config files)
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "income" => Some(Self::Income),
            "employment" => Some(Self::Employment),
            "authorization" => Some(Self::Authorization),
            "business" => Some(Self::Business),
            _ => None,
        }
    }
}

/// Optional constraints attached to a field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Regular expression source, matched unanchored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Overrides the default text of any rule violation on the field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// One entry of a select field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

/// A single input definition within a schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<SelectOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRule>,
}

impl FormField {
    /// Create an optional field of the given type
    pub fn new(id: &str, label: &str, field_type: FieldType) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            field_type,
            required: false,
            placeholder: None,
            help_text: None,
            reference_link: None,
            options: None,
            validation: None,
        }
    }

    /// Create a select field with its options
    pub fn select(id: &str, label: &str, options: Vec<SelectOption>) -> Self {
        Self {
            options: Some(options),
            ..Self::new(id, label, FieldType::Select)
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn placeholder(mut self, text: &str) -> Self {
        self.placeholder = Some(text.to_string());
        self
    }

    pub fn help(mut self, text: &str) -> Self {
        self.help_text = Some(text.to_string());
        self
    }

    pub fn link(mut self, url: &str) -> Self {
        self.reference_link = Some(url.to_string());
        self
    }

    pub fn pattern(mut self, pattern: &str, message: &str) -> Self {
        let rule = self.validation.get_or_insert_with(ValidationRule::default);
        rule.pattern = Some(pattern.to_string());
        rule.message = Some(message.to_string());
        self
    }

    pub fn range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        let rule = self.validation.get_or_insert_with(ValidationRule::default);
        rule.min = min;
        rule.max = max;
        self
    }

    /// Declared options, empty for non-select fields
    pub fn options(&self) -> &[SelectOption] {
        self.options.as_deref().unwrap_or(&[])
    }
}

/// Named grouping of fields, referenced by id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSection {
    pub title: String,
    pub field_ids: Vec<String>,
}

impl FormSection {
    pub fn new(title: &str, field_ids: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            field_ids: field_ids.iter().map(|id| id.to_string()).collect(),
        }
    }
}

/// Declarative description of one form type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
    pub id: String,
    pub title: String,
    pub category: FormCategory,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_link: Option<String>,
    pub fields: Vec<FormField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<FormSection>>,
}

impl FormSchema {
    /// Look up a field by id
    pub fn field(&self, id: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Layout groups: one per section, or a single untitled group with
    /// every field in declared order. Section ids that do not resolve are
    /// skipped.
    pub fn groups(&self) -> Vec<(Option<&str>, Vec<&FormField>)> {
        match &self.sections {
            Some(sections) => sections
                .iter()
                .map(|section| {
                    let fields = section
                        .field_ids
                        .iter()
                        .filter_map(|id| self.field(id))
                        .collect();
                    (Some(section.title.as_str()), fields)
                })
                .collect(),
            None => vec![(None, self.fields.iter().collect())],
        }
    }
}
