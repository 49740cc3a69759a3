//! Trait abstraction for form sinks to enable mocking in tests

use crate::engine::FieldValues;
use anyhow::Result;
use async_trait::async_trait;

/// Receiver of `onSave` / `onSubmit` payloads
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FormSink: Send + Sync {
    /// Store a draft snapshot of the form's values
    async fn on_save(&mut self, form_id: &str, values: &FieldValues) -> Result<()>;

    /// Accept values of a form that passed whole-form validation
    async fn on_submit(&mut self, form_id: &str, values: &FieldValues) -> Result<()>;
}
