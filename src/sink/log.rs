//! Sink that only records payloads in the log

use super::traits::FormSink;
use crate::engine::FieldValues;
use anyhow::Result;
use async_trait::async_trait;

/// Used when no submissions directory can be resolved
#[derive(Debug, Default)]
pub struct LogSink;

#[async_trait]
impl FormSink for LogSink {
    async fn on_save(&mut self, form_id: &str, values: &FieldValues) -> Result<()> {
        tracing::info!("Draft of {form_id}: {}", serde_json::to_string(values)?);
        Ok(())
    }

    async fn on_submit(&mut self, form_id: &str, values: &FieldValues) -> Result<()> {
        tracing::info!("Submission of {form_id}: {}", serde_json::to_string(values)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::FieldValue;

    #[tokio::test]
    async fn test_log_sink_accepts_payloads() {
        let mut sink = LogSink;
        let mut values = FieldValues::new();
        values.insert("name".to_string(), FieldValue::text("Ada"));
        tokio_test::assert_ok!(sink.on_save("w9", &values).await);
        tokio_test::assert_ok!(sink.on_submit("w9", &values).await);
    }
}
