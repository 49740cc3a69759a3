//! Sink writing one JSON document per save or submit

use super::traits::FormSink;
use crate::engine::FieldValues;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Whether a record came from `on_save` or `on_submit`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Draft,
    Submission,
}

impl RecordKind {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submission => "submission",
        }
    }
}

/// On-disk document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SinkRecord {
    pub id: Uuid,
    pub form_id: String,
    pub kind: RecordKind,
    pub saved_at: DateTime<Utc>,
    pub values: FieldValues,
}

/// Writes `<form>-<kind>-<uuid>.json` files into a directory
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    dir: PathBuf,
}

impl JsonFileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    async fn write(&self, form_id: &str, kind: RecordKind, values: &FieldValues) -> Result<()> {
        let record = SinkRecord {
            id: Uuid::new_v4(),
            form_id: form_id.to_string(),
            kind,
            saved_at: Utc::now(),
            values: values.clone(),
        };

        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;

        let path = self
            .dir
            .join(format!("{}-{}-{}.json", form_id, kind.as_str(), record.id));
        let content = serde_json::to_string_pretty(&record)?;
        tokio::fs::write(&path, content)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;

        tracing::info!("Wrote {} to {}", kind.as_str(), path.display());
        Ok(())
    }
}

#[async_trait]
impl FormSink for JsonFileSink {
    async fn on_save(&mut self, form_id: &str, values: &FieldValues) -> Result<()> {
        self.write(form_id, RecordKind::Draft, values).await
    }

    async fn on_submit(&mut self, form_id: &str, values: &FieldValues) -> Result<()> {
        self.write(form_id, RecordKind::Submission, values).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::FieldValue;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("taxforms-sink-{}", Uuid::new_v4()))
    }

    /// The single file a sink wrote into `dir`
    async fn only_record(dir: &Path) -> PathBuf {
        let mut entries = tokio::fs::read_dir(dir).await.unwrap();
        let path = entries.next_entry().await.unwrap().unwrap().path();
        assert!(entries.next_entry().await.unwrap().is_none());
        path
    }

    fn values() -> FieldValues {
        let mut values = FieldValues::new();
        values.insert("ssn".to_string(), FieldValue::text("123-45-6789"));
        values.insert("certify".to_string(), FieldValue::Bool(true));
        values
    }

    #[tokio::test]
    async fn test_submit_writes_record() {
        let dir = temp_dir();
        let mut sink = JsonFileSink::new(&dir);
        sink.on_submit("w9", &values()).await.unwrap();

        let path = only_record(&dir).await;
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("w9-submission-"));

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        let record: SinkRecord = serde_json::from_str(&content).unwrap();
        assert_eq!(record.form_id, "w9");
        assert_eq!(record.kind, RecordKind::Submission);
        assert_eq!(record.values, values());

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_save_writes_draft_with_camel_case_keys() {
        let dir = temp_dir();
        let mut sink = JsonFileSink::new(&dir);
        sink.on_save("w2", &values()).await.unwrap();

        let content = tokio::fs::read_to_string(only_record(&dir).await)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(json["formId"], "w2");
        assert_eq!(json["kind"], "draft");
        assert_eq!(json["values"]["ssn"], "123-45-6789");
        assert!(json.get("savedAt").is_some());

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_each_call_writes_a_new_file() {
        let dir = temp_dir();
        let mut sink = JsonFileSink::new(&dir);
        sink.on_save("w2", &values()).await.unwrap();
        sink.on_save("w2", &values()).await.unwrap();

        let mut entries = tokio::fs::read_dir(&dir).await.unwrap();
        let mut count = 0;
        while entries.next_entry().await.unwrap().is_some() {
            count += 1;
        }
        assert_eq!(count, 2);

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
