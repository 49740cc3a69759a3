//! Configuration handling for the TUI

use crate::schema::FormCategory;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Environment variable overriding where submissions are written
pub const SUBMISSIONS_DIR_ENV: &str = "TAXFORMS_SUBMISSIONS_DIR";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Directory for saved drafts and submissions
    pub submissions_dir: Option<String>,
    /// Category tab selected on startup
    pub start_category: Option<String>,
    /// Draw help text under fields
    pub show_help_text: Option<bool>,
    /// Require a second Esc before discarding edits
    pub confirm_discard: Option<bool>,
}

impl TuiConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("io", "taxforms", "taxforms-tui")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: TuiConfig = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config in {}", path.display()))?;
        Ok(config)
    }

    /// Submissions directory: environment, then config, then platform data dir
    pub fn submissions_path(&self) -> Option<PathBuf> {
        self.submissions_path_with(std::env::var(SUBMISSIONS_DIR_ENV).ok())
    }

    fn submissions_path_with(&self, env_override: Option<String>) -> Option<PathBuf> {
        env_override
            .filter(|dir| !dir.is_empty())
            .or_else(|| self.submissions_dir.clone())
            .map(PathBuf::from)
            .or_else(|| Self::project_dirs().map(|dirs| dirs.data_dir().join("submissions")))
    }

    /// Starting category, ignoring unknown names
    pub fn start_category(&self) -> Option<FormCategory> {
        self.start_category.as_deref().and_then(FormCategory::parse)
    }

    pub fn show_help_text(&self) -> bool {
        self.show_help_text.unwrap_or(true)
    }

    pub fn confirm_discard(&self) -> bool {
        self.confirm_discard.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TuiConfig::default();
        assert!(config.submissions_dir.is_none());
        assert!(config.start_category.is_none());
        assert!(config.show_help_text());
        assert!(config.confirm_discard());
    }

    #[test]
    fn test_serialization() {
        let config = TuiConfig {
            submissions_dir: Some("/tmp/forms".to_string()),
            start_category: Some("business".to_string()),
            show_help_text: Some(false),
            confirm_discard: Some(false),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: TuiConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.submissions_dir, Some("/tmp/forms".to_string()));
        assert_eq!(parsed.start_category(), Some(FormCategory::Business));
        assert!(!parsed.show_help_text());
        assert!(!parsed.confirm_discard());
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: TuiConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.submissions_dir.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"start_category": "income", "unknown_field": "value"}"#;
        let parsed: TuiConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.start_category(), Some(FormCategory::Income));
    }

    #[test]
    fn test_unknown_category_ignored() {
        let config = TuiConfig {
            start_category: Some("payroll".to_string()),
            ..Default::default()
        };
        assert!(config.start_category().is_none());
    }

    #[test]
    fn test_env_override_wins() {
        let config = TuiConfig {
            submissions_dir: Some("/from/config".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.submissions_path_with(Some("/from/env".to_string())),
            Some(PathBuf::from("/from/env"))
        );
        assert_eq!(
            config.submissions_path_with(Some(String::new())),
            Some(PathBuf::from("/from/config"))
        );
        assert_eq!(
            config.submissions_path_with(None),
            Some(PathBuf::from("/from/config"))
        );
    }

    #[test]
    fn test_load_from_malformed_file_errors() {
        let path = std::env::temp_dir()
            .join(format!("taxforms-config-{}.json", uuid::Uuid::new_v4()));
        fs::write(&path, "{not json").unwrap();
        let result = TuiConfig::load_from(&path);
        fs::remove_file(&path).unwrap();
        assert!(result.is_err());
    }
}
