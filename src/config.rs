use serde::Deserialize;

use crate::error::ConfigError;

/// Keys under which the editor persists its state in local storage.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct StorageKeys {
    pub content: String,
    pub theme: String,
    pub theme_mode: String,
    pub sync: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            content: "md-preview-content".to_string(),
            theme: "md-preview-theme".to_string(),
            theme_mode: "md-preview-theme-mode".to_string(),
            sync: "md-preview-sync".to_string(),
        }
    }
}

/// Page-level configuration. Every field is optional in the inline JSON
/// block; missing fields keep their defaults.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct EditorConfig {
    pub storage_keys: StorageKeys,
    pub status_timeout_ms: u32,
    pub color_scheme_query: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            storage_keys: StorageKeys::default(),
            status_timeout_ms: 1600,
            color_scheme_query: "(prefers-color-scheme: dark)".to_string(),
        }
    }
}

impl EditorConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = EditorConfig::from_json("{}").unwrap();
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.status_timeout_ms, 1600);
        assert_eq!(config.storage_keys.sync, "md-preview-sync");
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = EditorConfig::from_json(
            r#"{"status_timeout_ms": 900, "storage_keys": {"content": "draft"}}"#,
        )
        .unwrap();
        assert_eq!(config.status_timeout_ms, 900);
        assert_eq!(config.storage_keys.content, "draft");
        assert_eq!(config.storage_keys.theme, "md-preview-theme");
        assert_eq!(config.color_scheme_query, "(prefers-color-scheme: dark)");
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(EditorConfig::from_json("{\"status_timeout_ms\": \"soon\"}").is_err());
        assert!(EditorConfig::from_json("not json").is_err());
    }
}
