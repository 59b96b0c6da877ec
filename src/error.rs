use thiserror::Error;

/// Failure of the backing key-value store. Never reaches the user; the
/// preference layer swallows it and falls back to defaults.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,

    #[error("storage call failed: {0}")]
    Js(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("clipboard API is unavailable")]
    Unavailable,

    #[error("clipboard write rejected: {0}")]
    Rejected(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid editor config: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_error_converts_into_config_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ConfigError = json_err.into();
        assert!(err.to_string().starts_with("invalid editor config:"));
    }

    #[test]
    fn error_display() {
        assert_eq!(StorageError::Unavailable.to_string(), "storage is unavailable");
        assert_eq!(
            StorageError::Js("QuotaExceededError".to_string()).to_string(),
            "storage call failed: QuotaExceededError"
        );
        assert_eq!(
            ClipboardError::Rejected("NotAllowedError".to_string()).to_string(),
            "clipboard write rejected: NotAllowedError"
        );
    }
}
