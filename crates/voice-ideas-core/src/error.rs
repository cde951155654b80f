use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VoiceIdeasError {
    #[error("Input file not found: {path}")]
    InputNotFound { path: PathBuf },

    #[error("Failed to parse config {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Unknown config key: {key}")]
    ConfigKeyNotFound { key: String },

    #[error("Invalid value for {key}: '{value}' - {reason}")]
    InvalidConfigValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, VoiceIdeasError>;

impl VoiceIdeasError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InputNotFound { .. } => 2,
            Self::ConfigKeyNotFound { .. } => 3,
            Self::InvalidConfigValue { .. } => 4,
            Self::Csv(_) => 5,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let err = VoiceIdeasError::InputNotFound {
            path: PathBuf::from("notes.csv"),
        };
        assert_eq!(err.exit_code(), 2);

        let err = VoiceIdeasError::ConfigKeyNotFound {
            key: "output.colour".to_string(),
        };
        assert_eq!(err.exit_code(), 3);

        let err = VoiceIdeasError::Io(std::io::Error::other("disk full"));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_invalid_value_message() {
        let err = VoiceIdeasError::InvalidConfigValue {
            key: "output.format".to_string(),
            value: "xml".to_string(),
            reason: "expected text or json".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for output.format: 'xml' - expected text or json"
        );
    }
}
