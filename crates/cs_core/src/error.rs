use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("Unsupported schema version: found {found}, expected {expected}")]
    SchemaVersion { found: u8, expected: u8 },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl From<serde_json::Error> for ScoreError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            ScoreError::Deserialization(err.to_string())
        } else {
            ScoreError::Serialization(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, ScoreError>;
