use thiserror::Error;

#[derive(Error, Debug)]
pub enum CropwiseError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    Validation {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Data source unavailable: {0}")]
    DataSourceUnavailable(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl CropwiseError {
    pub fn validation(
        field: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CropwiseError::Validation {
            field,
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending form field for validation failures.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            CropwiseError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CropwiseError>;
