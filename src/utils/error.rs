use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("Source object unavailable: {message}")]
    SourceUnavailable { message: String },

    #[error("Malformed input: {message}")]
    MalformedInput { message: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

impl ProvisionError {
    /// Wraps any error into `SourceUnavailable`; an error that already is one
    /// passes through unchanged so messages do not nest.
    pub fn source_unavailable(err: ProvisionError) -> Self {
        match err {
            e @ Self::SourceUnavailable { .. } => e,
            other => Self::SourceUnavailable {
                message: other.to_string(),
            },
        }
    }

    pub fn malformed_input(message: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: message.into(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::SourceUnavailable { message } => {
                format!("Could not fetch the group sheet: {}", message)
            }
            Self::MalformedInput { message } => {
                format!("The group sheet is not usable: {}", message)
            }
            Self::ApiError(e) => format!("A request to an external service failed: {}", e),
            Self::IoError(e) => format!("A file operation failed: {}", e),
            Self::SerializationError(e) => format!("JSON handling failed: {}", e),
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            Self::MissingConfigError { field } => {
                format!("Required configuration '{}' is not set", field)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::SourceUnavailable { .. } => {
                "Check that the bucket/path and object key exist and are reachable"
            }
            Self::MalformedInput { .. } => {
                "Make sure the file is UTF-8 CSV with a group_name,description,visibility header"
            }
            Self::ApiError(_) => "Check the endpoint URL, credentials and network connectivity",
            Self::IoError(_) => "Check that the path exists and is readable",
            Self::SerializationError(_) => "Check that the payload is valid JSON",
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => {
                "Review the command-line flags and environment variables"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ProvisionError>;
