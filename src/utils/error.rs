use thiserror::Error;

#[derive(Error, Debug)]
pub enum KiotVietError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("KiotViet API returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl KiotVietError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// HTTP status carried by the error, if the remote service answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InvalidArgument { message } => format!("Invalid tool arguments: {}", message),
            Self::Http { status: 401, .. } => {
                "KiotViet rejected the access token (401 Unauthorized)".to_string()
            }
            Self::Http { status: 403, .. } => {
                "The access token is not allowed to access this retailer (403 Forbidden)"
                    .to_string()
            }
            Self::Http { status: 404, .. } => "The requested KiotViet record was not found".to_string(),
            Self::Http { status, .. } => format!("KiotViet API request failed with HTTP {}", status),
            Self::Transport(e) if e.is_timeout() => "KiotViet API request timed out".to_string(),
            Self::Transport(_) => "Could not reach the KiotViet API".to_string(),
            Self::Serialization(_) => "KiotViet API returned a response that is not valid JSON".to_string(),
            Self::IoError(e) => format!("IO failure: {}", e),
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "Check the tool arguments against the tool's input schema",
            Self::Http { status: 401, .. } => "Obtain a fresh access token from the credential service",
            Self::Http { status: 403, .. } => "Verify the retailer name matches the token's store",
            Self::Http { status, .. } if *status >= 500 => "KiotViet is having trouble; try again later",
            Self::Http { .. } => "Check the request parameters and record identifiers",
            Self::Transport(_) => "Check network connectivity and the configured base URL",
            Self::Serialization(_) => "Check that the base URL points at the KiotViet public API",
            Self::IoError(_) => "Check file paths and permissions",
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Fix the configuration file, command-line flags or environment variables"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, KiotVietError>;
