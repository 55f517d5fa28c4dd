use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("Method not allowed")]
    MethodNotAllowed { method: String },

    #[error("API key not configured")]
    ApiKeyNotConfigured,

    #[error("Query parameter is required")]
    MissingQuery,

    #[error("Spoonacular API error: {status} - {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("Upstream {operation} request timed out after {seconds}s")]
    UpstreamTimeout { operation: String, seconds: u64 },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid upstream URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

/// Broad failure classes, used to pick the response status and log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    Upstream,
    Unexpected,
}

impl ProxyError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ProxyError::MethodNotAllowed { .. } | ProxyError::MissingQuery => {
                ErrorCategory::Validation
            }
            ProxyError::ApiKeyNotConfigured
            | ProxyError::ConfigError { .. }
            | ProxyError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ProxyError::UpstreamStatus { .. } => ErrorCategory::Upstream,
            ProxyError::UpstreamTimeout { .. }
            | ProxyError::ApiError(_)
            | ProxyError::SerializationError(_)
            | ProxyError::UrlError(_)
            | ProxyError::IoError(_) => ErrorCategory::Unexpected,
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ProxyError::MethodNotAllowed { .. } => 405,
            ProxyError::MissingQuery => 400,
            _ => 500,
        }
    }

    /// Text placed in the `error` field of the JSON body.
    pub fn client_message(&self) -> String {
        self.to_string()
    }
}

pub type Result<T> = std::result::Result<T, ProxyError>;
