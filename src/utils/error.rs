use thiserror::Error;

#[derive(Error, Debug)]
pub enum KonekteError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Request rejected by server ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Unexpected response: {message}")]
    UnexpectedResponse { message: String },

    #[error("Contract violation: {message}")]
    ContractViolation { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Transport,
    RemoteRejection,
    Parse,
    Contract,
    Configuration,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit status for a failed command. 4 is left for local validation failures.
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl KonekteError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            KonekteError::ApiError(_) => ErrorCategory::Transport,
            KonekteError::Rejected { .. } => ErrorCategory::RemoteRejection,
            KonekteError::SerializationError(_) | KonekteError::UnexpectedResponse { .. } => {
                ErrorCategory::Parse
            }
            KonekteError::ContractViolation { .. } => ErrorCategory::Contract,
            KonekteError::UrlError(_)
            | KonekteError::ConfigError { .. }
            | KonekteError::MissingConfigError { .. }
            | KonekteError::InvalidConfigValueError { .. }
            | KonekteError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            KonekteError::IoError(_) => ErrorCategory::Io,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::RemoteRejection => ErrorSeverity::Medium,
            ErrorCategory::Transport | ErrorCategory::Parse => ErrorSeverity::High,
            ErrorCategory::Configuration | ErrorCategory::Io => ErrorSeverity::High,
            ErrorCategory::Contract => ErrorSeverity::Critical,
        }
    }

    /// Message shown to the person at the terminal. Server rejections are
    /// passed through untouched.
    pub fn user_friendly_message(&self) -> String {
        match self {
            KonekteError::Rejected { message, .. } => message.clone(),
            KonekteError::ApiError(e) if e.is_timeout() => {
                "The directory server did not answer in time".to_string()
            }
            KonekteError::ApiError(_) => "Could not reach the directory server".to_string(),
            KonekteError::SerializationError(_) | KonekteError::UnexpectedResponse { .. } => {
                "The directory server sent a response that could not be read".to_string()
            }
            KonekteError::ContractViolation { message } => {
                format!("Invalid request payload: {}", message)
            }
            KonekteError::IoError(e) => format!("File error: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Transport => {
                "Check that the API server is running and that --api-url points to it"
            }
            ErrorCategory::RemoteRejection => {
                "Refresh the data you are working from and submit again"
            }
            ErrorCategory::Parse => "Make sure the API server version matches this client",
            ErrorCategory::Contract => "Pass a JSON object with the expected form fields",
            ErrorCategory::Configuration => "Review the configuration file and command-line flags",
            ErrorCategory::Io => "Check that the file exists and is readable",
        }
    }
}

pub type Result<T> = std::result::Result<T, KonekteError>;
