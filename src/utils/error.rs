use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Request failed with status code {status}")]
    UpstreamStatus { status: u16, body: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

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

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Unknown function: {name}")]
    UnknownEndpoint { name: String },

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Wrong session token")]
    WrongToken,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Input,
    Storage,
    Session,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl TrackerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            TrackerError::ApiError(_)
            | TrackerError::UpstreamStatus { .. }
            | TrackerError::UnknownEndpoint { .. } => ErrorCategory::Network,
            TrackerError::ConfigError { .. }
            | TrackerError::MissingConfigError { .. }
            | TrackerError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            TrackerError::ValidationError { .. } | TrackerError::SerializationError(_) => {
                ErrorCategory::Input
            }
            TrackerError::CsvError(_) | TrackerError::IoError(_) => ErrorCategory::Storage,
            TrackerError::NotLoggedIn | TrackerError::WrongToken => ErrorCategory::Session,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Session | ErrorCategory::Storage => {
                ErrorSeverity::High
            }
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            TrackerError::ApiError(e) if e.is_connect() => {
                "Could not reach the swim API".to_string()
            }
            TrackerError::ApiError(e) if e.is_timeout() => {
                "The swim API did not answer in time".to_string()
            }
            TrackerError::UpstreamStatus { status, .. } => {
                format!("The swim API answered with status {}", status)
            }
            TrackerError::MissingConfigError { field } => {
                format!("Required setting '{}' is not configured", field)
            }
            TrackerError::NotLoggedIn => "You need to log in first".to_string(),
            TrackerError::WrongToken => "That token is not valid, you are still logged out".to_string(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check the API URL and that the service is running",
            ErrorCategory::Configuration => {
                "Set the REACT_APP_API_* environment variables or pass --config"
            }
            ErrorCategory::Input => "Check the values you entered and try again",
            ErrorCategory::Storage => "Check that the file path is writable",
            ErrorCategory::Session => "Run `swim-tracker login <TOKEN>`",
        }
    }
}

impl From<toml::de::Error> for TrackerError {
    fn from(e: toml::de::Error) -> Self {
        TrackerError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        }
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_status_message_matches_proxy_text() {
        let err = TrackerError::UpstreamStatus {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Request failed with status code 500");
        assert_eq!(err.category(), ErrorCategory::Network);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
    }

    #[test]
    fn test_wrong_token_is_a_high_severity_session_error() {
        let err = TrackerError::WrongToken;
        assert_eq!(err.category(), ErrorCategory::Session);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.recovery_suggestion().contains("login"));
    }

    #[test]
    fn test_config_errors_are_critical() {
        let err = TrackerError::MissingConfigError {
            field: "api_url".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.user_friendly_message().contains("api_url"));
    }
}
