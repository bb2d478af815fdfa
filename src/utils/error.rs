use thiserror::Error;

#[derive(Error, Debug)]
pub enum LocatorError {
    #[error("Dispatch request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration field '{field}' is invalid: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Malformed input: {message}")]
    MalformedInput { message: String },

    #[error("Coordinate ({latitude}, {longitude}) is out of range")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("Location unavailable: {reason}")]
    LocationUnavailable { reason: String },

    #[error("Unit '{unit_id}' was not found among nearby results")]
    UnitNotFound { unit_id: String },

    #[error("Dispatch credential expired or was rejected")]
    TokenExpired,

    #[error("Dispatch endpoint answered {status}: {message}")]
    DispatchFailed { status: u16, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Location,
    Network,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl LocatorError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LocatorError::ConfigError { .. }
            | LocatorError::ConfigValidationError { .. }
            | LocatorError::InvalidConfigValueError { .. }
            | LocatorError::MissingConfigError { .. } => ErrorCategory::Configuration,
            LocatorError::MalformedInput { .. }
            | LocatorError::InvalidCoordinate { .. }
            | LocatorError::UnitNotFound { .. } => ErrorCategory::Input,
            LocatorError::LocationUnavailable { .. } => ErrorCategory::Location,
            LocatorError::HttpError(_)
            | LocatorError::TokenExpired
            | LocatorError::DispatchFailed { .. } => ErrorCategory::Network,
            LocatorError::CsvError(_)
            | LocatorError::IoError(_)
            | LocatorError::SerializationError(_) => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            LocatorError::UnitNotFound { .. } => ErrorSeverity::Low,
            LocatorError::HttpError(_)
            | LocatorError::TokenExpired
            | LocatorError::DispatchFailed { .. }
            | LocatorError::LocationUnavailable { .. } => ErrorSeverity::Medium,
            LocatorError::ConfigError { .. }
            | LocatorError::ConfigValidationError { .. }
            | LocatorError::InvalidConfigValueError { .. }
            | LocatorError::MissingConfigError { .. }
            | LocatorError::MalformedInput { .. }
            | LocatorError::InvalidCoordinate { .. } => ErrorSeverity::High,
            LocatorError::CsvError(_)
            | LocatorError::IoError(_)
            | LocatorError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            LocatorError::TokenExpired => "Sign in again to obtain a fresh dispatch token",
            LocatorError::HttpError(_) | LocatorError::DispatchFailed { .. } => {
                "Check the network connection and the dispatch endpoint, then retry"
            }
            LocatorError::LocationUnavailable { .. } => {
                "Grant location access or pass --latitude/--longitude explicitly"
            }
            LocatorError::InvalidCoordinate { .. } => {
                "Latitude must be within [-90, 90] and longitude within [-180, 180]"
            }
            LocatorError::UnitNotFound { .. } => {
                "Run without --notify first to list the units within range"
            }
            LocatorError::MalformedInput { .. } => "Check the catalog file for invalid entries",
            LocatorError::ConfigError { .. }
            | LocatorError::ConfigValidationError { .. }
            | LocatorError::InvalidConfigValueError { .. }
            | LocatorError::MissingConfigError { .. } => {
                "Fix the configuration file or command line arguments"
            }
            LocatorError::CsvError(_)
            | LocatorError::IoError(_)
            | LocatorError::SerializationError(_) => "Check file permissions and disk space",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            LocatorError::TokenExpired => "Your session has expired".to_string(),
            LocatorError::HttpError(_) | LocatorError::DispatchFailed { .. } => {
                "Failed to share your location with the ambulance".to_string()
            }
            LocatorError::LocationUnavailable { .. } => {
                "Permission to access location was denied".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LocatorError>;
