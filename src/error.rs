use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("CliError: {0}")]
    Cli(#[from] CliError),
    #[error("ApiError: {0}")]
    Api(#[from] ApiError),
    #[error("FormError: {0}")]
    Form(#[from] FormError),
    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),
    #[error("StorageError: {0}")]
    Storage(#[from] StorageError),
    #[error("DisplayError: {0}")]
    Display(#[from] DisplayError),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("Command not implemented: {command}")]
    NotImplemented { command: String },
}

#[derive(Error, Debug, Clone)]
pub enum ApiError {
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64, endpoint: String },
    #[error("HTTP error: {status} {message}")]
    Http {
        status: u16,
        endpoint: String,
        message: String,
    },
    #[error("Authentication failed")]
    Unauthorized {
        status: u16,
        endpoint: String,
        server_message: String,
    },
}

/// Errors raised by the form workflow. None of these are fatal to the
/// session; each is contained to the operation that raised it.
#[derive(Error, Debug)]
pub enum FormError {
    #[error("Quote record load failed: {message}")]
    RecordLoad { message: String },
    #[error("Option load failed for '{field}': {message}")]
    OptionLoad { field: String, message: String },
    #[error("Validation failed: {} required field(s) missing", .missing.len())]
    Validation { missing: Vec<String> },
    #[error("Rate card query failed: {0}")]
    Query(#[source] ApiError),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Keyring error: {0}")]
    KeyringError(String),
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("Configuration save failed")]
    ConfigSaveFailed,
    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },
    #[error("Configuration directory not found")]
    ConfigDirNotFound,
}

#[derive(Error, Debug)]
pub enum DisplayError {
    #[error("Table formatting failed: {0}")]
    TableFormat(String),
    #[error("Terminal output error: {0}")]
    TerminalOutput(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String, hint: String },
    #[error("Configuration field '{field}' is missing")]
    MissingField { field: String, field_type: String },
    #[error("Invalid configuration value for '{field}': {value}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSeverity {
    Critical,
    High,
    Medium,
    Low,
}

impl ErrorSeverity {
    pub fn emoji(&self) -> &'static str {
        match self {
            ErrorSeverity::Critical => "🚨",
            ErrorSeverity::High => "❌",
            ErrorSeverity::Medium => "⚠️",
            ErrorSeverity::Low => "ℹ️",
        }
    }
}

impl AppError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Cli(_) => ErrorSeverity::Medium,
            AppError::Api(api_error) => match api_error {
                ApiError::Unauthorized { .. } => ErrorSeverity::High,
                ApiError::Timeout { .. } => ErrorSeverity::Medium,
                ApiError::Http { status, .. } if *status >= 500 => ErrorSeverity::High,
                _ => ErrorSeverity::Medium,
            },
            AppError::Form(form_error) => match form_error {
                // Contained locally: prior bindings/options stay usable.
                FormError::RecordLoad { .. } => ErrorSeverity::Medium,
                FormError::OptionLoad { .. } => ErrorSeverity::Low,
                FormError::Validation { .. } => ErrorSeverity::Low,
                FormError::Query(_) => ErrorSeverity::Medium,
            },
            AppError::Config(_) => ErrorSeverity::High,
            AppError::Storage(_) => ErrorSeverity::Medium,
            AppError::Display(_) => ErrorSeverity::Low,
        }
    }

    pub fn display_friendly(&self) -> String {
        match self {
            AppError::Form(FormError::Validation { missing }) => {
                format!("Please fill in all required fields: {}", missing.join(", "))
            }
            AppError::Form(FormError::Query(e)) => {
                format!("Rate card lookup failed: {}", e)
            }
            AppError::Config(ConfigError::FileNotFound { path, .. }) => {
                format!("Configuration file not found: {}", path)
            }
            _ => format!("{}", self),
        }
    }

    pub fn troubleshooting_hint(&self) -> Option<String> {
        match self {
            AppError::Api(ApiError::Unauthorized { .. }) => {
                Some("Set RATECARD_API_KEY or pass --api-key and try again".to_string())
            }
            AppError::Api(ApiError::Timeout { .. }) => {
                Some("Check your internet or rate card service connection and try again".to_string())
            }
            AppError::Form(FormError::Validation { .. }) => {
                Some("'ratecard-cli options <quote-id>' lists the valid choices for each field".to_string())
            }
            AppError::Config(ConfigError::FileNotFound { .. }) => {
                Some("config set <field> <value> to set a configuration value".to_string())
            }
            _ => None,
        }
    }
}
