use std::fmt::Display;
use std::path::PathBuf;
use thiserror::Error;

pub mod codes;

pub use codes::{describe_error_code, ErrorCode};

/// The unified error type for logsweep
#[derive(Error, Debug)]
pub enum SweepError {
    #[error("[E{code:04}] Configuration error: {message}")]
    Config {
        code: u16,
        message: String,
        field: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Input error: {message}")]
    Input {
        code: u16,
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Cannot parse log line {line}: {message}")]
    Parse {
        code: u16,
        line: usize,
        message: String,
    },

    #[error("[E{code:04}] Chart error: {message}")]
    Chart {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] {message}")]
    Other { code: u16, message: String },
}

impl SweepError {
    /// Create a configuration error with default code
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            code: ErrorCode::CONFIG_GENERIC,
            message: message.into(),
            field: None,
            source: None,
        }
    }

    /// Create a configuration error with specific code and offending field
    pub fn config_with_code(code: u16, message: impl Into<String>, field: Option<String>) -> Self {
        Self::Config {
            code,
            message: message.into(),
            field,
            source: None,
        }
    }

    /// Create an input error with specific code and path
    pub fn input_with_code(code: u16, message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Input {
            code,
            message: message.into(),
            path,
            source: None,
        }
    }

    /// Create a parse error for a 1-based line number
    pub fn parse(code: u16, line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            code,
            line,
            message: message.into(),
        }
    }

    /// Create a chart error with default code
    pub fn chart(message: impl Into<String>) -> Self {
        Self::Chart {
            code: ErrorCode::CHART_GENERIC,
            message: message.into(),
            source: None,
        }
    }

    /// Create a chart error with specific code
    pub fn chart_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Chart {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Wrap an error that carries no code of its own, keeping its cause chain in the message
    pub fn unexpected(error: &anyhow::Error) -> Self {
        Self::Other {
            code: ErrorCode::OTHER_UNEXPECTED,
            message: format!("{:#}", error),
        }
    }

    /// Attach the underlying cause.
    ///
    /// Parse and other errors carry no source and are returned unchanged.
    pub fn with_source(
        mut self,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        match &mut self {
            Self::Config { source: src, .. }
            | Self::Input { source: src, .. }
            | Self::Chart { source: src, .. } => {
                *src = Some(source.into());
            }
            Self::Parse { .. } | Self::Other { .. } => {}
        }
        self
    }

    /// Add context to the error message
    pub fn with_context(mut self, context: impl Display) -> Self {
        match &mut self {
            Self::Config { message, .. }
            | Self::Input { message, .. }
            | Self::Parse { message, .. }
            | Self::Chart { message, .. }
            | Self::Other { message, .. } => {
                *message = format!("{}: {}", message, context);
            }
        }
        self
    }

    /// Set the input path for an input error
    pub fn with_path(mut self, new_path: impl Into<PathBuf>) -> Self {
        if let Self::Input { ref mut path, .. } = self {
            *path = Some(new_path.into());
        }
        self
    }

    /// Get the process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } => 2,
            Self::Input { .. } => 3,
            Self::Parse { .. } => 4,
            Self::Chart { .. } => 5,
            Self::Other { .. } => 1,
        }
    }

    /// Get the error code
    pub fn code(&self) -> u16 {
        match self {
            Self::Config { code, .. }
            | Self::Input { code, .. }
            | Self::Parse { code, .. }
            | Self::Chart { code, .. }
            | Self::Other { code, .. } => *code,
        }
    }

    /// Line number of a parse failure, if this is one
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Parse { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message, field, .. } => {
                if let Some(f) = field {
                    format!("Configuration problem in '{}': {}", f, message)
                } else {
                    format!("Configuration problem: {}", message)
                }
            }
            Self::Input { message, path, .. } => {
                if let Some(p) = path {
                    format!("Cannot read input file {}: {}", p.display(), message)
                } else {
                    format!("Cannot read input: {}", message)
                }
            }
            Self::Parse { line, message, .. } => {
                format!("Error: cannot parse log line no - {} ({})", line, message)
            }
            Self::Chart { message, .. } => format!("Chart not published: {}", message),
            Self::Other { message, .. } => format!("Error: {}", message),
        }
    }

    /// Get a developer-friendly error message with full chain
    pub fn developer_message(&self) -> String {
        let mut msg = self.to_string();
        let mut cause = std::error::Error::source(self);
        while let Some(err) = cause {
            msg.push_str(&format!("\n  caused by: {}", err));
            cause = err.source();
        }
        msg.push_str(&format!("\n  ({})", describe_error_code(self.code())));
        msg
    }
}

/// Type alias for Results using SweepError
pub type Result<T> = std::result::Result<T, SweepError>;

impl From<std::io::Error> for SweepError {
    fn from(err: std::io::Error) -> Self {
        use std::io::ErrorKind;

        let (code, message) = match err.kind() {
            ErrorKind::NotFound => (ErrorCode::INPUT_NOT_FOUND, "File not found"),
            ErrorKind::PermissionDenied => {
                (ErrorCode::INPUT_PERMISSION_DENIED, "Permission denied")
            }
            _ => (ErrorCode::INPUT_READ_FAILED, "IO operation failed"),
        };

        SweepError::input_with_code(code, message, None).with_source(err)
    }
}

impl From<toml::de::Error> for SweepError {
    fn from(err: toml::de::Error) -> Self {
        SweepError::config_with_code(ErrorCode::CONFIG_INVALID_TOML, "Invalid TOML syntax", None)
            .with_source(err)
    }
}

impl From<serde_json::Error> for SweepError {
    fn from(err: serde_json::Error) -> Self {
        SweepError::chart("Failed to serialize chart figure").with_source(err)
    }
}

impl From<reqwest::Error> for SweepError {
    fn from(err: reqwest::Error) -> Self {
        SweepError::chart_with_code(ErrorCode::CHART_NETWORK, "Chart request failed")
            .with_source(err)
    }
}
