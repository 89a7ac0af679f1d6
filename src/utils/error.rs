use thiserror::Error;

/// File and run level failures. Any of these ends the run without a report.
#[derive(Error, Debug)]
pub enum GradeError {
    #[error("Input file not found: {path}")]
    SourceNotFound { path: String },

    #[error("I/O error on '{path}': {source}")]
    IoFailure {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unexpected failure: {message}")]
    UnexpectedFailure { message: String },
}

/// Per-line parse failures. These are reported and the line is skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Not enough fields (expected 6, found {fields})")]
    MalformedLine { line: usize, fields: usize },

    #[error("Invalid number format: '{text}'")]
    InvalidNumber { line: usize, text: String },

    #[error("Grade out of range: {value}")]
    GradeOutOfRange { line: usize, value: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordErrorKind {
    MalformedLine,
    InvalidNumber,
    GradeOutOfRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    SourceNotFound,
    Io,
    Configuration,
    Unexpected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl GradeError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        GradeError::IoFailure {
            path: path.into(),
            source,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            GradeError::SourceNotFound { .. } => ErrorCategory::SourceNotFound,
            GradeError::IoFailure { .. } => ErrorCategory::Io,
            GradeError::ConfigError { .. } | GradeError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            GradeError::UnexpectedFailure { .. } => ErrorCategory::Unexpected,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::SourceNotFound | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Medium,
            ErrorCategory::Unexpected => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::SourceNotFound => "Check the file path and spelling",
            ErrorCategory::Io => "Check disk space and file permissions",
            ErrorCategory::Configuration => {
                "Check the command line arguments and the configuration file"
            }
            ErrorCategory::Unexpected => "Re-run with --verbose and report the error message",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            GradeError::SourceNotFound { path } => {
                format!("Could not find input file '{}'", path)
            }
            GradeError::IoFailure { path, source } => {
                format!("Could not read or write '{}': {}", path, source)
            }
            GradeError::UnexpectedFailure { message } => {
                format!("Something went wrong: {}", message)
            }
            other => other.to_string(),
        }
    }
}

impl RecordError {
    /// 1-based line number the failure was found on.
    pub fn line(&self) -> usize {
        match self {
            RecordError::MalformedLine { line, .. }
            | RecordError::InvalidNumber { line, .. }
            | RecordError::GradeOutOfRange { line, .. } => *line,
        }
    }

    pub fn kind(&self) -> RecordErrorKind {
        match self {
            RecordError::MalformedLine { .. } => RecordErrorKind::MalformedLine,
            RecordError::InvalidNumber { .. } => RecordErrorKind::InvalidNumber,
            RecordError::GradeOutOfRange { .. } => RecordErrorKind::GradeOutOfRange,
        }
    }
}

pub type Result<T> = std::result::Result<T, GradeError>;
