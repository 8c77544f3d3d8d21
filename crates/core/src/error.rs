//! Structured error handling with context and recovery suggestions
//!
//! Errors carry a numeric code for programmatic handling and, where the fix
//! is known, a suggestion shown to the user.

use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // IO errors (2xxx)
    /// A directory that must exist is missing
    DirectoryNotFound = 2004,

    // Configuration errors (3xxx)
    /// A configuration file could not be read
    ConfigError = 3000,
    /// An explicitly named configuration file does not exist
    ConfigNotFound = 3001,
    /// A configuration file is not valid TOML for the schema
    ConfigParseError = 3002,
}

impl ErrorCode {
    /// Get the numeric code
    #[must_use]
    pub fn code(&self) -> u32 {
        *self as u32
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

/// Main error type
#[derive(Error, Debug)]
pub struct Error {
    /// Error code for programmatic handling
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Recovery suggestion
    pub suggestion: Option<String>,
    /// Source error
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  Suggestion: {suggestion}")?;
        }
        Ok(())
    }
}

impl Error {
    /// Create a new error
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            suggestion: None,
            source: None,
        }
    }

    /// Add a recovery suggestion
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add a source error
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// A required directory is missing
    pub fn directory_not_found(path: impl AsRef<Path>) -> Self {
        Self::new(
            ErrorCode::DirectoryNotFound,
            format!("Directory not found: {}", path.as_ref().display()),
        )
        .with_suggestion("Run from the project root or pass --root to point at it")
    }

    /// An explicitly requested configuration file is missing
    pub fn config_not_found(path: impl AsRef<Path>) -> Self {
        Self::new(
            ErrorCode::ConfigNotFound,
            format!("Configuration file not found: {}", path.as_ref().display()),
        )
        .with_suggestion("Create a .meshtool.toml file or use --config to specify a path")
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Exit codes for CLI commands
pub mod exit_codes {
    /// The run completed, possibly with skipped files
    pub const SUCCESS: u8 = 0;
    /// The run aborted
    pub const FAILURE: u8 = 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::DirectoryNotFound.to_string(), "E2004");
        assert_eq!(ErrorCode::ConfigParseError.to_string(), "E3002");
    }

    #[test]
    fn test_directory_not_found_has_suggestion() {
        let err = Error::directory_not_found("assets/rtttl");

        assert_eq!(err.code, ErrorCode::DirectoryNotFound);
        assert!(err.suggestion.is_some());
        let shown = err.to_string();
        assert!(shown.starts_with("[E2004] Directory not found: assets/rtttl"));
        assert!(shown.contains("Suggestion: "));
    }

    #[test]
    fn test_source_is_exposed() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let err = Error::new(ErrorCode::ConfigError, "Failed to read config").with_source(io);

        assert_eq!(err.source().map(ToString::to_string).as_deref(), Some("nope"));
    }

    #[test]
    fn test_plain_error_has_no_suggestion() {
        let err = Error::new(ErrorCode::ConfigParseError, "bad toml");
        assert_eq!(err.to_string(), "[E3002] bad toml");
    }
}
