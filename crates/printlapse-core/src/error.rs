//! Error handling for Printlapse
//!
//! Provides error types for the two layers of the pipeline:
//! - Parse errors (G-code interpretation)
//! - Config errors (import settings validation and persistence)
//!
//! All error types use `thiserror` for ergonomic error handling.
//!
//! Recoverable conditions (malformed argument values, unknown axis letters,
//! out-of-range extruder indices) are *not* errors: they are logged as
//! warnings with the offending line and parsing continues. Only fatal
//! conditions and I/O failures surface here.

use thiserror::Error;

/// Parse error type
///
/// Represents irrecoverable failures of a G-code import. A parse either
/// fully succeeds (a complete model is returned) or fails with one of these;
/// no partial model is ever handed back.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Irrecoverable condition reported during interpretation
    #[error("Fatal parse error at line {line_number}: {reason} (text: '{line}')")]
    Fatal {
        /// 1-based line number where the condition was raised.
        line_number: u32,
        /// The offending line text.
        line: String,
        /// Description of the condition.
        reason: String,
    },

    /// I/O failure while opening or streaming the input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration error type
///
/// Represents errors in import settings validation or persistence.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A settings value is outside its valid range
    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting {
        /// The setting key.
        key: String,
        /// The reason the value is invalid.
        reason: String,
    },

    /// I/O error during settings load or save
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Main error type for Printlapse
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Parse error
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a fatal parse error
    pub fn is_fatal_parse(&self) -> bool {
        matches!(self, Error::Parse(ParseError::Fatal { .. }))
    }

    /// Check if this is a parse error
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Error::Parse(_))
    }

    /// Check if this is a configuration error
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

/// Result type alias for parse operations
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::Fatal {
            line_number: 42,
            line: "G1 X?!".to_string(),
            reason: "unreadable motion".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Fatal parse error at line 42: unreadable motion (text: 'G1 X?!')"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidSetting {
            key: "max_segment_size".to_string(),
            reason: "must be at least 0.1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid setting 'max_segment_size': must be at least 0.1"
        );
    }

    #[test]
    fn test_error_conversion() {
        let parse_err = ParseError::Fatal {
            line_number: 1,
            line: String::new(),
            reason: "test".to_string(),
        };
        let err: Error = parse_err.into();
        assert!(err.is_parse_error());
        assert!(err.is_fatal_parse());

        let config_err = ConfigError::InvalidSetting {
            key: "subdivide".to_string(),
            reason: "test".to_string(),
        };
        let err: Error = config_err.into();
        assert!(err.is_config_error());
        assert!(!err.is_parse_error());

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = ParseError::from(io_err).into();
        assert!(err.is_parse_error());
        assert!(!err.is_fatal_parse());
    }
}
