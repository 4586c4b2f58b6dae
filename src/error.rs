//! Error types for the motif analysis system

use std::fmt;

/// Custom error type for MIDI motif processing
#[derive(Debug)]
pub enum MotifError {
    /// E001: Malformed input event data
    MalformedInput(String),
    /// E002: Unsupported MIDI timing (SMPTE-based files)
    UnsupportedTiming(String),
    /// E003: MIDI container parse error
    MidiParseError(String),
    /// E004: File I/O error
    FileError(String),
    /// E005: Configuration validation failed
    ConfigValidationFailed(String),
    /// E006: Configuration parse error
    ConfigParseError(String),
}

impl fmt::Display for MotifError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotifError::MalformedInput(msg) => {
                write!(f, "E001: Malformed input - {}", msg)
            }
            MotifError::UnsupportedTiming(msg) => {
                write!(f, "E002: Unsupported MIDI timing - {}", msg)
            }
            MotifError::MidiParseError(msg) => {
                write!(f, "E003: MIDI parse error - {}", msg)
            }
            MotifError::FileError(msg) => {
                write!(f, "E004: File I/O error - {}", msg)
            }
            MotifError::ConfigValidationFailed(msg) => {
                write!(f, "E005: Configuration validation failed - {}", msg)
            }
            MotifError::ConfigParseError(msg) => {
                write!(f, "E006: Configuration parse error - {}", msg)
            }
        }
    }
}

impl std::error::Error for MotifError {}

// From implementations for common error types
impl From<std::io::Error> for MotifError {
    fn from(err: std::io::Error) -> Self {
        MotifError::FileError(format!("File I/O error: {}", err))
    }
}

impl From<midly::Error> for MotifError {
    fn from(err: midly::Error) -> Self {
        MotifError::MidiParseError(format!("SMF error: {}", err))
    }
}

impl From<serde_json::Error> for MotifError {
    fn from(err: serde_json::Error) -> Self {
        MotifError::ConfigParseError(format!("JSON error: {}", err))
    }
}

/// Result type alias for motif processing operations
pub type Result<T> = std::result::Result<T, MotifError>;
