//! Error types and exit codes for propscan

use std::process::ExitCode;
use thiserror::Error;

/// Main error type for propscan operations
#[derive(Error, Debug)]
pub enum PropscanError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Not a directory: {path}")]
    NotADirectory { path: String },

    #[error("Unsupported language for extension: {extension}")]
    UnsupportedLanguage { extension: String },

    #[error("Failed to parse file: {message}")]
    ParseFailure { message: String },

    #[error("Component extraction failed: {message}")]
    ExtractionFailure { message: String },

    #[error("Failed to write document store {path}: {message}")]
    WriteFailure { path: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PropscanError {
    /// Convert error to appropriate exit code:
    /// - 0: Success
    /// - 1: File not found / IO error
    /// - 2: Unsupported language
    /// - 3: Parse failure
    /// - 4: Internal extraction failure
    /// - 5: Document store write failure
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::FileNotFound { .. } => ExitCode::from(1),
            Self::NotADirectory { .. } => ExitCode::from(1),
            Self::UnsupportedLanguage { .. } => ExitCode::from(2),
            Self::ParseFailure { .. } => ExitCode::from(3),
            Self::ExtractionFailure { .. } => ExitCode::from(4),
            Self::WriteFailure { .. } => ExitCode::from(5),
            Self::Io(_) => ExitCode::from(1),
        }
    }
}

/// Result type alias for propscan operations
pub type Result<T> = std::result::Result<T, PropscanError>;
