use crate::config::ConfigValidationError;
use engine::EngineError;
use std::path::PathBuf;
use thiserror::Error;

/// Application-wide error type for a generator run.
///
/// Every variant aborts the run.
///
/// # Error Categories
///
/// ## Configuration Errors
/// - [`Config`] - the embedded configuration could not be parsed
/// - [`InvalidConfig`] - the configuration parsed but failed validation
///
/// ## File System Errors
/// - [`ReadFile`], [`WriteFile`] - template, theme or manifest I/O
/// - [`CreateDir`], [`ListDir`], [`RemovePath`] - output directory bookkeeping
///
/// ## Generation Errors
/// - [`Engine`] - color math, template parsing or manifest rewrite failures
///
/// [`Config`]: AppError::Config
/// [`InvalidConfig`]: AppError::InvalidConfig
/// [`ReadFile`]: AppError::ReadFile
/// [`WriteFile`]: AppError::WriteFile
/// [`CreateDir`]: AppError::CreateDir
/// [`ListDir`]: AppError::ListDir
/// [`RemovePath`]: AppError::RemovePath
/// [`Engine`]: AppError::Engine
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Invalid configuration:\n{}", format_validation_errors(.0))]
    InvalidConfig(Vec<ConfigValidationError>),

    #[error("Failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to list directory {path}: {source}")]
    ListDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to remove {path}: {source}")]
    RemovePath {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Engine(#[from] EngineError),
}

fn format_validation_errors(errors: &[ConfigValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
