//! Error types and exit codes for Vaultpress.
//!
//! Per-note text transforms never fail; everything here is raised by the
//! orchestration layer (reading sources, loading config, discovering chapters).

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes reported by the `vaultpress` binary.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const SOURCE_NOT_FOUND: i32 = 2;
    pub const NO_INPUT: i32 = 3;
    pub const INVALID_CONFIG: i32 = 4;
}

/// Main error type for Vaultpress operations.
#[derive(Error, Debug)]
pub enum PressError {
    #[error("No input files provided")]
    NoInput,

    #[error("File not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("Folder not found: {0}")]
    FolderNotFound(PathBuf),

    #[error("No notes tagged '{0}' were found")]
    NoTaggedNotes(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),
}

impl PressError {
    /// Returns the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            PressError::SourceNotFound(_) | PressError::FolderNotFound(_) => {
                exit_code::SOURCE_NOT_FOUND
            }
            PressError::NoInput | PressError::NoTaggedNotes(_) => exit_code::NO_INPUT,
            PressError::ConfigError(_) | PressError::TomlParse(_) => exit_code::INVALID_CONFIG,
            _ => exit_code::GENERAL_ERROR,
        }
    }
}

/// Result type alias for Vaultpress operations.
pub type Result<T> = std::result::Result<T, PressError>;

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success,
    GeneralError,
    SourceNotFound,
    NoInput,
    InvalidConfig,
}

impl ExitCode {
    /// Convert to exit code integer.
    pub fn code(self) -> i32 {
        match self {
            ExitCode::Success => exit_code::SUCCESS,
            ExitCode::GeneralError => exit_code::GENERAL_ERROR,
            ExitCode::SourceNotFound => exit_code::SOURCE_NOT_FOUND,
            ExitCode::NoInput => exit_code::NO_INPUT,
            ExitCode::InvalidConfig => exit_code::INVALID_CONFIG,
        }
    }
}
