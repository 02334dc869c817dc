use thiserror::Error;

use crate::types::TokenType;

/// Main error type for the token-registry crate
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "cli")]
    #[error("Pattern error: {0}")]
    Pattern(#[from] glob::PatternError),

    #[cfg(feature = "cli")]
    #[error("Glob error: {0}")]
    Glob(#[from] glob::GlobError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("A handler for token type '{0}' is already registered")]
    DuplicateType(TokenType),

    #[error("No handler registered for token type '{0}'")]
    UnknownType(TokenType),

    #[error("No handler claimed the value ({context})")]
    NoMatch { context: String },

    #[error("Handler for '{expected}' cannot render a '{found}' value")]
    ValueMismatch { expected: TokenType, found: TokenType },

    #[error("The global registry has already been installed")]
    AlreadyInitialized,

    #[error("No token files found matching the provided patterns")]
    NoFilesFound,

    #[error("Failed to parse file {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Failed to write output to {path}: {message}")]
    OutputError { path: String, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, RegistryError>;
