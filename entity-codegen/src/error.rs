//! Error types for entity-codegen

use thiserror::Error;

/// Result type alias for entity-codegen operations
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that can occur during code generation
#[derive(Error, Debug)]
pub enum CodegenError {
    #[error("{0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] mysql::Error),

    #[error("Unexpected catalog response: {0}")]
    Catalog(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CodegenError {
    /// Whether this error came from loading or validating the settings file
    pub fn is_config(&self) -> bool {
        matches!(self, CodegenError::Config(_))
    }
}

impl From<config::ConfigError> for CodegenError {
    fn from(err: config::ConfigError) -> Self {
        CodegenError::Config(err.to_string())
    }
}

impl From<mysql::FromRowError> for CodegenError {
    fn from(err: mysql::FromRowError) -> Self {
        CodegenError::Catalog(err.to_string())
    }
}
