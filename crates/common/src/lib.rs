//! Common types and utilities for the opgen operation generator
//!
//! This crate contains the operation data model, the shared error type and
//! the generator configuration used across the parser, generator and CLI.

mod config;
mod docstring;
mod model;
pub mod naming;

pub use config::GeneratorConfig;
pub use docstring::docstring;
pub use model::{Api, HttpInfo, Operation, Paginator, ShapeRef};

use thiserror::Error;

/// Errors that can occur during operation generation
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Parse error: {0}")]
    Parse(String),

    /// The operation template could not be applied to an operation
    #[error("Template error: {0}")]
    Template(String),

    /// Rendered text is not valid Rust source
    #[error("Generated source is invalid: {message}\n--- rendered source ---\n{source_text}")]
    Format {
        message: String,
        source_text: String,
    },

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_carries_source() {
        let err = GeneratorError::Format {
            message: "expected identifier".to_string(),
            source_text: "fn (".to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("expected identifier"));
        assert!(rendered.contains("fn ("));
    }
}
