//! Error types for document analysis.

use blueprint_ast::AstError;
use thiserror::Error;

/// Errors surfaced by snapshot construction and configuration loading.
///
/// Position queries never fail; they report absence instead.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Ast(#[from] AstError),

    #[error("document not open: {uri}")]
    UnknownDocument { uri: String },

    #[error("invalid analysis configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}

/// Result type for document analysis.
pub type CoreResult<T> = Result<T, CoreError>;
