//! Error types for building unified trees.

use thiserror::Error;

use crate::DocumentFormat;

/// Errors that can occur while turning source text into a unified tree.
///
/// Syntax errors in the document are not reported here; they become error
/// regions inside the tree.
#[derive(Debug, Error)]
pub enum AstError {
    /// The grammar could not be loaded into the parser.
    #[error("failed to load {format} grammar: {message}")]
    GrammarLoad {
        format: DocumentFormat,
        message: String,
    },

    /// The parser returned no tree.
    #[error("{format} parser produced no tree")]
    NoTree { format: DocumentFormat },
}

/// Result type for tree construction.
pub type AstResult<T> = Result<T, AstError>;
