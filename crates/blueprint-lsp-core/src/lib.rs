//! Transport-agnostic language analysis for blueprint documents.
//!
//! Given a document and a 1-based cursor position, this crate works out
//! what the user is pointing at and what they are likely typing. It has no
//! protocol dependencies; a language server converts its answers to wire
//! types.
//!
//! # Architecture
//!
//! ```text
//!   DocumentStore ──parse──▶ DocumentSnapshot (UnifiedTree + PositionIndex)
//!        │                          │
//!        └─ query(uri, position) ──▶ QuerySnapshot (+ stale flag)
//!                                   │ node_context(position, semantic tree)
//!                                   ▼
//!                              NodeContext ──▶ syntactic style / position
//!                                   │
//!               ┌───────────────────┼────────────────────┐
//!               ▼                   ▼                    ▼
//!         HoverContext      CompletionContext        symbols (outline)
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use blueprint_lsp_core::{AnalysisConfig, DocumentStore, determine_completion_context};
//! use blueprint_source_map::Position;
//!
//! let mut store = DocumentStore::new();
//! store.open("app.blueprint.yaml", "resources:\n  orders:\n    type: \n", 1);
//!
//! let config = AnalysisConfig::default();
//! let position = Position::new(3, 11);
//! let query = store.query("app.blueprint.yaml", position, &config).unwrap();
//! let ctx = query.node_context(position, None, &config);
//! let completion = determine_completion_context(&ctx);
//! assert_eq!(completion.kind.as_str(), "resourceType");
//! ```

pub mod completion;
pub mod config;
pub mod context;
pub mod document;
pub mod error;
pub mod hover;
pub mod style;
pub mod symbols;
pub mod text;
pub mod types;

pub use completion::{
    CompletionContext, CompletionContextKind, CompletionPayload, determine_completion_context,
};
pub use config::AnalysisConfig;
pub use context::NodeContext;
pub use document::{Document, DocumentSnapshot, DocumentStore, QuerySnapshot};
pub use error::{CoreError, CoreResult};
pub use hover::{HoverContext, determine_hover_context, hover_context_at};
pub use style::{
    ContainerKind, SyntacticPosition, SyntacticStyle, detect_position, detect_style,
    extract_typed_prefix,
};
pub use symbols::{build_document_symbols, build_document_symbols_with, get_symbols};
pub use text::{TextContext, in_substitution, substitution_text};
pub use types::{Symbol, SymbolKind};
