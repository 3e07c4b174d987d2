//! Format-agnostic document trees for blueprint files.
//!
//! Blueprints are written in YAML (block or flow style) or JSONC. This
//! crate turns any of those into one [`UnifiedTree`] and answers
//! position queries over it.
//!
//! ```text
//!  source ──tree-sitter──▶ concrete tree ──convert──▶ UnifiedTree
//!                                                        │
//!                                         PositionIndex ◀┘ (line buckets)
//!                                                        │
//!                                   NodeRef::path() ─────▶ StructuredPath
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use blueprint_ast::{DocumentFormat, PositionIndex, parse_document};
//! use blueprint_source_map::Position;
//!
//! let tree = parse_document("resources:\n  orders:\n    type: aws/table\n", DocumentFormat::Yaml)?;
//! let index = PositionIndex::build(Arc::new(tree));
//!
//! let node = index.deepest_node_at_position(Position::new(3, 12), 1).unwrap();
//! assert!(node.path().is_resource_type());
//! ```

pub mod convert;
pub mod error;
pub mod index;
pub mod node;
pub mod path;
pub mod traversal;
pub mod tree;

pub use convert::{DocumentFormat, parse_document};
pub use error::{AstError, AstResult};
pub use index::PositionIndex;
pub use node::{NodeDraft, NodeId, NodeKind, NodeRole, ScalarType, UnifiedNode};
pub use path::{PathSegment, StructuredPath};
pub use tree::{NodeRef, UnifiedTree};
