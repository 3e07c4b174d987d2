//! Semantic layer of blueprint documents.
//!
//! A validator (outside this workspace) loads a blueprint and produces a
//! tree of [`TreeNode`]s, each annotated with a source range and the raw
//! [`SchemaElement`] found there. This crate defines that model and the
//! total classification [`SchemaElementKind::from_element`] that hover and
//! completion logic branch on.

pub mod element;
pub mod kind;
pub mod reference;
pub mod tree;

pub use element::{
    Blueprint, DataSource, DataSourceFieldExport, DataSourceFilter, Export, FunctionArg, Include,
    LinkSelector, MappingNode, Resource, ResourceMetadata, SchemaElement, StringOrSubstitution,
    StringOrSubstitutions, Substitution, SubstitutionPathItem, Value, Variable,
};
pub use kind::SchemaElementKind;
pub use reference::{ReferenceNamespace, ReferenceTarget};
pub use tree::TreeNode;
