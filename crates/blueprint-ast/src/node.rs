//! Node types shared by every concrete syntax.

use std::fmt;

use blueprint_source_map::Range;
use serde::{Deserialize, Serialize};

/// Index of a node inside its [`crate::UnifiedTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Structural kind of a unified node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Document,
    Mapping,
    Sequence,
    Scalar,
    /// A mapping key the parser could not pair with a value.
    Key,
    /// A region the parser reported as erroneous.
    Error,
}

impl NodeKind {
    pub fn is_container(self) -> bool {
        matches!(self, Self::Mapping | Self::Sequence)
    }
}

/// Type tag of a scalar value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
    String,
    Integer,
    Float,
    Boolean,
    Null,
}

impl ScalarType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Null => "null",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The role a node plays in its parent.
///
/// A node is either a mapping entry (field), a sequence item (index) or
/// neither (the root, a document's content, loose fragments of an error
/// region). Only the first two contribute a segment to the node's path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum NodeRole {
    Field(String),
    Index(usize),
    #[default]
    None,
}

impl NodeRole {
    pub fn field_name(&self) -> Option<&str> {
        match self {
            Self::Field(name) => Some(name),
            _ => None,
        }
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Index(index) => Some(*index),
            _ => None,
        }
    }
}

/// One node of the format-agnostic tree.
#[derive(Debug, Clone)]
pub struct UnifiedNode {
    pub kind: NodeKind,
    pub range: Range,
    /// Range of the key when this node is a mapping entry's value.
    pub key_range: Option<Range>,
    /// Literal text for scalars and keys.
    pub value: Option<String>,
    pub scalar_type: Option<ScalarType>,
    pub role: NodeRole,
    pub is_error: bool,
    /// The concrete-syntax kind this node was built from, e.g. `block_mapping`.
    pub cst_kind: Option<&'static str>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) depth: usize,
}

/// Owned description of a node and its subtree.
///
/// Converters build drafts bottom-up; [`crate::UnifiedTree::from_draft`]
/// then links them into the arena in one pass.
#[derive(Debug, Clone)]
pub struct NodeDraft {
    pub kind: NodeKind,
    pub range: Range,
    pub key_range: Option<Range>,
    pub value: Option<String>,
    pub scalar_type: Option<ScalarType>,
    pub role: NodeRole,
    pub is_error: bool,
    pub cst_kind: Option<&'static str>,
    pub children: Vec<NodeDraft>,
}

impl NodeDraft {
    pub fn new(kind: NodeKind, range: Range) -> Self {
        Self {
            kind,
            range,
            key_range: None,
            value: None,
            scalar_type: None,
            role: NodeRole::None,
            is_error: kind == NodeKind::Error,
            cst_kind: None,
            children: Vec::new(),
        }
    }

    pub fn document(range: Range) -> Self {
        Self::new(NodeKind::Document, range)
    }

    pub fn mapping(range: Range) -> Self {
        Self::new(NodeKind::Mapping, range)
    }

    pub fn sequence(range: Range) -> Self {
        Self::new(NodeKind::Sequence, range)
    }

    pub fn scalar(value: impl Into<String>, scalar_type: ScalarType, range: Range) -> Self {
        let mut draft = Self::new(NodeKind::Scalar, range);
        draft.value = Some(value.into());
        draft.scalar_type = Some(scalar_type);
        draft
    }

    /// The placeholder value of a mapping entry or item that has no content yet.
    pub fn missing(range: Range) -> Self {
        Self::scalar("", ScalarType::Null, range)
    }

    pub fn error(range: Range) -> Self {
        Self::new(NodeKind::Error, range)
    }

    /// Attach this node to a mapping under `name`.
    pub fn field(mut self, name: impl Into<String>, key_range: Option<Range>) -> Self {
        self.role = NodeRole::Field(name.into());
        self.key_range = key_range;
        self
    }

    /// Attach this node to a sequence at `index`.
    pub fn item(mut self, index: usize) -> Self {
        self.role = NodeRole::Index(index);
        self
    }

    pub fn with_cst_kind(mut self, cst_kind: &'static str) -> Self {
        self.cst_kind = Some(cst_kind);
        self
    }

    pub fn with_child(mut self, child: NodeDraft) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = NodeDraft>) -> Self {
        self.children.extend(children);
        self
    }

    pub(crate) fn into_node(
        self,
        parent: Option<NodeId>,
        depth: usize,
    ) -> (UnifiedNode, Vec<NodeDraft>) {
        let node = UnifiedNode {
            kind: self.kind,
            range: self.range,
            key_range: self.key_range,
            value: self.value,
            scalar_type: self.scalar_type,
            role: self.role,
            is_error: self.is_error,
            cst_kind: self.cst_kind,
            parent,
            children: Vec::new(),
            depth,
        };
        (node, self.children)
    }
}
