//! The unified node tree: an arena of [`UnifiedNode`]s plus borrowed handles.

use std::fmt;

use blueprint_source_map::{Position, Range};

use crate::node::{NodeDraft, NodeId, NodeKind, NodeRole, ScalarType, UnifiedNode};
use crate::path::{PathSegment, StructuredPath};

/// A format-agnostic document tree.
///
/// Nodes live in one vector in document (pre-)order, the root first. Parent
/// links are plain indices, so the tree is torn down as a unit and never
/// mutated after construction.
#[derive(Debug, Clone)]
pub struct UnifiedTree {
    nodes: Vec<UnifiedNode>,
    /// The parser reported errors, including ones recovered by inserting
    /// missing tokens that leave no error region behind.
    syntax_errors: bool,
}

impl UnifiedTree {
    /// Link a draft tree into an arena.
    pub fn from_draft(root: NodeDraft) -> Self {
        let mut nodes: Vec<UnifiedNode> = Vec::new();
        let mut stack: Vec<(NodeDraft, Option<NodeId>, usize)> = vec![(root, None, 0)];

        while let Some((draft, parent, depth)) = stack.pop() {
            let id = NodeId(nodes.len());
            let (node, children) = draft.into_node(parent, depth);
            nodes.push(node);
            if let Some(parent) = parent {
                nodes[parent.0].children.push(id);
            }
            // reversed so the first child is popped (and numbered) first
            for child in children.into_iter().rev() {
                stack.push((child, Some(id), depth + 1));
            }
        }

        Self {
            nodes,
            syntax_errors: false,
        }
    }

    pub(crate) fn with_syntax_errors(mut self, syntax_errors: bool) -> Self {
        self.syntax_errors = syntax_errors;
        self
    }

    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            tree: self,
            id: NodeId(0),
        }
    }

    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.0 < self.nodes.len()).then_some(NodeRef { tree: self, id })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in document order.
    pub fn iter(&self) -> impl Iterator<Item = NodeRef<'_>> {
        (0..self.nodes.len()).map(move |i| NodeRef {
            tree: self,
            id: NodeId(i),
        })
    }

    pub fn error_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_error).count()
    }

    /// Whether this tree came from input that did not parse cleanly.
    pub fn has_errors(&self) -> bool {
        self.syntax_errors || self.nodes.iter().any(|node| node.is_error)
    }
}

/// A borrowed handle to one node of a [`UnifiedTree`].
#[derive(Clone, Copy)]
pub struct NodeRef<'t> {
    tree: &'t UnifiedTree,
    id: NodeId,
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id.0)
            .field("kind", &self.kind())
            .field("path", &self.path().to_string())
            .finish()
    }
}

impl<'t> NodeRef<'t> {
    pub fn id(self) -> NodeId {
        self.id
    }

    pub fn tree(self) -> &'t UnifiedTree {
        self.tree
    }

    pub fn data(self) -> &'t UnifiedNode {
        &self.tree.nodes[self.id.0]
    }

    pub fn kind(self) -> NodeKind {
        self.data().kind
    }

    pub fn range(self) -> Range {
        self.data().range
    }

    pub fn key_range(self) -> Option<Range> {
        self.data().key_range
    }

    pub fn value(self) -> Option<&'t str> {
        self.data().value.as_deref()
    }

    pub fn scalar_type(self) -> Option<ScalarType> {
        self.data().scalar_type
    }

    pub fn role(self) -> &'t NodeRole {
        &self.data().role
    }

    pub fn field_name(self) -> Option<&'t str> {
        self.data().role.field_name()
    }

    pub fn index(self) -> Option<usize> {
        self.data().role.index()
    }

    pub fn is_error(self) -> bool {
        self.data().is_error
    }

    pub fn cst_kind(self) -> Option<&'static str> {
        self.data().cst_kind
    }

    /// Number of ancestors between this node and the root.
    pub fn depth(self) -> usize {
        self.data().depth
    }

    pub fn is_root(self) -> bool {
        self.data().parent.is_none()
    }

    /// An entry whose value has not been written yet (`spec:` with nothing after it).
    pub fn is_missing_value(self) -> bool {
        let node = self.data();
        node.kind == NodeKind::Scalar
            && node.scalar_type == Some(ScalarType::Null)
            && node.value.as_deref().is_none_or(str::is_empty)
    }

    pub fn parent(self) -> Option<NodeRef<'t>> {
        self.data().parent.map(|id| NodeRef {
            tree: self.tree,
            id,
        })
    }

    /// Parent, grandparent, ... up to the root.
    pub fn ancestors(self) -> impl Iterator<Item = NodeRef<'t>> {
        std::iter::successors(self.parent(), |node| node.parent())
    }

    pub fn children(self) -> impl DoubleEndedIterator<Item = NodeRef<'t>> {
        let tree = self.tree;
        self.data()
            .children
            .iter()
            .map(move |&id| NodeRef { tree, id })
    }

    pub fn child_count(self) -> usize {
        self.data().children.len()
    }

    pub fn last_child(self) -> Option<NodeRef<'t>> {
        self.children().next_back()
    }

    pub fn next_sibling(self) -> Option<NodeRef<'t>> {
        let parent = self.parent()?;
        let siblings = &parent.data().children;
        let at = siblings.iter().position(|&id| id == self.id)?;
        siblings.get(at + 1).map(|&id| NodeRef {
            tree: self.tree,
            id,
        })
    }

    /// Where the entry begins: the key for mapping entries, the node otherwise.
    pub fn entry_start(self) -> Position {
        self.key_range().unwrap_or(self.range()).start
    }

    /// Column that determines block indentation for this node.
    ///
    /// Mapping entries anchor at their key, sequence items at their parent
    /// sequence (the dash column), everything else at its own start.
    pub fn anchor_column(self) -> u32 {
        match self.role() {
            NodeRole::Field(_) => self.entry_start().column,
            NodeRole::Index(_) => self
                .parent()
                .map_or(self.range().start.column, |seq| seq.range().start.column),
            NodeRole::None => self.range().start.column,
        }
    }

    pub fn contains(self, pos: Position, leeway: u32) -> bool {
        self.range().contains_with_leeway(pos, leeway)
    }

    /// Descend through the first child containing `pos` until none does.
    pub fn deepest_child_at(self, pos: Position, leeway: u32) -> NodeRef<'t> {
        let mut current = self;
        while let Some(child) = current.children().find(|c| c.contains(pos, leeway)) {
            current = child;
        }
        current
    }

    /// The semantic location of this node.
    ///
    /// Only fields and indices contribute segments; the document root and
    /// other role-less wrappers are skipped.
    pub fn path(self) -> StructuredPath {
        let mut segments: Vec<PathSegment> = std::iter::once(self)
            .chain(self.ancestors())
            .filter_map(|node| match node.role() {
                NodeRole::Field(name) => Some(PathSegment::Field(name.clone())),
                NodeRole::Index(index) => Some(PathSegment::Index(*index)),
                NodeRole::None => None,
            })
            .collect();
        segments.reverse();
        StructuredPath::new(segments)
    }
}
