//! Line-bucketed lookup from cursor positions to unified nodes.

use std::collections::HashMap;
use std::sync::Arc;

use blueprint_source_map::Position;

use crate::node::NodeId;
use crate::path::StructuredPath;
use crate::tree::{NodeRef, UnifiedTree};

/// Read-only position index over one [`UnifiedTree`] snapshot.
///
/// Every node is bucketed under each line its range spans, so a lookup only
/// looks at the nodes touching the cursor's line. The index owns a shared
/// handle to the tree and can be queried concurrently.
#[derive(Debug, Clone)]
pub struct PositionIndex {
    tree: Arc<UnifiedTree>,
    by_line: HashMap<u32, Vec<NodeId>>,
    /// Non-root nodes keyed by the line their entry (key or item) starts on.
    by_entry_line: HashMap<u32, Vec<NodeId>>,
    max_line: u32,
}

impl PositionIndex {
    pub fn build(tree: Arc<UnifiedTree>) -> Self {
        let mut by_line: HashMap<u32, Vec<NodeId>> = HashMap::new();
        let mut by_entry_line: HashMap<u32, Vec<NodeId>> = HashMap::new();
        let mut max_line = 0;

        for node in tree.iter() {
            let range = node.range();
            let end_line = range.end_line();
            for line in range.start.line..=end_line {
                by_line.entry(line).or_default().push(node.id());
            }
            if !node.is_root() {
                by_entry_line
                    .entry(node.entry_start().line)
                    .or_default()
                    .push(node.id());
            }
            max_line = max_line.max(end_line);
        }

        tracing::trace!(
            nodes = tree.len(),
            lines = by_line.len(),
            max_line,
            "built position index"
        );

        Self {
            tree,
            by_line,
            by_entry_line,
            max_line,
        }
    }

    pub fn tree(&self) -> &UnifiedTree {
        &self.tree
    }

    pub fn root(&self) -> NodeRef<'_> {
        self.tree.root()
    }

    pub fn max_line(&self) -> u32 {
        self.max_line
    }

    /// Every node in the tree, in document order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeRef<'_>> {
        self.tree.iter()
    }

    fn on_line(&self, line: u32) -> impl Iterator<Item = NodeRef<'_>> {
        self.by_line
            .get(&line)
            .into_iter()
            .flatten()
            .filter_map(|&id| self.tree.get(id))
    }

    /// Nodes containing `pos`, shallowest first.
    ///
    /// Nodes of equal depth keep their document order.
    pub fn nodes_at_position(&self, pos: Position, leeway: u32) -> Vec<NodeRef<'_>> {
        let mut hits: Vec<NodeRef<'_>> = self
            .on_line(pos.line)
            .filter(|node| node.contains(pos, leeway))
            .collect();

        // insertion sort: stable, and each line holds only a handful of nodes
        for i in 1..hits.len() {
            let mut j = i;
            while j > 0 && hits[j - 1].depth() > hits[j].depth() {
                hits.swap(j - 1, j);
                j -= 1;
            }
        }
        hits
    }

    pub fn deepest_node_at_position(&self, pos: Position, leeway: u32) -> Option<NodeRef<'_>> {
        self.nodes_at_position(pos, leeway).pop()
    }

    /// Look a node up by its rendered path, e.g. `/resources/orders/type`.
    ///
    /// The empty path and `/` both name the root. Wrapper nodes without a
    /// field or index share their nearest addressed ancestor's path, so the
    /// first node in document order wins.
    pub fn find_node_by_path(&self, path: &str) -> Option<NodeRef<'_>> {
        if path.is_empty() || path == "/" {
            return Some(self.root());
        }
        self.tree.iter().find(|node| node.path().to_string() == path)
    }

    pub fn find_node_by_structured_path(&self, path: &StructuredPath) -> Option<NodeRef<'_>> {
        if path.is_empty() {
            return Some(self.root());
        }
        self.tree.iter().find(|node| node.path() == *path)
    }

    /// The node a block-YAML cursor on a blank line belongs to.
    ///
    /// No range covers whitespace after a block, so this walks back to the
    /// nearest line where some entry starts, takes the deepest entry there and
    /// climbs until it finds a node anchored left of `column`. The cursor then
    /// sits inside that node's value. The scan starts no lower than the
    /// last indexed line.
    pub fn enclosing_by_indentation(&self, line: u32, column: u32) -> NodeRef<'_> {
        let last = line.saturating_sub(1).min(self.max_line);
        for previous in (1..=last).rev() {
            let starting = self
                .by_entry_line
                .get(&previous)
                .into_iter()
                .flatten()
                .filter_map(|&id| self.tree.get(id))
                .max_by_key(|node| node.depth());
            let Some(start) = starting else {
                continue;
            };
            if let Some(found) = std::iter::once(start)
                .chain(start.ancestors())
                .find(|node| node.is_root() || node.anchor_column() < column)
            {
                return found;
            }
        }
        self.root()
    }
}
