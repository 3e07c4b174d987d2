//! Document outline.
//!
//! The outline mirrors the unified tree: one file symbol for the document,
//! object and array symbols for containers, leaf symbols for scalars. Error
//! regions are not shown themselves; whatever was recovered inside them is
//! listed in their place.

use blueprint_ast::{NodeKind, NodeRef, UnifiedTree};
use blueprint_source_map::{Position, Range};

use crate::config::AnalysisConfig;
use crate::document::DocumentSnapshot;
use crate::types::{Symbol, SymbolKind};

const DOCUMENT_SYMBOL_NAME: &str = "document";
const UNNAMED_SYMBOL_NAME: &str = "content";

/// Outline of `tree` with default settings.
///
/// `total_lines` is the document's line count; the file symbol always
/// reaches it, so trailing blank lines belong to the outline.
pub fn build_document_symbols(tree: &UnifiedTree, total_lines: u32) -> Vec<Symbol> {
    build_document_symbols_with(tree, total_lines, &AnalysisConfig::default())
}

pub fn build_document_symbols_with(
    tree: &UnifiedTree,
    total_lines: u32,
    config: &AnalysisConfig,
) -> Vec<Symbol> {
    let root = tree.root();
    let builder = SymbolBuilder {
        total_lines,
        config,
    };

    let start = root.range().start;
    let end_line = total_lines.max(start.line);
    let end_column = match root.range().end {
        Some(end) if end.line == end_line => end.column,
        _ => 1,
    };
    let range = Range::new(start, Position::new(end_line, end_column));

    let symbol = Symbol::new(DOCUMENT_SYMBOL_NAME, SymbolKind::File, range, range)
        .with_children(builder.children_of(root, range.end));
    vec![symbol]
}

/// Outline of a parsed snapshot.
pub fn get_symbols(snapshot: &DocumentSnapshot, config: &AnalysisConfig) -> Vec<Symbol> {
    build_document_symbols_with(snapshot.tree(), snapshot.total_lines(), config)
}

struct SymbolBuilder<'c> {
    total_lines: u32,
    config: &'c AnalysisConfig,
}

impl SymbolBuilder<'_> {
    /// Symbols for the children of `parent`. `limit` is where the parent's
    /// own symbol ends; the last child never extends past it.
    fn children_of(&self, parent: NodeRef<'_>, limit: Option<Position>) -> Vec<Symbol> {
        let mut symbols = Vec::new();
        for child in parent.children() {
            let next = child.next_sibling().map(NodeRef::entry_start).or(limit);
            if child.kind() == NodeKind::Error {
                symbols.extend(self.children_of(child, next));
            } else {
                symbols.push(self.symbol_for(child, next));
            }
        }
        symbols
    }

    fn symbol_for(&self, node: NodeRef<'_>, next: Option<Position>) -> Symbol {
        let start = node.entry_start();
        let children = self.children_of(node, node.range().end.or(next));

        let inferred = node
            .range()
            .end
            .or_else(|| children.last().and_then(|c| c.range.end))
            .or(next)
            .unwrap_or_else(|| Position::new(self.total_lines, 1));
        let end = match next {
            Some(next) if inferred > next => next,
            _ => inferred,
        }
        .max(start);
        let range = Range::new(start, end);

        let selection_range = node.key_range().unwrap_or_else(|| {
            let value = node.range();
            Range::new(value.start.max(start), value.end.unwrap_or(end).min(end))
        });

        let mut symbol = Symbol::new(symbol_name(node), symbol_kind(node), range, selection_range)
            .with_children(children);
        if self.config.scalar_symbol_detail && node.kind() == NodeKind::Scalar {
            if let Some(value) = node.value().filter(|v| !v.is_empty()) {
                symbol = symbol.with_detail(value);
            }
        }
        symbol
    }
}

fn symbol_name(node: NodeRef<'_>) -> String {
    if let Some(name) = node.field_name() {
        name.to_string()
    } else if let Some(index) = node.index() {
        format!("[{index}]")
    } else {
        UNNAMED_SYMBOL_NAME.to_string()
    }
}

fn symbol_kind(node: NodeRef<'_>) -> SymbolKind {
    match node.kind() {
        NodeKind::Document => SymbolKind::File,
        NodeKind::Mapping | NodeKind::Error => SymbolKind::Object,
        NodeKind::Sequence => SymbolKind::Array,
        NodeKind::Scalar => SymbolKind::for_scalar(node.scalar_type()),
        NodeKind::Key => SymbolKind::Key,
    }
}
