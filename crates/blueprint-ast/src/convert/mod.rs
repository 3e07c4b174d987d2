//! Conversion from tree-sitter concrete syntax trees to unified trees.
//!
//! Each format has its own visitor that folds the concrete tree bottom-up
//! into [`Intermediate`] values. The helpers here turn those into mapping,
//! sequence and error-region drafts the same way for both formats.

mod jsonc;
mod yaml;

use std::fmt;

use blueprint_source_map::{LineIndex, Position, Range, offset_to_position};
use serde::{Deserialize, Serialize};
use tree_sitter::{Language, Node, Parser};

use crate::error::{AstError, AstResult};
use crate::node::{NodeDraft, NodeKind, NodeRole};
use crate::traversal::{VisitedChild, bottomup_traverse};
use crate::tree::UnifiedTree;

/// Source syntax of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Yaml,
    /// JSON with comments.
    Jsonc,
}

impl DocumentFormat {
    /// Pick the format from a file name or URI extension; YAML unless it is `.json`/`.jsonc`.
    pub fn from_uri(uri: &str) -> Self {
        let lower = uri.to_ascii_lowercase();
        if lower.ends_with(".jsonc") || lower.ends_with(".json") {
            Self::Jsonc
        } else {
            Self::Yaml
        }
    }

    fn language(self) -> Language {
        match self {
            Self::Yaml => tree_sitter_yaml::LANGUAGE.into(),
            Self::Jsonc => tree_sitter_json::LANGUAGE.into(),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yaml => f.write_str("YAML"),
            Self::Jsonc => f.write_str("JSONC"),
        }
    }
}

/// Parse `source` and convert it into a unified tree.
///
/// Syntax errors never fail the conversion: they become error regions so a
/// half-typed document still answers position queries.
pub fn parse_document(source: &str, format: DocumentFormat) -> AstResult<UnifiedTree> {
    let mut parser = Parser::new();
    parser
        .set_language(&format.language())
        .map_err(|e| AstError::GrammarLoad {
            format,
            message: e.to_string(),
        })?;

    let tree = parser
        .parse(source, None)
        .ok_or(AstError::NoTree { format })?;

    let ctx = ConvertContext::new(source);
    let mut cursor = tree.walk();
    let result = bottomup_traverse(&mut cursor, &mut |node, children| match format {
        DocumentFormat::Yaml => yaml::visit(node, children, &ctx),
        DocumentFormat::Jsonc => jsonc::visit(node, children, &ctx),
    });

    let unified = UnifiedTree::from_draft(ctx.document(result))
        .with_syntax_errors(tree.root_node().has_error());
    tracing::debug!(
        %format,
        nodes = unified.len(),
        error_regions = unified.error_count(),
        "converted concrete syntax tree"
    );
    Ok(unified)
}

/// Partial results of the bottom-up fold.
#[derive(Debug)]
pub(crate) enum Intermediate {
    Node(NodeDraft),
    /// A mapping entry, not yet attached to its mapping.
    Pair(Pair),
    /// A block sequence item; `None` when nothing follows the dash.
    Item(Option<NodeDraft>, Range),
    /// The type tag of a plain scalar's inner token.
    ScalarTag(crate::node::ScalarType),
    /// Anonymous punctuation such as `:` or `,`.
    Token(&'static str),
    Skip,
}

#[derive(Debug)]
pub(crate) struct Pair {
    key: Option<(String, Range)>,
    value: Option<NodeDraft>,
    range: Range,
}

impl Pair {
    pub(crate) fn from_children(range: Range, children: Vec<VisitedChild<Intermediate>>) -> Self {
        let mut key = None;
        let mut value = None;
        for child in children {
            match (child.field_name, child.result) {
                (Some("key"), Intermediate::Node(node)) => {
                    key = Some((node.value.clone().unwrap_or_default(), node.range));
                }
                (Some("value"), Intermediate::Node(node)) => value = Some(node),
                (None, Intermediate::Node(node)) if node.is_error && value.is_none() => {
                    value = Some(node);
                }
                _ => {}
            }
        }
        Self { key, value, range }
    }

    /// The entry's value node, carrying the key as its field role.
    ///
    /// A missing value becomes an open null scalar right after the entry.
    fn into_field(self) -> NodeDraft {
        let end = self.range.end.unwrap_or(self.range.start);
        let value = self
            .value
            .unwrap_or_else(|| NodeDraft::missing(Range::open(end)));
        match self.key {
            Some((name, key_range)) => value.field(name, Some(key_range)),
            None => value,
        }
    }
}

/// Source access shared by the format visitors.
pub(crate) struct ConvertContext<'s> {
    source: &'s str,
    lines: LineIndex,
}

impl<'s> ConvertContext<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            source,
            lines: LineIndex::new(source),
        }
    }

    pub(crate) fn range(&self, node: &Node<'_>) -> Range {
        let start = node.start_position();
        let end = node.end_position();
        Range::new(
            self.lines.position(self.source, start.row, start.column),
            self.lines.position(self.source, end.row, end.column),
        )
    }

    pub(crate) fn text(&self, node: &Node<'_>) -> &'s str {
        self.source
            .get(node.start_byte()..node.end_byte())
            .unwrap_or_default()
    }

    /// Wrap the fold result in a document root spanning the whole source.
    fn document(&self, result: Intermediate) -> NodeDraft {
        let end = offset_to_position(self.source, self.source.len())
            .unwrap_or_else(|| Position::new(1, 1));
        let root = NodeDraft::document(Range::new(Position::new(1, 1), end));
        match result {
            Intermediate::Node(node) => root.with_child(node),
            Intermediate::Pair(pair) => {
                let range = pair.range;
                root.with_child(NodeDraft::mapping(range).with_child(pair.into_field()))
            }
            _ => root,
        }
    }
}

/// Pass a wrapper node's content through.
///
/// Extra error regions next to the content are kept as children of the
/// content so they stay indexed.
pub(crate) fn collapse(children: Vec<VisitedChild<Intermediate>>) -> Intermediate {
    let mut nodes: Vec<NodeDraft> = children
        .into_iter()
        .filter_map(|child| match child.result {
            Intermediate::Node(node) => Some(node),
            _ => None,
        })
        .collect();

    if nodes.len() <= 1 {
        return nodes.pop().map_or(Intermediate::Skip, Intermediate::Node);
    }
    let primary_at = nodes.iter().position(|n| !n.is_error).unwrap_or(0);
    let mut primary = nodes.remove(primary_at);
    primary.children.extend(nodes.into_iter().filter(|n| n.is_error));
    Intermediate::Node(primary)
}

pub(crate) fn mapping(
    range: Range,
    cst_kind: &'static str,
    children: Vec<VisitedChild<Intermediate>>,
) -> NodeDraft {
    let mut mapping = NodeDraft::mapping(range).with_cst_kind(cst_kind);
    for child in children {
        match child.result {
            Intermediate::Pair(pair) => mapping.children.push(pair.into_field()),
            Intermediate::Node(node) if node.is_error => mapping.children.push(node),
            // `{a, b}`: a key without a value
            Intermediate::Node(node) if node.kind == NodeKind::Scalar => {
                let name = node.value.clone().unwrap_or_default();
                let at = node.range.end.unwrap_or(node.range.start);
                mapping.children.push(
                    NodeDraft::missing(Range::open(at)).field(name, Some(node.range)),
                );
            }
            Intermediate::Node(node) => mapping.children.push(node),
            _ => {}
        }
    }
    mapping
}

pub(crate) fn sequence(
    range: Range,
    cst_kind: &'static str,
    children: Vec<VisitedChild<Intermediate>>,
) -> NodeDraft {
    let mut sequence = NodeDraft::sequence(range).with_cst_kind(cst_kind);
    let mut index = 0;
    for child in children {
        let item = match child.result {
            Intermediate::Node(node) if node.is_error => {
                sequence.children.push(node);
                continue;
            }
            Intermediate::Node(node) => node,
            Intermediate::Item(node, item_range) => item_or_missing(node, item_range),
            // `[a: 1]` is a sequence holding a single-entry mapping
            Intermediate::Pair(pair) => {
                let range = pair.range;
                NodeDraft::mapping(range).with_child(pair.into_field())
            }
            _ => continue,
        };
        sequence.children.push(item.item(index));
        index += 1;
    }
    sequence
}

/// A region the parser could not make sense of.
///
/// Recognisable entries and items are kept. A scalar directly followed by a
/// `:` becomes a dangling key so the path still reflects what is being typed.
pub(crate) fn error_region(range: Range, children: Vec<VisitedChild<Intermediate>>) -> NodeDraft {
    let mut region = NodeDraft::error(range);
    let mut index = 0;
    let mut children = children.into_iter().peekable();

    while let Some(child) = children.next() {
        match child.result {
            Intermediate::Pair(pair) => region.children.push(pair.into_field()),
            Intermediate::Item(node, item_range) => {
                region
                    .children
                    .push(item_or_missing(node, item_range).item(index));
                index += 1;
            }
            Intermediate::Node(node) => {
                let keyed = matches!(
                    children.peek(),
                    Some(VisitedChild {
                        result: Intermediate::Token(":"),
                        ..
                    })
                );
                if keyed && node.kind == NodeKind::Scalar {
                    region.children.push(dangling_key(node));
                } else {
                    region.children.push(node);
                }
            }
            _ => {}
        }
    }
    region
}

fn item_or_missing(node: Option<NodeDraft>, item_range: Range) -> NodeDraft {
    node.unwrap_or_else(|| {
        NodeDraft::missing(Range::open(item_range.end.unwrap_or(item_range.start)))
    })
}

fn dangling_key(mut node: NodeDraft) -> NodeDraft {
    let name = node.value.clone().unwrap_or_default();
    node.kind = NodeKind::Key;
    node.scalar_type = None;
    node.key_range = Some(node.range);
    node.role = NodeRole::Field(name);
    node
}

/// Strip one layer of quotes; an unterminated string only loses its opening quote.
pub(crate) fn unquote(text: &str, quote: char) -> &str {
    let inner = text.strip_prefix(quote).unwrap_or(text);
    inner.strip_suffix(quote).unwrap_or(inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_uri() {
        assert_eq!(DocumentFormat::from_uri("file:///a/app.blueprint.yaml"), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_uri("app.yml"), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_uri("app.jsonc"), DocumentFormat::Jsonc);
        assert_eq!(DocumentFormat::from_uri("APP.JSON"), DocumentFormat::Jsonc);
        assert_eq!(DocumentFormat::from_uri("no-extension"), DocumentFormat::Yaml);
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\"abc\"", '"'), "abc");
        assert_eq!(unquote("\"ab", '"'), "ab");
        assert_eq!(unquote("'x'", '\''), "x");
        assert_eq!(unquote("plain", '"'), "plain");
    }
}
