//! Per-query node context.

use blueprint_ast::{DocumentFormat, NodeKind, NodeRef, PositionIndex, StructuredPath};
use blueprint_schema::{SchemaElement, TreeNode};
use blueprint_source_map::{Position, line_count};

use crate::config::AnalysisConfig;
use crate::hover::{HoverContext, determine_hover_context};
use crate::style::{
    ContainerKind, SyntacticPosition, SyntacticStyle, detect_position, detect_style,
    extract_typed_prefix,
};
use crate::text::{self, TextContext};

/// Everything known about one cursor position.
///
/// Combines the unified node under the cursor, the semantic node (when the
/// document validated) and the raw text of the cursor's line. A context
/// built from a last-known-good snapshot has `stale` set; its text fields
/// still come from the current content.
#[derive(Debug, Clone)]
pub struct NodeContext<'a> {
    pub position: Position,
    pub format: DocumentFormat,
    /// Deepest unified node at the cursor.
    pub node: Option<NodeRef<'a>>,
    pub path: StructuredPath,
    /// Ancestors of `node`, shallowest first.
    pub ancestors: Vec<NodeRef<'a>>,
    /// Node whose value the cursor's indentation places it in (YAML only).
    pub enclosing: Option<NodeRef<'a>>,
    /// Semantic nodes containing the cursor, shallowest first.
    pub semantic_chain: Vec<&'a TreeNode>,
    pub tree_node: Option<&'a TreeNode>,
    pub schema_element: Option<&'a SchemaElement>,
    pub text: TextContext,
    pub stale: bool,
}

impl<'a> NodeContext<'a> {
    /// A context with text fields only, for documents with no tree.
    pub fn from_text(content: &str, position: Position, format: DocumentFormat) -> Self {
        Self {
            position,
            format,
            node: None,
            path: StructuredPath::default(),
            ancestors: Vec::new(),
            enclosing: None,
            semantic_chain: Vec::new(),
            tree_node: None,
            schema_element: None,
            text: TextContext::extract(content, position),
            stale: false,
        }
    }

    /// Assemble the context for `position`.
    ///
    /// In YAML, a whitespace-only line (or a cursor only the root covers)
    /// takes its node from the indentation of the surrounding lines. A line
    /// outside the content gets a text-only context.
    pub fn build(
        index: &'a PositionIndex,
        content: &str,
        position: Position,
        format: DocumentFormat,
        semantic: Option<&'a TreeNode>,
        config: &AnalysisConfig,
    ) -> Self {
        let mut ctx = Self::from_text(content, position, format);
        if position.line == 0 || position.line > line_count(content) {
            return ctx;
        }

        if format == DocumentFormat::Yaml {
            ctx.enclosing =
                Some(index.enclosing_by_indentation(position.line, ctx.text.indentation_column()));
        }

        let direct = index.deepest_node_at_position(position, config.position_leeway);
        let node = match direct {
            Some(node) if format == DocumentFormat::Jsonc => Some(node),
            Some(node) if !node.is_root() && !ctx.text.is_blank_line() => Some(node),
            _ => ctx.enclosing.or(direct),
        };

        if let Some(node) = node {
            ctx.path = node.path();
            ctx.ancestors = node.ancestors().collect();
            ctx.ancestors.reverse();
        }
        ctx.node = node;

        if let Some(root) = semantic {
            ctx.semantic_chain = root.collect_at_position(position);
            ctx.tree_node = ctx.semantic_chain.last().copied();
            ctx.schema_element = ctx.tree_node.and_then(|n| n.element.as_ref());
        }
        ctx
    }

    pub fn with_stale(mut self, stale: bool) -> Self {
        self.stale = stale;
        self
    }

    pub fn text_before(&self) -> &str {
        &self.text.text_before
    }

    pub fn text_after(&self) -> &str {
        &self.text.text_after
    }

    pub fn current_word(&self) -> &str {
        &self.text.current_word
    }

    pub fn current_line(&self) -> &str {
        &self.text.current_line
    }

    pub fn is_blank_line(&self) -> bool {
        self.text.is_blank_line()
    }

    pub fn indentation_column(&self) -> u32 {
        self.text.indentation_column()
    }

    pub fn in_substitution(&self) -> bool {
        text::in_substitution(self.text_before())
    }

    pub fn substitution_text(&self) -> &str {
        text::substitution_text(self.text_before())
    }

    /// The node and its ancestors, deepest first.
    pub fn node_chain(&self) -> impl Iterator<Item = NodeRef<'a>> + '_ {
        self.node
            .into_iter()
            .chain(self.ancestors.iter().rev().copied())
    }

    /// The nearest mapping or sequence around the cursor. The document root
    /// counts as a mapping.
    pub fn nearest_container(&self) -> Option<ContainerKind> {
        self.node_chain().find_map(|node| match node.kind() {
            NodeKind::Mapping | NodeKind::Document => Some(ContainerKind::Mapping),
            NodeKind::Sequence => Some(ContainerKind::Sequence),
            _ => None,
        })
    }

    pub fn syntactic_style(&self) -> SyntacticStyle {
        detect_style(
            self.format,
            self.node_chain().filter_map(|node| node.cst_kind()),
            self.text_before(),
        )
    }

    pub fn syntactic_position(&self) -> SyntacticPosition {
        detect_position(
            self.syntactic_style(),
            self.text_before(),
            self.text_after(),
            self.nearest_container(),
        )
    }

    pub fn typed_prefix(&self) -> String {
        extract_typed_prefix(
            self.syntactic_position(),
            self.syntactic_style(),
            self.text_before(),
        )
    }

    /// The node whose fields a key typed at the cursor would belong to.
    ///
    /// Block YAML goes by indentation; flow styles by the nearest mapping.
    pub fn field_container(&self) -> Option<NodeRef<'a>> {
        match self.syntactic_style() {
            SyntacticStyle::BlockYaml => self.enclosing.or(self.node),
            SyntacticStyle::FlowYaml | SyntacticStyle::Jsonc => self
                .node_chain()
                .find(|node| matches!(node.kind(), NodeKind::Mapping | NodeKind::Document)),
        }
    }

    pub fn hover_context(&self) -> Option<HoverContext<'a>> {
        determine_hover_context(&self.semantic_chain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use blueprint_ast::parse_document;
    use pretty_assertions::assert_eq;

    fn index(source: &str, format: DocumentFormat) -> PositionIndex {
        PositionIndex::build(Arc::new(parse_document(source, format).unwrap()))
    }

    #[test]
    fn test_from_text_has_no_node() {
        let ctx =
            NodeContext::from_text("a: ${resources.", Position::new(1, 16), DocumentFormat::Yaml);
        assert!(ctx.node.is_none());
        assert!(ctx.path.is_empty());
        assert!(ctx.in_substitution());
        assert_eq!(ctx.substitution_text(), "resources.");
        assert!(!ctx.stale);
    }

    #[test]
    fn test_build_on_value() {
        let source = "resources:\n  orders:\n    type: aws/table\n";
        let index = index(source, DocumentFormat::Yaml);
        let ctx = NodeContext::build(
            &index,
            source,
            Position::new(3, 12),
            DocumentFormat::Yaml,
            None,
            &AnalysisConfig::default(),
        );
        assert_eq!(ctx.path.to_string(), "/resources/orders/type");
        assert_eq!(ctx.text_before(), "    type: a");
        assert_eq!(ctx.current_word(), "aws");
        assert_eq!(ctx.ancestors.first().map(|n| n.is_root()), Some(true));
        assert_eq!(ctx.syntactic_style(), SyntacticStyle::BlockYaml);
        assert_eq!(ctx.syntactic_position(), SyntacticPosition::ValueField);
    }

    #[test]
    fn test_blank_line_uses_indentation() {
        let source = "resources:\n  orders:\n    type: aws/table\n    \n";
        let index = index(source, DocumentFormat::Yaml);
        let ctx = NodeContext::build(
            &index,
            source,
            Position::new(4, 5),
            DocumentFormat::Yaml,
            None,
            &AnalysisConfig::default(),
        );
        assert_eq!(ctx.path.to_string(), "/resources/orders");
        assert_eq!(ctx.nearest_container(), Some(ContainerKind::Mapping));
        assert_eq!(ctx.syntactic_position(), SyntacticPosition::KeyField);
    }

    #[test]
    fn test_line_past_the_end_has_no_node() {
        let source = "version: \"1\"\nresources:\n  orders:\n";
        let index = index(source, DocumentFormat::Yaml);
        for line in [5, 1_000_000, u32::MAX] {
            let ctx = NodeContext::build(
                &index,
                source,
                Position::new(line, 3),
                DocumentFormat::Yaml,
                None,
                &AnalysisConfig::default(),
            );
            assert!(ctx.node.is_none());
            assert!(ctx.enclosing.is_none());
            assert!(ctx.path.is_empty());
            assert_eq!(ctx.text_before(), "");
        }
    }

    #[test]
    fn test_jsonc_uses_direct_lookup() {
        let source = "{\n  \"resources\": {\n    \"orders\": { \"type\": \"aws/table\" }\n  }\n}\n";
        let index = index(source, DocumentFormat::Jsonc);
        let ctx = NodeContext::build(
            &index,
            source,
            Position::new(3, 29),
            DocumentFormat::Jsonc,
            None,
            &AnalysisConfig::default(),
        );
        assert!(ctx.enclosing.is_none());
        assert_eq!(ctx.path.to_string(), "/resources/orders/type");
        assert_eq!(ctx.syntactic_style(), SyntacticStyle::Jsonc);
    }
}
