//! tree-sitter-yaml visitor.

use tree_sitter::Node;

use super::{
    ConvertContext, Intermediate, Pair, collapse, error_region, mapping, sequence, unquote,
};
use crate::node::{NodeDraft, ScalarType};
use crate::traversal::VisitedChild;

pub(crate) fn visit(
    node: &Node<'_>,
    children: Vec<VisitedChild<Intermediate>>,
    ctx: &ConvertContext<'_>,
) -> Intermediate {
    if node.is_missing() {
        return Intermediate::Skip;
    }
    if node.is_error() {
        return Intermediate::Node(error_region(ctx.range(node), children));
    }
    if !node.is_named() {
        return Intermediate::Token(node.kind());
    }

    let range = ctx.range(node);
    match node.kind() {
        // only the first document of a stream is modelled
        "stream" => {
            let mut seen_document = false;
            let kept = children
                .into_iter()
                .filter(|child| {
                    if child.kind == "document" && !seen_document {
                        seen_document = true;
                        true
                    } else {
                        child.kind == "ERROR"
                    }
                })
                .collect();
            collapse(kept)
        }
        "document" | "block_node" | "flow_node" => collapse(children),

        "block_mapping" => Intermediate::Node(mapping(range, "block_mapping", children)),
        "flow_mapping" => Intermediate::Node(mapping(range, "flow_mapping", children)),
        "block_mapping_pair" | "flow_pair" => {
            Intermediate::Pair(Pair::from_children(range, children))
        }

        "block_sequence" => Intermediate::Node(sequence(range, "block_sequence", children)),
        "flow_sequence" => Intermediate::Node(sequence(range, "flow_sequence", children)),
        "block_sequence_item" => {
            let item = children.into_iter().find_map(|child| match child.result {
                Intermediate::Node(node) => Some(node),
                _ => None,
            });
            Intermediate::Item(item, range)
        }

        "plain_scalar" => {
            let scalar_type = children
                .iter()
                .find_map(|child| match child.result {
                    Intermediate::ScalarTag(tag) => Some(tag),
                    _ => None,
                })
                .unwrap_or(ScalarType::String);
            Intermediate::Node(
                NodeDraft::scalar(ctx.text(node), scalar_type, range).with_cst_kind("plain_scalar"),
            )
        }
        "string_scalar" => Intermediate::ScalarTag(ScalarType::String),
        "integer_scalar" => Intermediate::ScalarTag(ScalarType::Integer),
        "float_scalar" => Intermediate::ScalarTag(ScalarType::Float),
        "boolean_scalar" => Intermediate::ScalarTag(ScalarType::Boolean),
        "null_scalar" => Intermediate::ScalarTag(ScalarType::Null),

        "double_quote_scalar" => Intermediate::Node(
            NodeDraft::scalar(unquote(ctx.text(node), '"'), ScalarType::String, range)
                .with_cst_kind("double_quote_scalar"),
        ),
        "single_quote_scalar" => Intermediate::Node(
            NodeDraft::scalar(
                unquote(ctx.text(node), '\'').replace("''", "'"),
                ScalarType::String,
                range,
            )
            .with_cst_kind("single_quote_scalar"),
        ),
        "block_scalar" | "alias" => Intermediate::Node(
            NodeDraft::scalar(ctx.text(node), ScalarType::String, range)
                .with_cst_kind(node.kind()),
        ),

        // comments, anchors, tags, escape sequences
        _ => Intermediate::Skip,
    }
}
