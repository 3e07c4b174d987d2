//! tree-sitter-json visitor. The grammar accepts comments, which is all
//! JSONC adds on top of JSON.

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
    let scalar = |value: &str, scalar_type: ScalarType| {
        Intermediate::Node(NodeDraft::scalar(value, scalar_type, range).with_cst_kind(node.kind()))
    };

    match node.kind() {
        "document" => collapse(children),
        "object" => Intermediate::Node(mapping(range, "object", children)),
        "pair" => Intermediate::Pair(Pair::from_children(range, children)),
        "array" => Intermediate::Node(sequence(range, "array", children)),

        "string" => scalar(unquote(ctx.text(node), '"'), ScalarType::String),
        "number" => {
            let text = ctx.text(node);
            if text.contains(['.', 'e', 'E']) {
                scalar(text, ScalarType::Float)
            } else {
                scalar(text, ScalarType::Integer)
            }
        }
        "true" | "false" => scalar(ctx.text(node), ScalarType::Boolean),
        "null" => scalar(ctx.text(node), ScalarType::Null),

        // comments, string_content, escape_sequence
        _ => Intermediate::Skip,
    }
}
