//! Hover context selection over the semantic tree.

use blueprint_schema::{ReferenceTarget, SchemaElement, SchemaElementKind, TreeNode};
use blueprint_source_map::Position;

/// The semantic node a hover popup describes.
#[derive(Debug, Clone)]
pub struct HoverContext<'a> {
    pub kind: SchemaElementKind,
    pub element: Option<&'a SchemaElement>,
    pub tree_node: &'a TreeNode,
    /// Collected nodes above `tree_node`, shallowest first.
    pub ancestors: Vec<&'a TreeNode>,
    /// Collected nodes below `tree_node`; none of them supports hover.
    pub descendants: Vec<&'a TreeNode>,
}

impl HoverContext<'_> {
    /// The reference made by the hovered element, if it is one.
    pub fn reference_target(&self) -> Option<ReferenceTarget> {
        self.element.and_then(SchemaElement::reference_target)
    }
}

/// Pick the deepest hoverable node from a shallow-to-deep chain.
///
/// Returns `None` when `collected` is empty or nothing in it supports hover.
pub fn determine_hover_context<'a>(collected: &[&'a TreeNode]) -> Option<HoverContext<'a>> {
    let at = collected
        .iter()
        .rposition(|node| node.kind().supports_hover())?;
    let tree_node = collected[at];
    Some(HoverContext {
        kind: tree_node.kind(),
        element: tree_node.element.as_ref(),
        tree_node,
        ancestors: collected[..at].to_vec(),
        descendants: collected[at + 1..].to_vec(),
    })
}

/// Collect the chain at `position` under `root` and pick the hover target.
pub fn hover_context_at(root: &TreeNode, position: Position) -> Option<HoverContext<'_>> {
    determine_hover_context(&root.collect_at_position(position))
}

#[cfg(test)]
mod tests {
    use super::*;
    use blueprint_schema::{Resource, StringOrSubstitution, StringOrSubstitutions, Substitution};
    use blueprint_source_map::Range;
    use pretty_assertions::assert_eq;

    fn node(label: &str, element: Option<SchemaElement>) -> TreeNode {
        let range = Range::new(Position::new(1, 1), Position::new(10, 1));
        let node = TreeNode::new(label, format!("/{label}"), range);
        match element {
            Some(element) => node.with_element(element),
            None => node,
        }
    }

    fn resource(name: &str) -> SchemaElement {
        SchemaElement::Resource(Resource {
            name: name.to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_empty_chain_has_no_hover() {
        assert!(determine_hover_context(&[]).is_none());
    }

    #[test]
    fn test_chain_without_hoverable_nodes() {
        let a = node("a", None);
        let b = node("b", None);
        assert!(determine_hover_context(&[&a, &b]).is_none());
    }

    #[test]
    fn test_deepest_hoverable_wins() {
        let root = node("blueprint", None);
        let resources = node("resources", Some(SchemaElement::ResourceMap));
        let orders = node("orders", Some(resource("orders")));
        let trailing = node("trailing", None);

        let chain = [&root, &resources, &orders, &trailing];
        let hover = determine_hover_context(&chain).unwrap();

        assert_eq!(hover.tree_node.label, "orders");
        assert_eq!(hover.kind, SchemaElementKind::Resource);
        let ancestors: Vec<_> = hover.ancestors.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(ancestors, vec!["blueprint", "resources"]);
        let descendants: Vec<_> = hover.descendants.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(descendants, vec!["trailing"]);
    }

    #[test]
    fn test_reference_target_of_hovered_substitution() {
        let string = node(
            "image",
            Some(SchemaElement::StringOrSubstitutions(StringOrSubstitutions {
                values: vec![StringOrSubstitution::String("repo/".to_string())],
            })),
        );
        let reference = node(
            "ref",
            Some(SchemaElement::Substitution(Substitution::Variable {
                name: "tag".to_string(),
            })),
        );

        let hover = determine_hover_context(&[&string, &reference]).unwrap();
        assert_eq!(hover.kind, SchemaElementKind::VariableRef);
        assert_eq!(hover.ancestors.len(), 1);
        let target = hover.reference_target().unwrap();
        assert_eq!(target.name, Some("tag".to_string()));
    }
}
