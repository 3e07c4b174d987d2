//! Position-annotated semantic tree produced by the validator.

use blueprint_source_map::{Position, Range};
use serde::{Deserialize, Deserializer, Serialize};

use crate::element::SchemaElement;
use crate::kind::SchemaElementKind;

/// One node of the semantic tree.
///
/// `path` is the validator's rendering of the node's location; it is kept
/// for display and never parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub label: String,
    pub path: String,
    pub range: Range,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "element_or_unknown"
    )]
    pub element: Option<SchemaElement>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

/// An element the model cannot read loads as [`SchemaElement::Unknown`]
/// instead of failing the whole tree.
fn element_or_unknown<'de, D>(deserializer: D) -> Result<Option<SchemaElement>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.map(|value| serde_json::from_value(value).unwrap_or(SchemaElement::Unknown)))
}

impl TreeNode {
    pub fn new(label: impl Into<String>, path: impl Into<String>, range: Range) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
            range,
            element: None,
            children: Vec::new(),
        }
    }

    pub fn with_element(mut self, element: SchemaElement) -> Self {
        self.element = Some(element);
        self
    }

    pub fn with_child(mut self, child: TreeNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn kind(&self) -> SchemaElementKind {
        SchemaElementKind::from_element(self.element.as_ref())
    }

    /// The chain of nodes containing `pos`, shallowest first.
    ///
    /// Empty when the root itself does not contain `pos`.
    pub fn collect_at_position(&self, pos: Position) -> Vec<&TreeNode> {
        if !self.range.contains(pos) {
            return Vec::new();
        }
        let mut collected = vec![self];
        let mut current = self;
        while let Some(child) = current.children.iter().find(|c| c.range.contains(pos)) {
            collected.push(child);
            current = child;
        }
        collected
    }
}
