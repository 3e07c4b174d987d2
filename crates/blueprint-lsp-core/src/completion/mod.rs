//! Completion context determination.
//!
//! A [`NodeContext`] is run through an ordered chain of layers. Each layer
//! either claims the position or passes; the first claim wins:
//!
//! 1. an open `${..}` substitution
//! 2. a `type` field of a named element
//! 3. a data source filter's `field`/`operator`
//! 4. a key inside a known structural mapping
//! 5. a top-level blueprint key
//!
//! Anything left over is [`CompletionContextKind::Unknown`].

mod fields;
mod kind;
mod substitution;

use serde::Serialize;

use crate::context::NodeContext;

pub use kind::CompletionContextKind;

/// The decided completion context plus the names it refers to.
#[derive(Debug, Clone)]
pub struct CompletionContext<'c, 'a> {
    pub kind: CompletionContextKind,
    pub resource_name: Option<String>,
    pub data_source_name: Option<String>,
    /// Leading identifier of `${name.` when `name` is not a reserved namespace.
    pub potential_resource_name: Option<String>,
    /// The key or value prefix being typed.
    pub field_name: Option<String>,
    pub node_context: &'c NodeContext<'a>,
}

impl CompletionContext<'_, '_> {
    pub fn payload(&self) -> CompletionPayload {
        CompletionPayload {
            kind: self.kind,
            resource_name: self.resource_name.clone(),
            data_source_name: self.data_source_name.clone(),
            potential_resource_name: self.potential_resource_name.clone(),
            field_name: self.field_name.clone(),
        }
    }
}

/// The owned, serializable part of a [`CompletionContext`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionPayload {
    pub kind: CompletionContextKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_source_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub potential_resource_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
}

impl CompletionPayload {
    pub(crate) fn new(kind: CompletionContextKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    pub(crate) fn resource(mut self, name: Option<&str>) -> Self {
        self.resource_name = name.map(str::to_string);
        self
    }

    pub(crate) fn data_source(mut self, name: Option<&str>) -> Self {
        self.data_source_name = name.map(str::to_string);
        self
    }

    pub(crate) fn potential_resource(mut self, name: &str) -> Self {
        self.potential_resource_name = Some(name.to_string());
        self
    }

    pub(crate) fn field(mut self, name: impl Into<String>) -> Self {
        self.field_name = Some(name.into());
        self
    }
}

type Layer = fn(&NodeContext<'_>) -> Option<CompletionPayload>;

const LAYERS: &[(&str, Layer)] = &[
    ("substitution", substitution::substitution_layer),
    ("type field", fields::type_field_layer),
    ("data source filter", fields::data_source_filter_layer),
    ("structural field", fields::structural_field_layer),
    ("top-level field", fields::top_level_field_layer),
];

/// Decide what kind of completion fits the cursor described by `ctx`.
pub fn determine_completion_context<'c, 'a>(ctx: &'c NodeContext<'a>) -> CompletionContext<'c, 'a> {
    let payload = LAYERS
        .iter()
        .find_map(|(name, layer)| {
            let payload = layer(ctx)?;
            tracing::debug!(
                layer = *name,
                kind = %payload.kind,
                path = %ctx.path,
                "completion layer matched"
            );
            Some(payload)
        })
        .unwrap_or_else(|| {
            tracing::debug!(path = %ctx.path, "no completion layer matched");
            CompletionPayload::new(CompletionContextKind::Unknown)
        });

    CompletionContext {
        kind: payload.kind,
        resource_name: payload.resource_name,
        data_source_name: payload.data_source_name,
        potential_resource_name: payload.potential_resource_name,
        field_name: payload.field_name,
        node_context: ctx,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blueprint_ast::DocumentFormat;
    use blueprint_source_map::Position;

    fn from_text(text_before: &str) -> CompletionPayload {
        let column = text_before.chars().count() as u32 + 1;
        let ctx =
            NodeContext::from_text(text_before, Position::new(1, column), DocumentFormat::Yaml);
        determine_completion_context(&ctx).payload()
    }

    #[test]
    fn test_reserved_namespace_reference() {
        assert_eq!(from_text("${resources.").kind, CompletionContextKind::StringSubResourceRef);
    }

    #[test]
    fn test_resource_property_carries_name() {
        let payload = from_text("${resources.myTable.");
        assert_eq!(payload.kind, CompletionContextKind::StringSubResourceProperty);
        assert_eq!(payload.resource_name.as_deref(), Some("myTable"));
    }

    #[test]
    fn test_unreserved_prefix_is_potential_resource() {
        let payload = from_text("${myResource.");
        assert_eq!(payload.kind, CompletionContextKind::StringSubPotentialResourceProperty);
        assert_eq!(payload.potential_resource_name.as_deref(), Some("myResource"));
    }

    #[test]
    fn test_bare_opener() {
        assert_eq!(from_text("${").kind, CompletionContextKind::StringSubOpen);
    }

    #[test]
    fn test_plain_text_is_unknown() {
        assert_eq!(from_text("some random text").kind, CompletionContextKind::Unknown);
    }
}
