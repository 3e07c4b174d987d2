//! Path-driven completion layers.

use blueprint_ast::StructuredPath;

use super::{CompletionContextKind as C, CompletionPayload};
use crate::context::NodeContext;
use crate::style::SyntacticPosition;
use crate::text::ends_with_key;

fn named(kind: C, path: &StructuredPath) -> CompletionPayload {
    CompletionPayload::new(kind)
        .resource(path.resource_name())
        .data_source(path.data_source_name())
}

/// `type` values, both on an existing value and right after a fresh `type:`.
pub(crate) fn type_field_layer(ctx: &NodeContext<'_>) -> Option<CompletionPayload> {
    let path = &ctx.path;
    let at_field = [
        (path.is_resource_type(), C::ResourceType),
        (path.is_data_source_type(), C::DataSourceType),
        (path.is_variable_type(), C::VariableType),
        (path.is_value_type(), C::ValueType),
        (path.is_export_type(), C::ExportType),
        (path.is_data_source_export_type(), C::DataSourceFieldType),
    ];
    if let Some((_, kind)) = at_field.iter().find(|(matched, _)| *matched) {
        return Some(named(*kind, path));
    }

    if !ends_with_key(ctx.text_before(), "type") {
        return None;
    }
    let one_level_up = [
        (path.is_resource_definition(), C::ResourceType),
        (path.is_data_source_definition(), C::DataSourceType),
        (path.is_variable_definition(), C::VariableType),
        (path.is_value_definition(), C::ValueType),
        (path.is_export_definition(), C::ExportType),
        (
            path.is_data_source_export_definition(),
            C::DataSourceFieldType,
        ),
    ];
    one_level_up
        .iter()
        .find(|(matched, _)| *matched)
        .map(|(_, kind)| named(*kind, path))
}

/// `field` and `operator` of a data source filter.
pub(crate) fn data_source_filter_layer(ctx: &NodeContext<'_>) -> Option<CompletionPayload> {
    let path = &ctx.path;
    let kind = if path.is_data_source_filter_field() {
        C::DataSourceFilterField
    } else if path.is_data_source_filter_operator() {
        C::DataSourceFilterOperator
    } else if path.is_data_source_filter_entry() && ends_with_key(ctx.text_before(), "field") {
        C::DataSourceFilterField
    } else if path.is_data_source_filter_entry() && ends_with_key(ctx.text_before(), "operator") {
        C::DataSourceFilterOperator
    } else {
        return None;
    };
    Some(named(kind, path))
}

/// The field-completion kind for keys typed directly inside `path`.
fn field_kind_for(path: &StructuredPath) -> Option<C> {
    let kind = if path.is_resource_definition() {
        C::ResourceDefinitionField
    } else if path.is_in_resource_spec() {
        C::ResourceSpecField
    } else if path.is_resource_metadata() {
        C::ResourceMetadataField
    } else if path.is_data_source_definition() {
        C::DataSourceDefinitionField
    } else if path.is_data_source_filter_entry() {
        C::DataSourceFilterDefinitionField
    } else if path.is_data_source_export_definition() {
        C::DataSourceExportDefinitionField
    } else if path.is_data_source_metadata() {
        C::DataSourceMetadataField
    } else if path.is_variable_definition() {
        C::VariableDefinitionField
    } else if path.is_value_definition() {
        C::ValueDefinitionField
    } else if path.is_export_definition() {
        C::ExportDefinitionField
    } else if path.is_include_definition() {
        C::IncludeDefinitionField
    } else {
        return None;
    };
    Some(kind)
}

fn at_key_position(ctx: &NodeContext<'_>) -> bool {
    matches!(
        ctx.syntactic_position(),
        SyntacticPosition::KeyField | SyntacticPosition::EmptyContainer
    )
}

/// Keys of resources, data sources, filters and the other known mappings.
///
/// In block YAML the container is the node the cursor's indentation places
/// it in: a key typed at a sibling's column completes that sibling's
/// mapping, one typed further right completes the fields of the entry above.
pub(crate) fn structural_field_layer(ctx: &NodeContext<'_>) -> Option<CompletionPayload> {
    if !at_key_position(ctx) {
        return None;
    }
    let container = ctx.field_container()?;
    let path = container.path();
    let kind = field_kind_for(&path)?;
    Some(named(kind, &path).field(ctx.typed_prefix()))
}

/// Top-level blueprint keys such as `version` or `resources`.
pub(crate) fn top_level_field_layer(ctx: &NodeContext<'_>) -> Option<CompletionPayload> {
    if ctx.in_substitution() || ctx.node.is_none() || !at_key_position(ctx) {
        return None;
    }
    // A single token, not a sentence in a multi-line scalar.
    if ctx.text_before().split_whitespace().count() > 1 {
        return None;
    }
    let container = ctx.field_container()?;
    if !container.path().is_empty() {
        return None;
    }
    Some(CompletionPayload::new(C::BlueprintTopLevelField).field(ctx.typed_prefix()))
}
