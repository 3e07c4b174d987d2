//! Classification of semantic elements into a closed set of kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::element::{MappingNode, SchemaElement, Substitution};

/// What a semantic element is, independent of its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaElementKind {
    Unknown,

    Blueprint,
    Version,
    Transform,

    // Top-level sections
    Variables,
    Values,
    Includes,
    Resources,
    DataSources,
    Exports,
    BlueprintMetadata,

    // Named elements
    Variable,
    Value,
    Include,
    Resource,
    DataSource,
    Export,

    // Type fields
    ResourceType,
    VariableType,
    ValueType,
    DataSourceType,
    ExportType,
    DataSourceFieldType,

    Description,
    StringOrSubstitutions,

    // Substitution forms
    StringLiteral,
    IntLiteral,
    FloatLiteral,
    BoolLiteral,
    VariableRef,
    ValueRef,
    ResourceRef,
    DataSourceRef,
    ChildRef,
    ElemRef,
    ElemIndexRef,
    FunctionCall,
    FunctionArg,

    // Structural wrappers
    ResourceMetadata,
    LinkSelector,
    DependsOn,
    Condition,
    Each,
    DataSourceFilter,
    DataSourceFilterOperator,
    DataSourceFilterSearch,
    DataSourceExports,
    DataSourceFieldExport,
    DataSourceMetadata,
    StringMap,
    StringOrSubstitutionsMap,
    MappingNode,
    Scalar,
}

use SchemaElementKind as K;

/// Every kind paired with its name, in declaration order.
const NAMES: &[(SchemaElementKind, &str)] = &[
    (K::Unknown, "unknown"),
    (K::Blueprint, "blueprint"),
    (K::Version, "version"),
    (K::Transform, "transform"),
    (K::Variables, "variables"),
    (K::Values, "values"),
    (K::Includes, "includes"),
    (K::Resources, "resources"),
    (K::DataSources, "data_sources"),
    (K::Exports, "exports"),
    (K::BlueprintMetadata, "blueprint_metadata"),
    (K::Variable, "variable"),
    (K::Value, "value"),
    (K::Include, "include"),
    (K::Resource, "resource"),
    (K::DataSource, "data_source"),
    (K::Export, "export"),
    (K::ResourceType, "resource_type"),
    (K::VariableType, "variable_type"),
    (K::ValueType, "value_type"),
    (K::DataSourceType, "data_source_type"),
    (K::ExportType, "export_type"),
    (K::DataSourceFieldType, "data_source_field_type"),
    (K::Description, "description"),
    (K::StringOrSubstitutions, "string_or_substitutions"),
    (K::StringLiteral, "string_literal"),
    (K::IntLiteral, "int_literal"),
    (K::FloatLiteral, "float_literal"),
    (K::BoolLiteral, "bool_literal"),
    (K::VariableRef, "variable_ref"),
    (K::ValueRef, "value_ref"),
    (K::ResourceRef, "resource_ref"),
    (K::DataSourceRef, "data_source_ref"),
    (K::ChildRef, "child_ref"),
    (K::ElemRef, "elem_ref"),
    (K::ElemIndexRef, "elem_index_ref"),
    (K::FunctionCall, "function_call"),
    (K::FunctionArg, "function_arg"),
    (K::ResourceMetadata, "resource_metadata"),
    (K::LinkSelector, "link_selector"),
    (K::DependsOn, "depends_on"),
    (K::Condition, "condition"),
    (K::Each, "each"),
    (K::DataSourceFilter, "data_source_filter"),
    (K::DataSourceFilterOperator, "data_source_filter_operator"),
    (K::DataSourceFilterSearch, "data_source_filter_search"),
    (K::DataSourceExports, "data_source_exports"),
    (K::DataSourceFieldExport, "data_source_field_export"),
    (K::DataSourceMetadata, "data_source_metadata"),
    (K::StringMap, "string_map"),
    (K::StringOrSubstitutionsMap, "string_or_substitutions_map"),
    (K::MappingNode, "mapping_node"),
    (K::Scalar, "scalar"),
];

impl SchemaElementKind {
    /// Classify an element. Absent and unrecognised elements are
    /// [`SchemaElementKind::Unknown`].
    pub fn from_element(element: Option<&SchemaElement>) -> Self {
        let Some(element) = element else {
            return K::Unknown;
        };
        match element {
            SchemaElement::Blueprint(_) => K::Blueprint,
            SchemaElement::Version(_) => K::Version,
            SchemaElement::Transform(_) => K::Transform,

            SchemaElement::VariableMap => K::Variables,
            SchemaElement::ValueMap => K::Values,
            SchemaElement::IncludeMap => K::Includes,
            SchemaElement::ResourceMap => K::Resources,
            SchemaElement::DataSourceMap => K::DataSources,
            SchemaElement::ExportMap => K::Exports,
            SchemaElement::BlueprintMetadata(_) => K::BlueprintMetadata,

            SchemaElement::Variable(_) => K::Variable,
            SchemaElement::Value(_) => K::Value,
            SchemaElement::Include(_) => K::Include,
            SchemaElement::Resource(_) => K::Resource,
            SchemaElement::DataSource(_) => K::DataSource,
            SchemaElement::Export(_) => K::Export,

            SchemaElement::ResourceType(_) => K::ResourceType,
            SchemaElement::VariableType(_) => K::VariableType,
            SchemaElement::ValueType(_) => K::ValueType,
            SchemaElement::DataSourceType(_) => K::DataSourceType,
            SchemaElement::ExportType(_) => K::ExportType,
            SchemaElement::DataSourceFieldType(_) => K::DataSourceFieldType,

            SchemaElement::Description(_) => K::Description,
            SchemaElement::StringOrSubstitutions(_) => K::StringOrSubstitutions,
            SchemaElement::Substitution(sub) => Self::from_substitution(sub),
            SchemaElement::FunctionArg(_) => K::FunctionArg,

            SchemaElement::ResourceMetadata(_) => K::ResourceMetadata,
            SchemaElement::LinkSelector(_) => K::LinkSelector,
            SchemaElement::DependsOn(_) => K::DependsOn,
            SchemaElement::Condition(_) => K::Condition,
            SchemaElement::Each(_) => K::Each,

            SchemaElement::DataSourceFilter(_) => K::DataSourceFilter,
            SchemaElement::DataSourceFilterOperator(_) => K::DataSourceFilterOperator,
            SchemaElement::DataSourceFilterSearch(_) => K::DataSourceFilterSearch,
            SchemaElement::DataSourceExports => K::DataSourceExports,
            SchemaElement::DataSourceFieldExport(_) => K::DataSourceFieldExport,
            SchemaElement::DataSourceMetadata(_) => K::DataSourceMetadata,

            SchemaElement::StringMap(_) => K::StringMap,
            SchemaElement::StringOrSubstitutionsMap(_) => K::StringOrSubstitutionsMap,
            SchemaElement::MappingNode(MappingNode::Scalar(_)) => K::Scalar,
            SchemaElement::MappingNode(MappingNode::Substitutions(_)) => K::StringOrSubstitutions,
            SchemaElement::MappingNode(_) => K::MappingNode,
            SchemaElement::Unknown => K::Unknown,
        }
    }

    pub fn from_substitution(sub: &Substitution) -> Self {
        match sub {
            Substitution::StringLiteral(_) => K::StringLiteral,
            Substitution::IntLiteral(_) => K::IntLiteral,
            Substitution::FloatLiteral(_) => K::FloatLiteral,
            Substitution::BoolLiteral(_) => K::BoolLiteral,
            Substitution::Variable { .. } => K::VariableRef,
            Substitution::Value { .. } => K::ValueRef,
            Substitution::ResourceProperty { .. } => K::ResourceRef,
            Substitution::DataSourceProperty { .. } => K::DataSourceRef,
            Substitution::Child { .. } => K::ChildRef,
            Substitution::Elem { .. } => K::ElemRef,
            Substitution::ElemIndex => K::ElemIndexRef,
            Substitution::Function { .. } => K::FunctionCall,
        }
    }

    /// All kinds, in declaration order.
    pub fn all() -> impl Iterator<Item = SchemaElementKind> {
        NAMES.iter().map(|(kind, _)| *kind)
    }

    pub fn as_str(self) -> &'static str {
        NAMES
            .iter()
            .find(|(kind, _)| *kind == self)
            .map_or("unknown", |(_, name)| name)
    }

    /// `type` fields of named elements.
    pub fn is_type_field(self) -> bool {
        matches!(
            self,
            K::ResourceType
                | K::VariableType
                | K::ValueType
                | K::DataSourceType
                | K::ExportType
                | K::DataSourceFieldType
        )
    }

    /// References to another element of the blueprint.
    pub fn is_reference(self) -> bool {
        matches!(
            self,
            K::VariableRef
                | K::ValueRef
                | K::ResourceRef
                | K::DataSourceRef
                | K::ChildRef
                | K::ElemRef
                | K::ElemIndexRef
        )
    }

    /// Anything that lives inside `${..}`, including the string holding it.
    pub fn is_substitution(self) -> bool {
        self.is_reference()
            || matches!(
                self,
                K::StringOrSubstitutions
                    | K::StringLiteral
                    | K::IntLiteral
                    | K::FloatLiteral
                    | K::BoolLiteral
                    | K::FunctionCall
                    | K::FunctionArg
            )
    }

    /// Elements declared under a name by the author.
    pub fn is_named_element(self) -> bool {
        matches!(
            self,
            K::Variable
                | K::Value
                | K::Include
                | K::Resource
                | K::DataSource
                | K::Export
                | K::DataSourceFieldExport
        )
    }

    /// Whether hovering over this kind has something worth showing.
    pub fn supports_hover(self) -> bool {
        self.is_named_element()
            || self.is_type_field()
            || self.is_reference()
            || matches!(
                self,
                K::FunctionCall
                    | K::Version
                    | K::Transform
                    | K::ResourceMetadata
                    | K::LinkSelector
                    | K::DependsOn
                    | K::Condition
                    | K::Each
                    | K::DataSourceFilter
                    | K::DataSourceFilterOperator
                    | K::DataSourceFilterSearch
                    | K::DataSourceExports
                    | K::DataSourceMetadata
            )
    }
}

impl fmt::Display for SchemaElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaElementKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NAMES
            .iter()
            .find(|(_, name)| *name == s)
            .map(|(kind, _)| *kind)
            .ok_or_else(|| format!("unknown schema element kind: {s}"))
    }
}
