//! Semantic elements of a blueprint
//!
//! These are the raw objects a validator attaches to the nodes of its
//! semantic tree. They carry just enough content for hover and completion
//! to read names, types and reference targets; they are not a full
//! blueprint model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Top-level blueprint document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Blueprint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transform: Vec<String>,
}

/// A `variables.{name}` definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub var_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub secret: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,

    #[serde(rename = "allowedValues", default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_values: Vec<serde_json::Value>,
}

/// A `values.{name}` definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Value {
    pub name: String,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub secret: bool,
}

/// An `include.{name}` definition pulling in a child blueprint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Include {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<StringOrSubstitutions>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A `resources.{name}` definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub name: String,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "dependsOn", default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
}

/// A `datasources.{name}` definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSource {
    pub name: String,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub data_source_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An `exports.{name}` definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Export {
    pub name: String,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub export_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// `metadata` of a resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceMetadata {
    #[serde(rename = "displayName", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<StringOrSubstitutions>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, StringOrSubstitutions>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<MappingNode>,
}

/// `linkSelector` of a resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkSelector {
    #[serde(rename = "byLabel", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub by_label: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

/// One filter of a data source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSourceFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<StringOrSubstitutions>,
}

/// A field exported by a data source (`datasources.{name}.exports.{field}`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSourceFieldExport {
    pub name: String,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,

    #[serde(rename = "aliasFor", skip_serializing_if = "Option::is_none")]
    pub alias_for: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Free-form content such as a resource spec
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MappingNode {
    Scalar(serde_json::Value),
    Fields(BTreeMap<String, MappingNode>),
    Items(Vec<MappingNode>),
    Substitutions(StringOrSubstitutions),
}

/// A string that may interleave literal text with `${..}` substitutions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StringOrSubstitutions {
    pub values: Vec<StringOrSubstitution>,
}

impl StringOrSubstitutions {
    /// The substitution when the string is exactly one `${..}` and nothing else.
    pub fn single_substitution(&self) -> Option<&Substitution> {
        match self.values.as_slice() {
            [StringOrSubstitution::Substitution(sub)] => Some(sub),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StringOrSubstitution {
    String(String),
    Substitution(Substitution),
}

/// One step in a property path such as `.spec.tags[0]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SubstitutionPathItem {
    Field(String),
    Index(i64),
}

/// The contents of a `${..}` expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Substitution {
    StringLiteral(String),
    IntLiteral(i64),
    FloatLiteral(f64),
    BoolLiteral(bool),

    /// `variables.{name}`
    Variable { name: String },

    /// `values.{name}.path`
    Value {
        name: String,
        #[serde(default)]
        path: Vec<SubstitutionPathItem>,
    },

    /// `resources.{name}[i].path`
    ResourceProperty {
        #[serde(rename = "resourceName")]
        resource_name: String,
        #[serde(rename = "eachTemplateIndex", default)]
        each_template_index: Option<i64>,
        #[serde(default)]
        path: Vec<SubstitutionPathItem>,
    },

    /// `datasources.{name}.{field}[i]`
    DataSourceProperty {
        #[serde(rename = "dataSourceName")]
        data_source_name: String,
        #[serde(rename = "fieldName")]
        field_name: String,
        #[serde(rename = "primitiveArrIndex", default)]
        primitive_arr_index: Option<i64>,
    },

    /// `children.{name}.path`
    Child {
        #[serde(rename = "childName")]
        child_name: String,
        #[serde(default)]
        path: Vec<SubstitutionPathItem>,
    },

    /// `elem.path`
    Elem {
        #[serde(default)]
        path: Vec<SubstitutionPathItem>,
    },

    /// `i` inside an `each` template
    ElemIndex,

    Function {
        name: String,
        #[serde(default)]
        args: Vec<FunctionArg>,
    },
}

/// An argument of a substitution function call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionArg {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub value: Substitution,
}

/// A raw semantic object attached to a semantic tree node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "element", content = "value", rename_all = "camelCase")]
pub enum SchemaElement {
    Blueprint(Blueprint),
    Version(String),
    Transform(Vec<String>),

    VariableMap,
    ValueMap,
    IncludeMap,
    ResourceMap,
    DataSourceMap,
    ExportMap,
    BlueprintMetadata(MappingNode),

    Variable(Variable),
    Value(Value),
    Include(Include),
    Resource(Resource),
    DataSource(DataSource),
    Export(Export),

    ResourceType(String),
    VariableType(String),
    ValueType(String),
    DataSourceType(String),
    ExportType(String),
    DataSourceFieldType(String),

    Description(StringOrSubstitutions),
    StringOrSubstitutions(StringOrSubstitutions),
    Substitution(Substitution),
    FunctionArg(FunctionArg),

    ResourceMetadata(ResourceMetadata),
    LinkSelector(LinkSelector),
    DependsOn(Vec<String>),
    Condition(MappingNode),
    Each(StringOrSubstitutions),

    DataSourceFilter(DataSourceFilter),
    DataSourceFilterOperator(String),
    DataSourceFilterSearch(StringOrSubstitutions),
    DataSourceExports,
    DataSourceFieldExport(DataSourceFieldExport),
    DataSourceMetadata(MappingNode),

    StringMap(BTreeMap<String, String>),
    StringOrSubstitutionsMap(BTreeMap<String, StringOrSubstitutions>),
    MappingNode(MappingNode),

    /// An element tag this model does not know.
    #[serde(other)]
    Unknown,
}
