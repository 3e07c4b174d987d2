//! Structured paths: the semantic location of a node.
//!
//! A path is the sequence of field names and indices from the root to a
//! node, independent of whether the document used block YAML, flow YAML or
//! JSONC. The predicates below are fixed-shape checks over that sequence;
//! none of them looks at the document itself.

use std::fmt;

/// One step of a [`StructuredPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

impl PathSegment {
    pub fn as_field(&self) -> Option<&str> {
        match self {
            Self::Field(name) => Some(name),
            Self::Index(_) => None,
        }
    }

    pub fn as_index(&self) -> Option<usize> {
        match self {
            Self::Index(index) => Some(*index),
            Self::Field(_) => None,
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.write_str(name),
            Self::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// Section names at the top of a blueprint.
pub mod sections {
    pub const RESOURCES: &str = "resources";
    pub const VARIABLES: &str = "variables";
    pub const VALUES: &str = "values";
    pub const INCLUDES: &str = "include";
    pub const DATA_SOURCES: &str = "datasources";
    pub const EXPORTS: &str = "exports";
    pub const METADATA: &str = "metadata";
}

use sections::{DATA_SOURCES, EXPORTS, INCLUDES, METADATA, RESOURCES, VALUES, VARIABLES};

/// Field-name and index segments from the root to a node.
///
/// Renders as `/resources/orders/spec/items/[0]`; the root is the empty path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct StructuredPath {
    segments: Vec<PathSegment>,
}

impl StructuredPath {
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    /// Build a path from field names, for tests and fixed lookups.
    pub fn from_fields<'a>(fields: impl IntoIterator<Item = &'a str>) -> Self {
        Self::new(
            fields
                .into_iter()
                .map(|name| PathSegment::Field(name.to_string()))
                .collect(),
        )
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    /// A copy with `segment` appended.
    pub fn child(&self, segment: PathSegment) -> Self {
        let mut path = self.clone();
        path.push(segment);
        path
    }

    /// A copy without the last segment; the root stays the root.
    pub fn parent(&self) -> Self {
        let mut segments = self.segments.clone();
        segments.pop();
        Self::new(segments)
    }

    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// Field name at `at`, or None for an index segment or out of range.
    pub fn field_at(&self, at: usize) -> Option<&str> {
        self.segments.get(at).and_then(PathSegment::as_field)
    }

    pub fn index_at(&self, at: usize) -> Option<usize> {
        self.segments.get(at).and_then(PathSegment::as_index)
    }

    fn is_field(&self, at: usize, name: &str) -> bool {
        self.field_at(at) == Some(name)
    }

    fn is_index(&self, at: usize) -> bool {
        self.index_at(at).is_some()
    }

    // ====================================================================
    // Sections and named elements
    // ====================================================================

    fn is_section(&self, section: &str) -> bool {
        self.len() == 1 && self.is_field(0, section)
    }

    fn is_definition(&self, section: &str) -> bool {
        self.len() == 2 && self.is_field(0, section)
    }

    /// `/{section}/{name}/{field}`
    fn is_definition_field(&self, section: &str, field: &str) -> bool {
        self.len() == 3 && self.is_field(0, section) && self.is_field(2, field)
    }

    pub fn is_resources_section(&self) -> bool {
        self.is_section(RESOURCES)
    }

    pub fn is_variables_section(&self) -> bool {
        self.is_section(VARIABLES)
    }

    pub fn is_values_section(&self) -> bool {
        self.is_section(VALUES)
    }

    pub fn is_includes_section(&self) -> bool {
        self.is_section(INCLUDES)
    }

    pub fn is_data_sources_section(&self) -> bool {
        self.is_section(DATA_SOURCES)
    }

    pub fn is_exports_section(&self) -> bool {
        self.is_section(EXPORTS)
    }

    /// The blueprint-level `metadata` mapping or anything inside it.
    pub fn is_blueprint_metadata(&self) -> bool {
        self.is_field(0, METADATA)
    }

    /// `/resources/{name}`
    pub fn is_resource_definition(&self) -> bool {
        self.is_definition(RESOURCES)
    }

    /// `/variables/{name}`
    pub fn is_variable_definition(&self) -> bool {
        self.is_definition(VARIABLES)
    }

    /// `/values/{name}`
    pub fn is_value_definition(&self) -> bool {
        self.is_definition(VALUES)
    }

    /// `/include/{name}`
    pub fn is_include_definition(&self) -> bool {
        self.is_definition(INCLUDES)
    }

    /// `/datasources/{name}`
    pub fn is_data_source_definition(&self) -> bool {
        self.is_definition(DATA_SOURCES)
    }

    /// `/exports/{name}`
    pub fn is_export_definition(&self) -> bool {
        self.is_definition(EXPORTS)
    }

    // ====================================================================
    // Type fields
    // ====================================================================

    /// `/resources/{name}/type`
    pub fn is_resource_type(&self) -> bool {
        self.is_definition_field(RESOURCES, "type")
    }

    /// `/datasources/{name}/type`
    pub fn is_data_source_type(&self) -> bool {
        self.is_definition_field(DATA_SOURCES, "type")
    }

    /// `/variables/{name}/type`
    pub fn is_variable_type(&self) -> bool {
        self.is_definition_field(VARIABLES, "type")
    }

    /// `/values/{name}/type`
    pub fn is_value_type(&self) -> bool {
        self.is_definition_field(VALUES, "type")
    }

    /// `/exports/{name}/type`
    pub fn is_export_type(&self) -> bool {
        self.is_definition_field(EXPORTS, "type")
    }

    /// `/exports/{name}/field`
    pub fn is_export_field(&self) -> bool {
        self.is_definition_field(EXPORTS, "field")
    }

    // ====================================================================
    // Resources
    // ====================================================================

    /// `/resources/{name}/spec` or deeper.
    pub fn is_in_resource_spec(&self) -> bool {
        self.len() >= 3 && self.is_field(0, RESOURCES) && self.is_field(2, "spec")
    }

    /// `/resources/{name}/metadata` or deeper.
    pub fn is_in_resource_metadata(&self) -> bool {
        self.len() >= 3 && self.is_field(0, RESOURCES) && self.is_field(2, METADATA)
    }

    /// Exactly `/resources/{name}/metadata`.
    pub fn is_resource_metadata(&self) -> bool {
        self.is_definition_field(RESOURCES, METADATA)
    }

    /// `/resources/{name}/metadata/labels` or deeper.
    pub fn is_in_resource_labels(&self) -> bool {
        self.len() >= 4 && self.is_in_resource_metadata() && self.is_field(3, "labels")
    }

    /// `/resources/{name}/metadata/annotations` or deeper.
    pub fn is_in_resource_annotations(&self) -> bool {
        self.len() >= 4 && self.is_in_resource_metadata() && self.is_field(3, "annotations")
    }

    /// `/resources/{name}/linkSelector` or deeper.
    pub fn is_in_resource_link_selector(&self) -> bool {
        self.len() >= 3 && self.is_field(0, RESOURCES) && self.is_field(2, "linkSelector")
    }

    /// `/resources/{name}/dependsOn` or deeper.
    pub fn is_in_resource_depends_on(&self) -> bool {
        self.len() >= 3 && self.is_field(0, RESOURCES) && self.is_field(2, "dependsOn")
    }

    /// `/resources/{name}/condition` or deeper.
    pub fn is_in_resource_condition(&self) -> bool {
        self.len() >= 3 && self.is_field(0, RESOURCES) && self.is_field(2, "condition")
    }

    // ====================================================================
    // Data sources
    // ====================================================================

    /// The path of a single filter entry, in any of its accepted shapes:
    ///
    /// - `/datasources/{name}/filter`
    /// - `/datasources/{name}/filter/[i]`
    /// - `/datasources/{name}/filters/[i]`
    /// - `/datasources/{name}/filters/[i]/filter`
    pub fn is_data_source_filter_entry(&self) -> bool {
        if !self.is_field(0, DATA_SOURCES) {
            return false;
        }
        match self.len() {
            3 => self.is_field(2, "filter"),
            4 => (self.is_field(2, "filter") || self.is_field(2, "filters")) && self.is_index(3),
            5 => self.is_field(2, "filters") && self.is_index(3) && self.is_field(4, "filter"),
            _ => false,
        }
    }

    /// A field directly inside a filter entry, e.g. `/datasources/{name}/filter/field`.
    fn is_data_source_filter_attribute(&self, attribute: &str) -> bool {
        self.len() >= 4
            && self.is_field(self.len() - 1, attribute)
            && self.parent().is_data_source_filter_entry()
    }

    /// The `field` of a data source filter, in any accepted shape.
    pub fn is_data_source_filter_field(&self) -> bool {
        self.is_data_source_filter_attribute("field")
    }

    /// The `operator` of a data source filter, in any accepted shape.
    pub fn is_data_source_filter_operator(&self) -> bool {
        self.is_data_source_filter_attribute("operator")
    }

    /// The `search` of a data source filter, in any accepted shape.
    pub fn is_data_source_filter_search(&self) -> bool {
        self.is_data_source_filter_attribute("search")
    }

    /// `/datasources/{name}/exports`
    pub fn is_data_source_exports(&self) -> bool {
        self.is_definition_field(DATA_SOURCES, EXPORTS)
    }

    /// `/datasources/{name}/exports/{field}`
    pub fn is_data_source_export_definition(&self) -> bool {
        self.len() == 4 && self.is_field(0, DATA_SOURCES) && self.is_field(2, EXPORTS)
    }

    /// `/datasources/{name}/exports/{field}/type`
    pub fn is_data_source_export_type(&self) -> bool {
        self.len() == 5
            && self.is_field(0, DATA_SOURCES)
            && self.is_field(2, EXPORTS)
            && self.is_field(4, "type")
    }

    /// `/datasources/{name}/metadata` or deeper.
    pub fn is_in_data_source_metadata(&self) -> bool {
        self.len() >= 3 && self.is_field(0, DATA_SOURCES) && self.is_field(2, METADATA)
    }

    /// Exactly `/datasources/{name}/metadata`.
    pub fn is_data_source_metadata(&self) -> bool {
        self.is_definition_field(DATA_SOURCES, METADATA)
    }

    // ====================================================================
    // Getters
    // ====================================================================

    fn name_in(&self, section: &str) -> Option<&str> {
        if self.is_field(0, section) {
            self.field_at(1)
        } else {
            None
        }
    }

    pub fn resource_name(&self) -> Option<&str> {
        self.name_in(RESOURCES)
    }

    pub fn data_source_name(&self) -> Option<&str> {
        self.name_in(DATA_SOURCES)
    }

    pub fn variable_name(&self) -> Option<&str> {
        self.name_in(VARIABLES)
    }

    pub fn value_name(&self) -> Option<&str> {
        self.name_in(VALUES)
    }

    pub fn include_name(&self) -> Option<&str> {
        self.name_in(INCLUDES)
    }

    pub fn export_name(&self) -> Option<&str> {
        self.name_in(EXPORTS)
    }

    /// Name of the exported field under `/datasources/{name}/exports/{field}`.
    pub fn data_source_export_name(&self) -> Option<&str> {
        if self.len() >= 4 && self.is_field(0, DATA_SOURCES) && self.is_field(2, EXPORTS) {
            self.field_at(3)
        } else {
            None
        }
    }

    /// Segments after `/resources/{name}/spec`.
    ///
    /// `Some(&[])` at the spec root itself, `None` for paths outside a spec.
    pub fn spec_path(&self) -> Option<&[PathSegment]> {
        if self.is_in_resource_spec() {
            Some(&self.segments[3..])
        } else {
            None
        }
    }
}

impl fmt::Display for StructuredPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

impl FromIterator<PathSegment> for StructuredPath {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(fields: &[&str]) -> StructuredPath {
        StructuredPath::from_fields(fields.iter().copied())
    }

    fn with_index(fields: &[&str], at: usize, index: usize) -> StructuredPath {
        let mut segments: Vec<PathSegment> = fields
            .iter()
            .map(|f| PathSegment::Field(f.to_string()))
            .collect();
        segments.insert(at, PathSegment::Index(index));
        StructuredPath::new(segments)
    }

    #[test]
    fn test_display() {
        assert_eq!(path(&[]).to_string(), "");
        assert_eq!(
            with_index(&["resources", "t", "spec", "items"], 4, 0).to_string(),
            "/resources/t/spec/items/[0]"
        );
    }

    #[test]
    fn test_resource_type_is_an_exact_shape() {
        assert!(path(&["resources", "orders", "type"]).is_resource_type());
        assert!(!path(&["resources", "orders"]).is_resource_type());
        assert!(!path(&["resources", "orders", "type", "x"]).is_resource_type());
        assert!(!path(&["variables", "orders", "type"]).is_resource_type());
        assert!(!path(&["resources", "orders", "spec"]).is_resource_type());
        // a pure shape check: segment 1 is never inspected
        assert!(with_index(&["resources", "type"], 1, 0).is_resource_type());
    }

    #[test]
    fn test_other_type_fields() {
        assert!(path(&["datasources", "net", "type"]).is_data_source_type());
        assert!(path(&["variables", "env", "type"]).is_variable_type());
        assert!(path(&["values", "v", "type"]).is_value_type());
        assert!(path(&["exports", "e", "type"]).is_export_type());
        assert!(path(&["exports", "e", "field"]).is_export_field());
        assert!(
            path(&["datasources", "net", "exports", "id", "type"]).is_data_source_export_type()
        );
        assert!(!path(&["datasources", "net", "exports", "id"]).is_data_source_export_type());
    }

    #[test]
    fn test_definitions_and_sections() {
        assert!(path(&["resources"]).is_resources_section());
        assert!(path(&["datasources"]).is_data_sources_section());
        assert!(path(&["include"]).is_includes_section());
        assert!(path(&["resources", "a"]).is_resource_definition());
        assert!(path(&["variables", "a"]).is_variable_definition());
        assert!(path(&["values", "a"]).is_value_definition());
        assert!(path(&["include", "a"]).is_include_definition());
        assert!(path(&["datasources", "a"]).is_data_source_definition());
        assert!(path(&["exports", "a"]).is_export_definition());
        assert!(!path(&["resources"]).is_resource_definition());
        assert!(path(&["metadata", "owner"]).is_blueprint_metadata());
    }

    #[test]
    fn test_resource_spec_and_metadata() {
        assert!(path(&["resources", "a", "spec"]).is_in_resource_spec());
        assert!(path(&["resources", "a", "spec", "x", "y"]).is_in_resource_spec());
        assert!(!path(&["resources", "a"]).is_in_resource_spec());
        assert!(path(&["resources", "a", "metadata"]).is_resource_metadata());
        assert!(path(&["resources", "a", "metadata", "labels", "app"]).is_in_resource_labels());
        assert!(path(&["resources", "a", "metadata", "annotations"]).is_in_resource_annotations());
        assert!(!path(&["resources", "a", "metadata", "labels"]).is_resource_metadata());
        assert!(
            path(&["resources", "a", "linkSelector", "byLabel"]).is_in_resource_link_selector()
        );
        assert!(path(&["resources", "a", "dependsOn"]).is_in_resource_depends_on());
        assert!(path(&["resources", "a", "condition", "and"]).is_in_resource_condition());
    }

    #[test]
    fn test_filter_shapes() {
        let singular = path(&["datasources", "net", "filter", "field"]);
        let indexed = with_index(&["datasources", "net", "filter", "operator"], 3, 0);
        let plural = with_index(&["datasources", "net", "filters", "filter", "field"], 3, 1);
        let plural_flat = with_index(&["datasources", "net", "filters", "operator"], 3, 2);

        assert!(singular.is_data_source_filter_field());
        assert!(indexed.is_data_source_filter_operator());
        assert!(plural.is_data_source_filter_field());
        assert!(plural_flat.is_data_source_filter_operator());
        assert!(!singular.is_data_source_filter_operator());
        assert!(!path(&["datasources", "net", "field"]).is_data_source_filter_field());
        assert!(!path(&["resources", "net", "filter", "field"]).is_data_source_filter_field());
        assert!(path(&["datasources", "net", "filter", "search"]).is_data_source_filter_search());

        assert!(path(&["datasources", "net", "filter"]).is_data_source_filter_entry());
        assert!(singular.parent().is_data_source_filter_entry());
        assert!(plural.parent().is_data_source_filter_entry());
        assert!(!path(&["datasources", "net", "filters"]).is_data_source_filter_entry());
    }

    #[test]
    fn test_data_source_exports() {
        assert!(path(&["datasources", "net", "exports"]).is_data_source_exports());
        assert!(path(&["datasources", "net", "exports", "vpc"]).is_data_source_export_definition());
        assert_eq!(
            path(&["datasources", "net", "exports", "vpc", "type"]).data_source_export_name(),
            Some("vpc")
        );
        assert!(path(&["datasources", "net", "metadata"]).is_data_source_metadata());
        assert!(path(&["datasources", "net", "metadata", "x"]).is_in_data_source_metadata());
    }

    #[test]
    fn test_getters() {
        let p = path(&["resources", "orders", "spec"]);
        assert_eq!(p.resource_name(), Some("orders"));
        assert_eq!(p.data_source_name(), None);
        assert_eq!(path(&["datasources", "net"]).data_source_name(), Some("net"));
        assert_eq!(path(&["variables", "env"]).variable_name(), Some("env"));
        assert_eq!(path(&["values", "v", "value"]).value_name(), Some("v"));
        assert_eq!(path(&["include", "core"]).include_name(), Some("core"));
        assert_eq!(path(&["exports", "e"]).export_name(), Some("e"));
        assert_eq!(path(&["resources"]).resource_name(), None);
        assert_eq!(with_index(&["resources"], 1, 0).resource_name(), None);
    }

    #[test]
    fn test_spec_path() {
        let at_root = path(&["resources", "orders", "spec"]);
        let nested = path(&["resources", "orders", "spec", "a", "b"]);

        assert_eq!(at_root.spec_path(), Some(&[][..]));
        assert_eq!(
            nested.spec_path(),
            Some(
                &[
                    PathSegment::Field("a".to_string()),
                    PathSegment::Field("b".to_string())
                ][..]
            )
        );
        assert_eq!(path(&["resources", "orders", "metadata"]).spec_path(), None);
        assert_eq!(path(&[]).spec_path(), None);
    }

    #[test]
    fn test_parent_and_child() {
        let p = path(&["resources", "a"]);
        assert_eq!(p.parent(), path(&["resources"]));
        assert_eq!(path(&[]).parent(), path(&[]));
        assert_eq!(
            p.child(PathSegment::Field("spec".to_string())),
            path(&["resources", "a", "spec"])
        );
    }
}
