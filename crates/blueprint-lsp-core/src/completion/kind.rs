use std::fmt;

use serde::Serialize;

/// What a completion at the cursor should offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CompletionContextKind {
    #[default]
    Unknown,

    ResourceType,
    DataSourceType,
    VariableType,
    ValueType,
    ExportType,
    DataSourceFieldType,

    DataSourceFilterField,
    DataSourceFilterOperator,

    StringSubOpen,
    StringSubVariableRef,
    StringSubValueRef,
    StringSubValueProperty,
    StringSubResourceRef,
    StringSubResourceProperty,
    StringSubDataSourceRef,
    StringSubDataSourceProperty,
    StringSubChildRef,
    StringSubChildProperty,
    StringSubElemRef,
    StringSubPotentialResourceProperty,
    /// Mid-identifier inside a path; nothing to offer yet.
    StringSubPartialPath,

    BlueprintTopLevelField,
    ResourceDefinitionField,
    ResourceSpecField,
    ResourceMetadataField,
    DataSourceDefinitionField,
    DataSourceFilterDefinitionField,
    DataSourceExportDefinitionField,
    DataSourceMetadataField,
    VariableDefinitionField,
    ValueDefinitionField,
    ExportDefinitionField,
    IncludeDefinitionField,
}

use CompletionContextKind as C;

const NAMES: &[(CompletionContextKind, &str)] = &[
    (C::Unknown, "unknown"),
    (C::ResourceType, "resourceType"),
    (C::DataSourceType, "dataSourceType"),
    (C::VariableType, "variableType"),
    (C::ValueType, "valueType"),
    (C::ExportType, "exportType"),
    (C::DataSourceFieldType, "dataSourceFieldType"),
    (C::DataSourceFilterField, "dataSourceFilterField"),
    (C::DataSourceFilterOperator, "dataSourceFilterOperator"),
    (C::StringSubOpen, "stringSubOpen"),
    (C::StringSubVariableRef, "stringSubVariableRef"),
    (C::StringSubValueRef, "stringSubValueRef"),
    (C::StringSubValueProperty, "stringSubValueProperty"),
    (C::StringSubResourceRef, "stringSubResourceRef"),
    (C::StringSubResourceProperty, "stringSubResourceProperty"),
    (C::StringSubDataSourceRef, "stringSubDataSourceRef"),
    (
        C::StringSubDataSourceProperty,
        "stringSubDataSourceProperty",
    ),
    (C::StringSubChildRef, "stringSubChildRef"),
    (C::StringSubChildProperty, "stringSubChildProperty"),
    (C::StringSubElemRef, "stringSubElemRef"),
    (
        C::StringSubPotentialResourceProperty,
        "stringSubPotentialResourceProperty",
    ),
    (C::StringSubPartialPath, "stringSubPartialPath"),
    (C::BlueprintTopLevelField, "blueprintTopLevelField"),
    (C::ResourceDefinitionField, "resourceDefinitionField"),
    (C::ResourceSpecField, "resourceSpecField"),
    (C::ResourceMetadataField, "resourceMetadataField"),
    (C::DataSourceDefinitionField, "dataSourceDefinitionField"),
    (
        C::DataSourceFilterDefinitionField,
        "dataSourceFilterDefinitionField",
    ),
    (
        C::DataSourceExportDefinitionField,
        "dataSourceExportDefinitionField",
    ),
    (C::DataSourceMetadataField, "dataSourceMetadataField"),
    (C::VariableDefinitionField, "variableDefinitionField"),
    (C::ValueDefinitionField, "valueDefinitionField"),
    (C::ExportDefinitionField, "exportDefinitionField"),
    (C::IncludeDefinitionField, "includeDefinitionField"),
];

impl CompletionContextKind {
    pub fn all() -> impl Iterator<Item = CompletionContextKind> {
        NAMES.iter().map(|(kind, _)| *kind)
    }

    pub fn as_str(self) -> &'static str {
        NAMES
            .iter()
            .find(|(kind, _)| *kind == self)
            .map_or("unknown", |(_, name)| name)
    }

    pub fn is_type_field(self) -> bool {
        matches!(
            self,
            C::ResourceType
                | C::DataSourceType
                | C::VariableType
                | C::ValueType
                | C::ExportType
                | C::DataSourceFieldType
        )
    }

    pub fn is_substitution(self) -> bool {
        matches!(
            self,
            C::StringSubOpen
                | C::StringSubVariableRef
                | C::StringSubValueRef
                | C::StringSubValueProperty
                | C::StringSubResourceRef
                | C::StringSubResourceProperty
                | C::StringSubDataSourceRef
                | C::StringSubDataSourceProperty
                | C::StringSubChildRef
                | C::StringSubChildProperty
                | C::StringSubElemRef
                | C::StringSubPotentialResourceProperty
                | C::StringSubPartialPath
        )
    }

    pub fn is_data_source_filter(self) -> bool {
        matches!(
            self,
            C::DataSourceFilterField
                | C::DataSourceFilterOperator
                | C::DataSourceFilterDefinitionField
        )
    }

    /// Keys of a known structural mapping, including the top level.
    pub fn is_field_definition(self) -> bool {
        matches!(
            self,
            C::BlueprintTopLevelField
                | C::ResourceDefinitionField
                | C::ResourceSpecField
                | C::ResourceMetadataField
                | C::DataSourceDefinitionField
                | C::DataSourceFilterDefinitionField
                | C::DataSourceExportDefinitionField
                | C::DataSourceMetadataField
                | C::VariableDefinitionField
                | C::ValueDefinitionField
                | C::ExportDefinitionField
                | C::IncludeDefinitionField
        )
    }

    /// Whether a completion provider has anything to offer.
    pub fn offers_completions(self) -> bool {
        !matches!(self, C::Unknown | C::StringSubPartialPath)
    }
}

impl fmt::Display for CompletionContextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_cover_every_kind_once() {
        let mut names: Vec<_> = CompletionContextKind::all().map(|k| k.as_str()).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
        assert_eq!(total, 34);
    }

    #[test]
    fn test_display_matches_serde() {
        for kind in CompletionContextKind::all() {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, kind.to_string());
        }
    }

    #[test]
    fn test_partitions_are_disjoint() {
        for kind in CompletionContextKind::all() {
            let groups = [kind.is_type_field(), kind.is_substitution(), kind.is_field_definition()];
            assert!(groups.iter().filter(|g| **g).count() <= 1, "{kind}");
        }
        assert!(C::DataSourceFilterDefinitionField.is_data_source_filter());
        assert!(!C::StringSubPartialPath.offers_completions());
    }
}
