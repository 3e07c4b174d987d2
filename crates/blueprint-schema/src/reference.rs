//! Reference payloads carried by substitution elements.

use std::fmt;

use serde::Serialize;

use crate::element::{SchemaElement, Substitution, SubstitutionPathItem};

/// The namespace a `${..}` reference reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceNamespace {
    Variables,
    Values,
    Resources,
    DataSources,
    Children,
    Elem,
}

impl ReferenceNamespace {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Variables => "variables",
            Self::Values => "values",
            Self::Resources => "resources",
            Self::DataSources => "datasources",
            Self::Children => "children",
            Self::Elem => "elem",
        }
    }

    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "variables" => Some(Self::Variables),
            "values" => Some(Self::Values),
            "resources" => Some(Self::Resources),
            "datasources" => Some(Self::DataSources),
            "children" => Some(Self::Children),
            "elem" => Some(Self::Elem),
            _ => None,
        }
    }
}

impl fmt::Display for ReferenceNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a reference points at. The target itself is not resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceTarget {
    pub namespace: ReferenceNamespace,
    /// Referenced element; `None` for `elem` references.
    pub name: Option<String>,
    /// Remaining property path, e.g. `["spec", "[0]"]`.
    pub path: Vec<String>,
}

fn render_path(path: &[SubstitutionPathItem]) -> Vec<String> {
    path.iter()
        .map(|item| match item {
            SubstitutionPathItem::Field(name) => name.clone(),
            SubstitutionPathItem::Index(index) => format!("[{index}]"),
        })
        .collect()
}

impl Substitution {
    pub fn reference_target(&self) -> Option<ReferenceTarget> {
        let (namespace, name, path) = match self {
            Self::Variable { name } => (ReferenceNamespace::Variables, Some(name), Vec::new()),
            Self::Value { name, path } => {
                (ReferenceNamespace::Values, Some(name), render_path(path))
            }
            Self::ResourceProperty {
                resource_name,
                path,
                ..
            } => (
                ReferenceNamespace::Resources,
                Some(resource_name),
                render_path(path),
            ),
            Self::DataSourceProperty {
                data_source_name,
                field_name,
                ..
            } => (
                ReferenceNamespace::DataSources,
                Some(data_source_name),
                vec![field_name.clone()],
            ),
            Self::Child { child_name, path } => (
                ReferenceNamespace::Children,
                Some(child_name),
                render_path(path),
            ),
            Self::Elem { path } => (ReferenceNamespace::Elem, None, render_path(path)),
            Self::ElemIndex => (ReferenceNamespace::Elem, None, Vec::new()),
            _ => return None,
        };
        Some(ReferenceTarget {
            namespace,
            name: name.cloned(),
            path,
        })
    }
}

impl SchemaElement {
    /// The reference this element makes, looking through single-substitution strings.
    pub fn reference_target(&self) -> Option<ReferenceTarget> {
        match self {
            Self::Substitution(sub) => sub.reference_target(),
            Self::FunctionArg(arg) => arg.value.reference_target(),
            Self::StringOrSubstitutions(value) => value
                .single_substitution()
                .and_then(Substitution::reference_target),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{FunctionArg, StringOrSubstitution, StringOrSubstitutions};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_resource_property_target() {
        let sub = Substitution::ResourceProperty {
            resource_name: "orders".to_string(),
            each_template_index: Some(1),
            path: vec![
                SubstitutionPathItem::Field("spec".to_string()),
                SubstitutionPathItem::Field("tags".to_string()),
                SubstitutionPathItem::Index(0),
            ],
        };

        assert_eq!(
            sub.reference_target(),
            Some(ReferenceTarget {
                namespace: ReferenceNamespace::Resources,
                name: Some("orders".to_string()),
                path: vec!["spec".to_string(), "tags".to_string(), "[0]".to_string()],
            })
        );
    }

    #[test]
    fn test_data_source_target() {
        let sub = Substitution::DataSourceProperty {
            data_source_name: "network".to_string(),
            field_name: "vpcId".to_string(),
            primitive_arr_index: None,
        };
        let target = sub.reference_target().unwrap();
        assert_eq!(target.namespace, ReferenceNamespace::DataSources);
        assert_eq!(target.path, vec!["vpcId".to_string()]);
    }

    #[test]
    fn test_literals_and_functions_have_no_target() {
        assert_eq!(Substitution::IntLiteral(1).reference_target(), None);
        assert_eq!(
            Substitution::Function {
                name: "len".to_string(),
                args: Vec::new()
            }
            .reference_target(),
            None
        );
    }

    #[test]
    fn test_element_looks_through_wrappers() {
        let var = Substitution::Variable {
            name: "env".to_string(),
        };
        let arg = SchemaElement::FunctionArg(FunctionArg {
            name: None,
            value: var.clone(),
        });
        let string = SchemaElement::StringOrSubstitutions(StringOrSubstitutions {
            values: vec![StringOrSubstitution::Substitution(var)],
        });

        assert_eq!(
            arg.reference_target().map(|t| t.namespace),
            Some(ReferenceNamespace::Variables)
        );
        assert_eq!(
            string.reference_target().and_then(|t| t.name),
            Some("env".to_string())
        );
        assert_eq!(SchemaElement::ResourceMap.reference_target(), None);
    }

    #[test]
    fn test_namespace_prefixes() {
        for ns in [
            ReferenceNamespace::Variables,
            ReferenceNamespace::Values,
            ReferenceNamespace::Resources,
            ReferenceNamespace::DataSources,
            ReferenceNamespace::Children,
            ReferenceNamespace::Elem,
        ] {
            assert_eq!(ReferenceNamespace::from_prefix(ns.as_str()), Some(ns));
        }
        assert_eq!(ReferenceNamespace::from_prefix("myResource"), None);
    }
}
