//! Classification of a partially typed `${..}` expression.

use blueprint_schema::ReferenceNamespace;

use super::{CompletionContextKind as C, CompletionPayload};
use crate::context::NodeContext;

pub(crate) fn substitution_layer(ctx: &NodeContext<'_>) -> Option<CompletionPayload> {
    if !ctx.in_substitution() {
        return None;
    }
    Some(classify(ctx.substitution_text()))
}

/// What follows the last complete segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trailing {
    /// Ends with `.`
    Dot,
    /// Ends inside an unterminated `[`.
    Bracket,
    /// Ends in the middle of an identifier.
    Identifier,
    /// Ends right after `]`.
    Closed,
}

#[derive(Debug, PartialEq, Eq)]
struct Segmented {
    segments: Vec<String>,
    trailing: Trailing,
}

impl Segmented {
    fn awaits_member(&self) -> bool {
        matches!(self.trailing, Trailing::Dot | Trailing::Bracket)
    }
}

/// The path expression at the end of `text`: everything after the last
/// character that cannot be part of one (an operator, a `(`, a space).
fn trailing_expression(text: &str) -> &str {
    let mut depth = 0usize;
    let mut start = text.len();
    for (i, c) in text.char_indices().rev() {
        match c {
            ']' => depth += 1,
            '[' if depth > 0 => depth -= 1,
            '[' | '.' | '_' | '-' => {}
            '"' | '\'' | ' ' if depth > 0 => {}
            c if c.is_ascii_alphanumeric() => {}
            _ => break,
        }
        start = i;
    }
    &text[start..]
}

/// Split a path expression on `.` and `[..]`. Bracket contents lose their
/// quotes.
fn segment(expr: &str) -> Segmented {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut trailing = Trailing::Identifier;
    let mut chars = expr.chars();

    while let Some(c) = chars.next() {
        match c {
            '.' => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
                trailing = Trailing::Dot;
            }
            '[' => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
                let mut inner = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == ']' {
                        closed = true;
                        break;
                    }
                    inner.push(c);
                }
                if !closed {
                    return Segmented {
                        segments,
                        trailing: Trailing::Bracket,
                    };
                }
                segments.push(inner.trim().trim_matches(['"', '\'']).to_string());
                trailing = Trailing::Closed;
            }
            _ => {
                current.push(c);
                trailing = Trailing::Identifier;
            }
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    Segmented { segments, trailing }
}

fn reference_kind(namespace: ReferenceNamespace) -> C {
    match namespace {
        ReferenceNamespace::Resources => C::StringSubResourceRef,
        ReferenceNamespace::Variables => C::StringSubVariableRef,
        ReferenceNamespace::Values => C::StringSubValueRef,
        ReferenceNamespace::DataSources => C::StringSubDataSourceRef,
        ReferenceNamespace::Children => C::StringSubChildRef,
        ReferenceNamespace::Elem => C::StringSubElemRef,
    }
}

fn property_kind(namespace: ReferenceNamespace) -> C {
    match namespace {
        ReferenceNamespace::Resources => C::StringSubResourceProperty,
        ReferenceNamespace::Values => C::StringSubValueProperty,
        ReferenceNamespace::DataSources => C::StringSubDataSourceProperty,
        ReferenceNamespace::Children => C::StringSubChildProperty,
        ReferenceNamespace::Elem => C::StringSubElemRef,
        // Variables are scalars.
        ReferenceNamespace::Variables => C::StringSubPartialPath,
    }
}

fn classify(text: &str) -> CompletionPayload {
    let expr = trailing_expression(text);
    let parsed = segment(expr);
    let Some(first) = parsed.segments.first() else {
        return CompletionPayload::new(C::StringSubOpen);
    };

    let Some(namespace) = ReferenceNamespace::from_prefix(first) else {
        if parsed.awaits_member()
            && first.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
        {
            return CompletionPayload::new(C::StringSubPotentialResourceProperty)
                .potential_resource(first);
        }
        if parsed.segments.len() == 1 && parsed.trailing == Trailing::Identifier {
            return CompletionPayload::new(C::StringSubOpen);
        }
        return CompletionPayload::new(C::StringSubPartialPath);
    };

    let name = parsed.segments.get(1).map(String::as_str);
    let kind = match (parsed.segments.len(), parsed.trailing) {
        (1, Trailing::Dot | Trailing::Bracket) => reference_kind(namespace),
        // Still typing the namespace itself.
        (1, _) => C::StringSubOpen,
        (2, Trailing::Identifier) => reference_kind(namespace),
        (_, Trailing::Dot | Trailing::Bracket) => property_kind(namespace),
        _ => C::StringSubPartialPath,
    };

    let payload = CompletionPayload::new(kind);
    match (kind, name) {
        (C::StringSubResourceProperty, name) => payload.resource(name),
        (C::StringSubDataSourceProperty, name) => payload.data_source(name),
        (C::StringSubResourceRef | C::StringSubDataSourceRef, Some(partial)) => {
            payload.field(partial)
        }
        (C::StringSubValueProperty | C::StringSubChildProperty, Some(name)) => payload.field(name),
        _ => payload,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kind(text: &str) -> C {
        classify(text).kind
    }

    #[test]
    fn test_segmentation() {
        assert_eq!(
            segment("resources.orders.spec"),
            Segmented {
                segments: vec!["resources".into(), "orders".into(), "spec".into()],
                trailing: Trailing::Identifier,
            }
        );
        assert_eq!(
            segment("resources[\"my-table\"]."),
            Segmented {
                segments: vec!["resources".into(), "my-table".into()],
                trailing: Trailing::Dot,
            }
        );
        assert_eq!(segment("values.list[").trailing, Trailing::Bracket);
        assert_eq!(segment("values.list[0]").trailing, Trailing::Closed);
    }

    #[test]
    fn test_trailing_expression() {
        assert_eq!(trailing_expression("len(resources.orders."), "resources.orders.");
        assert_eq!(trailing_expression("join(a, values.x[\"k y\"]."), "values.x[\"k y\"].");
        assert_eq!(trailing_expression(""), "");
    }

    #[test]
    fn test_namespace_references() {
        assert_eq!(kind("resources."), C::StringSubResourceRef);
        assert_eq!(kind("variables."), C::StringSubVariableRef);
        assert_eq!(kind("values."), C::StringSubValueRef);
        assert_eq!(kind("datasources."), C::StringSubDataSourceRef);
        assert_eq!(kind("children."), C::StringSubChildRef);
        assert_eq!(kind("elem."), C::StringSubElemRef);
        assert_eq!(kind("resources["), C::StringSubResourceRef);
    }

    #[test]
    fn test_partial_names_stay_references() {
        let payload = classify("resources.ord");
        assert_eq!(payload.kind, C::StringSubResourceRef);
        assert_eq!(payload.field_name.as_deref(), Some("ord"));
        assert_eq!(kind("resour"), C::StringSubOpen);
    }

    #[test]
    fn test_properties_carry_names() {
        let payload = classify("datasources.network.");
        assert_eq!(payload.kind, C::StringSubDataSourceProperty);
        assert_eq!(payload.data_source_name.as_deref(), Some("network"));

        let payload = classify("resources.orders.spec.tags[");
        assert_eq!(payload.kind, C::StringSubResourceProperty);
        assert_eq!(payload.resource_name.as_deref(), Some("orders"));

        assert_eq!(kind("values.config."), C::StringSubValueProperty);
        assert_eq!(kind("children.network."), C::StringSubChildProperty);
        assert_eq!(kind("variables.region."), C::StringSubPartialPath);
    }

    #[test]
    fn test_mid_identifier_paths() {
        assert_eq!(kind("resources.orders.spe"), C::StringSubPartialPath);
        assert_eq!(kind("myResource.spe"), C::StringSubPartialPath);
        assert_eq!(kind("values.list[0]"), C::StringSubPartialPath);
    }

    #[test]
    fn test_potential_resource() {
        let payload = classify("trim(myResource.");
        assert_eq!(payload.kind, C::StringSubPotentialResourceProperty);
        assert_eq!(payload.potential_resource_name.as_deref(), Some("myResource"));
        assert_eq!(kind("myResource.spec."), C::StringSubPotentialResourceProperty);
        assert_eq!(kind("12."), C::StringSubPartialPath);
    }

    #[test]
    fn test_open_forms() {
        assert_eq!(kind(""), C::StringSubOpen);
        assert_eq!(kind("len("), C::StringSubOpen);
        assert_eq!(kind("upp"), C::StringSubOpen);
    }
}
