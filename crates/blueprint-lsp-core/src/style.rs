//! Syntactic style and cursor position detection.
//!
//! These heuristics read the raw text around the cursor plus the concrete
//! kinds of the enclosing nodes. They never consult the semantic tree, so
//! they keep working while the document is half typed.

use std::fmt;

use blueprint_ast::DocumentFormat;
use serde::Serialize;

use crate::text::is_word_char;

/// Editing convention in effect at the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyntacticStyle {
    BlockYaml,
    FlowYaml,
    Jsonc,
}

impl SyntacticStyle {
    pub fn is_flow(self) -> bool {
        !matches!(self, Self::BlockYaml)
    }
}

/// What the user is typing at the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyntacticPosition {
    KeyField,
    ValueField,
    SequenceItem,
    StringContent,
    EmptyContainer,
    Unknown,
}

impl fmt::Display for SyntacticStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::BlockYaml => "block-yaml",
            Self::FlowYaml => "flow-yaml",
            Self::Jsonc => "jsonc",
        })
    }
}

impl fmt::Display for SyntacticPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::KeyField => "key-field",
            Self::ValueField => "value-field",
            Self::SequenceItem => "sequence-item",
            Self::StringContent => "string-content",
            Self::EmptyContainer => "empty-container",
            Self::Unknown => "unknown",
        })
    }
}

/// The nearest enclosing container, as seen by the position heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    Mapping,
    Sequence,
}

const FLOW_KINDS: &[&str] = &["flow_mapping", "flow_sequence", "flow_pair"];
const BLOCK_KINDS: &[&str] = &[
    "block_mapping",
    "block_mapping_pair",
    "block_sequence",
    "block_sequence_item",
];

/// Detect the style at the cursor.
///
/// `cst_kinds` are the concrete kinds of the node chain, deepest first.
/// An unclosed `{` or `[` before the cursor on the same line also means
/// flow style, since the parser may not have produced the container yet.
pub fn detect_style<'k>(
    format: DocumentFormat,
    cst_kinds: impl IntoIterator<Item = &'k str>,
    text_before: &str,
) -> SyntacticStyle {
    if format == DocumentFormat::Jsonc {
        return SyntacticStyle::Jsonc;
    }
    if unclosed_bracket(text_before).is_some() {
        return SyntacticStyle::FlowYaml;
    }
    for kind in cst_kinds {
        if FLOW_KINDS.contains(&kind) {
            return SyntacticStyle::FlowYaml;
        }
        if BLOCK_KINDS.contains(&kind) {
            return SyntacticStyle::BlockYaml;
        }
    }
    SyntacticStyle::BlockYaml
}

/// Classify the cursor position.
///
/// `container` is the nearest container from the tree; in flow styles an
/// unclosed bracket on the current line takes precedence over it.
pub fn detect_position(
    style: SyntacticStyle,
    text_before: &str,
    text_after: &str,
    container: Option<ContainerKind>,
) -> SyntacticPosition {
    match style {
        SyntacticStyle::BlockYaml => block_position(text_before, container),
        SyntacticStyle::FlowYaml | SyntacticStyle::Jsonc => {
            let container = unclosed_bracket(text_before)
                .map(|bracket| match bracket {
                    '[' => ContainerKind::Sequence,
                    _ => ContainerKind::Mapping,
                })
                .or(container);
            flow_position(text_before, text_after, container)
        }
    }
}

fn block_position(text_before: &str, container: Option<ContainerKind>) -> SyntacticPosition {
    let trimmed = text_before.trim();
    if trimmed.is_empty() {
        return match container {
            Some(ContainerKind::Mapping) => SyntacticPosition::KeyField,
            Some(ContainerKind::Sequence) => SyntacticPosition::SequenceItem,
            None => SyntacticPosition::Unknown,
        };
    }

    let entry = if trimmed == "-" {
        return SyntacticPosition::SequenceItem;
    } else if let Some(rest) = trimmed.strip_prefix("- ") {
        // `- name: ` is a mapping inside the item; a bare `- foo` is the item.
        if mapping_colon(rest).is_none() {
            return SyntacticPosition::SequenceItem;
        }
        rest
    } else {
        trimmed
    };

    match mapping_colon(entry) {
        Some(colon) if mapping_colon(&entry[colon + 1..]).is_none() => {
            SyntacticPosition::ValueField
        }
        _ => SyntacticPosition::KeyField,
    }
}

fn flow_position(
    text_before: &str,
    text_after: &str,
    container: Option<ContainerKind>,
) -> SyntacticPosition {
    let trimmed = text_before.trim_end();
    let next = text_after.trim_start();
    if (trimmed.ends_with('[') && next.starts_with(']'))
        || (trimmed.ends_with('{') && next.starts_with('}'))
    {
        return SyntacticPosition::EmptyContainer;
    }

    if let Some(quote) = open_quote(text_before) {
        return match text_before[..quote].trim_end().chars().last() {
            Some(':') => SyntacticPosition::ValueField,
            Some('[') => SyntacticPosition::StringContent,
            Some('{') => SyntacticPosition::KeyField,
            _ if container == Some(ContainerKind::Sequence) => SyntacticPosition::StringContent,
            _ => SyntacticPosition::KeyField,
        };
    }

    match trimmed.chars().last() {
        Some('{') => return SyntacticPosition::KeyField,
        Some('[') => return SyntacticPosition::SequenceItem,
        Some(',') if container == Some(ContainerKind::Mapping) => {
            return SyntacticPosition::KeyField;
        }
        Some(',') => return SyntacticPosition::SequenceItem,
        Some(':') => return SyntacticPosition::ValueField,
        _ => {}
    }

    if let Some(colon) = last_colon_outside_strings(text_before) {
        let after_colon = &text_before[colon + 1..];
        if !after_colon.contains([',', '{', '[', '}', ']']) {
            return SyntacticPosition::ValueField;
        }
    }

    match container {
        Some(ContainerKind::Mapping) => SyntacticPosition::KeyField,
        Some(ContainerKind::Sequence) => SyntacticPosition::SequenceItem,
        None => SyntacticPosition::Unknown,
    }
}

/// The token the user is in the middle of typing.
pub fn extract_typed_prefix(
    position: SyntacticPosition,
    style: SyntacticStyle,
    text_before: &str,
) -> String {
    let prefix = match position {
        SyntacticPosition::SequenceItem if style == SyntacticStyle::BlockYaml => text_before
            .rfind("- ")
            .map_or(text_before.trim_start(), |dash| &text_before[dash + 2..]),
        SyntacticPosition::SequenceItem => text_before
            .rfind([',', '['])
            .map_or(text_before, |delim| &text_before[delim + 1..]),
        SyntacticPosition::StringContent => text_before
            .rfind('"')
            .map_or("", |quote| &text_before[quote + 1..]),
        SyntacticPosition::KeyField => {
            let start = text_before
                .char_indices()
                .rev()
                .take_while(|(_, c)| is_word_char(*c))
                .last()
                .map_or(text_before.len(), |(i, _)| i);
            &text_before[start..]
        }
        SyntacticPosition::ValueField => text_before
            .rfind(':')
            .map_or("", |colon| &text_before[colon + 1..]),
        SyntacticPosition::EmptyContainer | SyntacticPosition::Unknown => "",
    };
    let prefix = prefix.trim_start();
    prefix
        .strip_prefix(['"', '\''])
        .unwrap_or(prefix)
        .to_string()
}

/// Byte offset of a YAML mapping indicator: a `:` followed by a space or
/// the end of the text, outside double quotes.
fn mapping_colon(text: &str) -> Option<usize> {
    let mut in_quotes = false;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match c {
            '"' => in_quotes = !in_quotes,
            ':' if !in_quotes => match chars.peek() {
                None | Some((_, ' ')) => return Some(i),
                _ => {}
            },
            _ => {}
        }
    }
    None
}

/// Byte offset of an unterminated `"` before the cursor.
fn open_quote(text: &str) -> Option<usize> {
    let mut open = None;
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        match c {
            '\\' if open.is_some() => {
                escaped = !escaped;
                continue;
            }
            '"' if !escaped => open = if open.is_some() { None } else { Some(i) },
            _ => {}
        }
        escaped = false;
    }
    open
}

fn last_colon_outside_strings(text: &str) -> Option<usize> {
    let mut in_quotes = false;
    let mut last = None;
    for (i, c) in text.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ':' if !in_quotes => last = Some(i),
            _ => {}
        }
    }
    last
}

/// The innermost `{` or `[` left open on this line.
fn unclosed_bracket(text: &str) -> Option<char> {
    let mut stack = Vec::new();
    let mut in_quotes = false;
    for c in text.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            _ if in_quotes => {}
            '{' | '[' => stack.push(c),
            '}' | ']' => {
                stack.pop();
            }
            _ => {}
        }
    }
    stack.pop()
}

#[cfg(test)]
mod tests {
    use super::*;

    use SyntacticPosition::*;

    #[test]
    fn test_detect_style() {
        assert_eq!(
            detect_style(DocumentFormat::Jsonc, ["block_mapping"], ""),
            SyntacticStyle::Jsonc
        );
        assert_eq!(
            detect_style(
                DocumentFormat::Yaml,
                ["plain_scalar", "flow_sequence", "block_mapping"],
                "  tags: [a, "
            ),
            SyntacticStyle::FlowYaml
        );
        assert_eq!(
            detect_style(
                DocumentFormat::Yaml,
                ["plain_scalar", "block_mapping", "flow_mapping"],
                "  x: 1"
            ),
            SyntacticStyle::BlockYaml
        );
        assert_eq!(
            detect_style(DocumentFormat::Yaml, ["block_mapping"], "  spec: { table"),
            SyntacticStyle::FlowYaml
        );
        assert_eq!(
            detect_style(DocumentFormat::Yaml, std::iter::empty(), ""),
            SyntacticStyle::BlockYaml
        );
    }

    #[test]
    fn test_block_positions() {
        let block = |before: &str, container| {
            detect_position(SyntacticStyle::BlockYaml, before, "", container)
        };
        assert_eq!(block("    ", Some(ContainerKind::Mapping)), KeyField);
        assert_eq!(block("    ", Some(ContainerKind::Sequence)), SequenceItem);
        assert_eq!(block("", None), Unknown);
        assert_eq!(block("  -", None), SequenceItem);
        assert_eq!(block("  - us-east", None), SequenceItem);
        assert_eq!(block("  - name: ", None), ValueField);
        assert_eq!(block("    type: aws/", None), ValueField);
        assert_eq!(block("    type:", None), ValueField);
        assert_eq!(block("    image: repo:tag", None), ValueField);
        assert_eq!(block("    spe", Some(ContainerKind::Mapping)), KeyField);
        assert_eq!(block("  a: b: ", None), KeyField);
    }

    #[test]
    fn test_flow_positions() {
        let flow = |before: &str, after: &str, container| {
            detect_position(SyntacticStyle::Jsonc, before, after, container)
        };
        assert_eq!(flow("  \"tags\": [", "]", None), EmptyContainer);
        assert_eq!(flow("  \"spec\": { ", " }", None), EmptyContainer);
        assert_eq!(flow("  \"tags\": [\"a\", \"b", "", None), StringContent);
        assert_eq!(flow("  \"type\": \"aws/", "", None), ValueField);
        assert_eq!(flow("  { \"ty", "", None), KeyField);
        assert_eq!(flow("  \"spec\": {", "", None), KeyField);
        assert_eq!(flow("  \"tags\": [", "", None), SequenceItem);
        assert_eq!(flow("  \"a\": 1,", "", Some(ContainerKind::Mapping)), KeyField);
        assert_eq!(flow("  1,", "", Some(ContainerKind::Sequence)), SequenceItem);
        assert_eq!(flow("  \"type\":", "", None), ValueField);
        assert_eq!(flow("  \"count\": 1", "", None), ValueField);
        assert_eq!(flow("    ", "", Some(ContainerKind::Mapping)), KeyField);
        assert_eq!(flow("", "", None), Unknown);
    }

    #[test]
    fn test_unclosed_bracket_overrides_container() {
        let position = detect_position(
            SyntacticStyle::FlowYaml,
            "  tags: [a,",
            "",
            Some(ContainerKind::Mapping),
        );
        assert_eq!(position, SequenceItem);
    }

    #[test]
    fn test_typed_prefix() {
        use SyntacticStyle::*;
        assert_eq!(extract_typed_prefix(SequenceItem, BlockYaml, "  - us-ea"), "us-ea");
        assert_eq!(extract_typed_prefix(SequenceItem, FlowYaml, "tags: [a, bc"), "bc");
        assert_eq!(extract_typed_prefix(StringContent, Jsonc, "[\"a\", \"bc"), "bc");
        assert_eq!(extract_typed_prefix(KeyField, BlockYaml, "    spe"), "spe");
        assert_eq!(extract_typed_prefix(KeyField, Jsonc, "  { \"table_na"), "table_na");
        assert_eq!(extract_typed_prefix(ValueField, BlockYaml, "    type: aws/"), "aws/");
        assert_eq!(extract_typed_prefix(ValueField, Jsonc, "  \"type\": \"aws"), "aws");
        assert_eq!(extract_typed_prefix(EmptyContainer, Jsonc, "[ "), "");
    }
}
