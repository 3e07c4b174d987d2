//! Cursor-relative text extraction.
//!
//! Everything here works on raw text only, so it stays usable when the
//! document does not parse.

use blueprint_source_map::Position;
use serde::Serialize;

/// The text around a cursor on its line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextContext {
    pub current_line: String,
    pub text_before: String,
    pub text_after: String,
    /// The run of word characters around the cursor.
    pub current_word: String,
}

impl TextContext {
    /// Slice `content` around `position`.
    ///
    /// A line past the end of the document yields an empty context; a column
    /// past the end of its line is clamped to the line length.
    pub fn extract(content: &str, position: Position) -> Self {
        let Some(line) = position
            .line
            .checked_sub(1)
            .and_then(|row| content.split('\n').nth(row as usize))
        else {
            return Self::default();
        };
        let line = line.strip_suffix('\r').unwrap_or(line);
        let chars: Vec<char> = line.chars().collect();
        let cursor = (position.column.saturating_sub(1) as usize).min(chars.len());

        let mut word_start = cursor;
        while word_start > 0 && is_word_char(chars[word_start - 1]) {
            word_start -= 1;
        }
        let mut word_end = cursor;
        while word_end < chars.len() && is_word_char(chars[word_end]) {
            word_end += 1;
        }

        Self {
            current_line: line.to_string(),
            text_before: chars[..cursor].iter().collect(),
            text_after: chars[cursor..].iter().collect(),
            current_word: chars[word_start..word_end].iter().collect(),
        }
    }

    pub fn is_blank_line(&self) -> bool {
        self.current_line.trim().is_empty()
    }

    /// 1-based column of the first non-space character before the cursor.
    pub fn indentation_column(&self) -> u32 {
        let indent = self.text_before.chars().take_while(|c| *c == ' ').count();
        indent as u32 + 1
    }
}

pub(crate) fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')
}

/// Whether the cursor sits inside an unclosed `${`.
///
/// Counts `${` openers against every `}`. Nested braces inside a
/// substitution are not distinguished.
pub fn in_substitution(text_before: &str) -> bool {
    text_before.matches("${").count() > text_before.matches('}').count()
}

/// The text typed since the last `${`, or `""` outside a substitution.
pub fn substitution_text(text_before: &str) -> &str {
    if !in_substitution(text_before) {
        return "";
    }
    text_before
        .rfind("${")
        .map_or("", |start| &text_before[start + 2..])
}

/// Whether `text_before` ends with `key:` (optionally quoted) and nothing
/// typed after the colon.
pub(crate) fn ends_with_key(text_before: &str, key: &str) -> bool {
    let Some(before_colon) = text_before.trim_end().strip_suffix(':') else {
        return false;
    };
    let bare = before_colon.strip_suffix(key);
    let quoted = before_colon
        .strip_suffix('"')
        .and_then(|s| s.strip_suffix(key))
        .and_then(|s| s.strip_suffix('"'));
    [bare, quoted].into_iter().flatten().any(|lead| {
        lead.chars()
            .last()
            .is_none_or(|c| c.is_whitespace() || matches!(c, '{' | ',' | '-'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_splits_at_cursor() {
        let content = "resources:\n  orders:\n    type: aws/dynamo.table\n";
        let ctx = TextContext::extract(content, Position::new(3, 14));
        assert_eq!(ctx.current_line, "    type: aws/dynamo.table");
        assert_eq!(ctx.text_before, "    type: aws");
        assert_eq!(ctx.text_after, "/dynamo.table");
        assert_eq!(ctx.current_word, "aws");

        let ctx = TextContext::extract(content, Position::new(3, 22));
        assert_eq!(ctx.current_word, "dynamo.table");
    }

    #[test]
    fn test_extract_out_of_range() {
        let content = "version: 1\r\nresources:\r\n";
        assert_eq!(TextContext::extract(content, Position::new(9, 1)), TextContext::default());
        assert_eq!(TextContext::extract(content, Position::new(0, 1)), TextContext::default());

        let ctx = TextContext::extract(content, Position::new(1, 40));
        assert_eq!(ctx.current_line, "version: 1");
        assert_eq!(ctx.text_before, "version: 1");
        assert_eq!(ctx.text_after, "");
    }

    #[test]
    fn test_indentation() {
        let ctx = TextContext::extract("\n      \n", Position::new(2, 5));
        assert!(ctx.is_blank_line());
        assert_eq!(ctx.indentation_column(), 5);

        let ctx = TextContext::extract("  - name\n", Position::new(1, 9));
        assert!(!ctx.is_blank_line());
        assert_eq!(ctx.indentation_column(), 3);
    }

    #[test]
    fn test_substitution_detection() {
        assert!(in_substitution("image: ${"));
        assert!(in_substitution("a: ${variables.x}-${resources.orders."));
        assert!(!in_substitution("a: ${variables.x}"));
        assert!(!in_substitution("plain text"));

        assert_eq!(substitution_text("a: ${variables.x}-${resources.ord"), "resources.ord");
        assert_eq!(substitution_text("a: ${variables.x}"), "");
        assert_eq!(substitution_text("a: ${"), "");
    }

    #[test]
    fn test_ends_with_key() {
        assert!(ends_with_key("    type: ", "type"));
        assert!(ends_with_key("    type:", "type"));
        assert!(ends_with_key("  { \"type\": ", "type"));
        assert!(ends_with_key("  - field: ", "field"));
        assert!(!ends_with_key("    subtype: ", "type"));
        assert!(!ends_with_key("    type: aws", "type"));
    }
}
