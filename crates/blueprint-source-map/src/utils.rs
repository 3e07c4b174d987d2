//! Utility functions for converting between offsets and positions

use crate::types::Position;

/// Number of lines an editor shows for `source`.
///
/// A trailing newline opens one more (empty) line, so `"a\n"` has two lines.
pub fn line_count(source: &str) -> u32 {
    u32::try_from(source.split('\n').count()).unwrap_or(u32::MAX)
}

/// Convert a byte offset to a 1-based position.
///
/// Returns None if the offset is out of bounds or not on a char boundary.
pub fn offset_to_position(source: &str, offset: usize) -> Option<Position> {
    let prefix = source.get(..offset)?;
    let line = prefix.matches('\n').count() + 1;
    let line_start = prefix.rfind('\n').map_or(0, |i| i + 1);
    let column = prefix[line_start..].chars().count() + 1;

    Some(Position::new(to_u32(line), to_u32(column)))
}

/// Byte offsets of line starts, for converting parser points.
///
/// Parsers such as tree-sitter report 0-based rows and byte columns; this
/// turns them into 1-based lines and character columns.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(source.match_indices('\n').map(|(i, _)| i + 1));
        Self { line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Convert a 0-based row and byte column into a [`Position`].
    ///
    /// Rows past the end clamp to the last line. A byte column that does not
    /// land on a char boundary falls back to counting bytes.
    pub fn position(&self, source: &str, row: usize, byte_column: usize) -> Position {
        let row = row.min(self.line_starts.len() - 1);
        let line_start = self.line_starts[row];
        let end = (line_start + byte_column).min(source.len());
        let column = source
            .get(line_start..end)
            .map_or(byte_column, |text| text.chars().count());

        Position::new(to_u32(row + 1), to_u32(column + 1))
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
