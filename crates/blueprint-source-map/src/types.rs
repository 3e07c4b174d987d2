//! Core types for source positions

use serde::{Deserialize, Serialize};

/// A cursor position (1-indexed line and column)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct Position {
    /// Line number (1-indexed)
    pub line: u32,
    /// Column number (1-indexed, in characters not bytes)
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// A source range.
///
/// The start is always known. The end is absent for open nodes, such as a
/// mapping value that has not been typed yet; an open range covers its start
/// line from the start column onwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    /// Start position (inclusive)
    pub start: Position,
    /// End position, the column just past the last character
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<Position>,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    /// A range with no known end.
    pub fn open(start: Position) -> Self {
        Self { start, end: None }
    }

    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// The last line this range touches.
    pub fn end_line(&self) -> u32 {
        self.end.map_or(self.start.line, |end| end.line)
    }

    pub fn spans_line(&self, line: u32) -> bool {
        self.start.line <= line && line <= self.end_line()
    }

    /// Containment without leeway. See [`Range::contains_with_leeway`].
    pub fn contains(&self, pos: Position) -> bool {
        self.contains_with_leeway(pos, 0)
    }

    /// Check whether `pos` falls inside this range.
    ///
    /// `leeway` moves the start column back by that many columns so a cursor
    /// sitting just before a token still hits it. The end is never extended:
    /// the cursor directly after the last character is inside, one column
    /// further is not.
    pub fn contains_with_leeway(&self, pos: Position, leeway: u32) -> bool {
        let start_column = self.start.column.saturating_sub(leeway);
        let Some(end) = self.end else {
            return pos.line == self.start.line && pos.column >= start_column;
        };

        if pos.line < self.start.line || pos.line > end.line {
            return false;
        }
        if self.start.line == end.line {
            return start_column <= pos.column && pos.column <= end.column;
        }
        if pos.line == self.start.line {
            return pos.column >= start_column;
        }
        if pos.line == end.line {
            return pos.column <= end.column;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(sl: u32, sc: u32, el: u32, ec: u32) -> Range {
        Range::new(Position::new(sl, sc), Position::new(el, ec))
    }

    #[test]
    fn test_position_ordering() {
        let p1 = Position::new(1, 5);
        let p2 = Position::new(1, 10);
        let p3 = Position::new(2, 1);

        assert!(p1 < p2);
        assert!(p2 < p3);
        assert!(p1 < p3);
    }

    #[test]
    fn test_single_line_containment() {
        let r = range(3, 5, 3, 10);

        assert!(r.contains(Position::new(3, 5)));
        assert!(r.contains(Position::new(3, 7)));
        assert!(r.contains(Position::new(3, 10)));
        assert!(!r.contains(Position::new(3, 11)));
        assert!(!r.contains(Position::new(3, 4)));
        assert!(!r.contains(Position::new(2, 7)));
        assert!(!r.contains(Position::new(4, 7)));
    }

    #[test]
    fn test_multi_line_containment() {
        let r = range(2, 3, 5, 4);

        assert!(r.contains(Position::new(2, 3)));
        assert!(!r.contains(Position::new(2, 2)));
        assert!(r.contains(Position::new(3, 1)));
        assert!(r.contains(Position::new(4, 200)));
        assert!(r.contains(Position::new(5, 4)));
        assert!(!r.contains(Position::new(5, 5)));
    }

    #[test]
    fn test_leeway_only_extends_start() {
        let r = range(1, 5, 1, 9);

        assert!(!r.contains(Position::new(1, 4)));
        assert!(r.contains_with_leeway(Position::new(1, 4), 1));
        assert!(r.contains_with_leeway(Position::new(1, 3), 2));
        assert!(!r.contains_with_leeway(Position::new(1, 10), 1));
        assert!(!r.contains_with_leeway(Position::new(1, 10), 5));
    }

    #[test]
    fn test_open_range_covers_rest_of_start_line() {
        let r = Range::open(Position::new(4, 9));

        assert!(r.is_open());
        assert!(r.contains(Position::new(4, 9)));
        assert!(r.contains(Position::new(4, 40)));
        assert!(!r.contains(Position::new(4, 8)));
        assert!(!r.contains(Position::new(5, 1)));
        assert_eq!(r.end_line(), 4);
    }

    #[test]
    fn test_leeway_saturates_at_line_start() {
        let r = range(1, 1, 1, 3);
        assert!(r.contains_with_leeway(Position::new(1, 1), 4));
    }

    #[test]
    fn test_open_range_serialization_omits_end() {
        let json = serde_json::to_string(&Range::open(Position::new(1, 2))).unwrap();
        assert_eq!(json, r#"{"start":{"line":1,"column":2}}"#);

        let back: Range = serde_json::from_str(&json).unwrap();
        assert!(back.is_open());
    }
}
