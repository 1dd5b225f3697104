//! Source coordinates for error reporting
//!
//! Every AST node and token carries a coordinate so diagnostics can point
//! back at the offending piece of source text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in the translation unit (line and column are 1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub line: u32,
    pub column: Option<u32>,
}

impl Coord {
    /// Create a coordinate with both line and column
    pub fn new(line: u32, column: u32) -> Self {
        Self {
            line,
            column: Some(column),
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.column {
            Some(column) => write!(f, "{}:{}", self.line, column),
            None => write!(f, "{}", self.line),
        }
    }
}

/// Helper for computing coordinates while scanning characters
#[derive(Debug, Clone)]
pub struct SourceTracker {
    line: u32,
    column: u32,
}

impl SourceTracker {
    pub fn new() -> Self {
        Self { line: 1, column: 1 }
    }

    /// Get current coordinate
    pub fn coord(&self) -> Coord {
        Coord::new(self.line, self.column)
    }

    /// Advance by one character
    pub fn advance(&mut self, ch: char) {
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl Default for SourceTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_display() {
        assert_eq!(format!("{}", Coord::new(42, 10)), "42:10");
        assert_eq!(format!("{}", Coord { line: 7, column: None }), "7");
    }

    #[test]
    fn test_source_tracker() {
        let mut tracker = SourceTracker::new();
        assert_eq!(tracker.coord(), Coord::new(1, 1));

        tracker.advance('h');
        tracker.advance('i');
        tracker.advance('\n');
        tracker.advance('t');

        assert_eq!(tracker.coord(), Coord::new(2, 2));
    }
}
