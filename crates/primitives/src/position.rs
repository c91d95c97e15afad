use std::fmt;

use crate::line::CharIdx;

/// A cursor position: 0-indexed line and 0-indexed character column.
///
/// Columns count characters, not bytes. Hosts that address text by byte
/// convert at the adapter boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
	/// Line index.
	pub line: usize,
	/// Character column within the line.
	pub col: CharIdx,
}

impl Position {
	pub const fn new(line: usize, col: CharIdx) -> Self {
		Self { line, col }
	}

	/// Returns the same line with a different column.
	#[must_use]
	pub const fn with_col(self, col: CharIdx) -> Self {
		Self { line: self.line, col }
	}
}

impl fmt::Display for Position {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.line, self.col)
	}
}
