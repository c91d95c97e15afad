use doubletap_primitives::{Mode, Position, char_at, char_before, clamp_col};
use tracing::debug;

use crate::host::{Host, Result};

/// Snapshot of the cursor line for one key event.
///
/// Fetched fresh for every event and dropped when the event is handled,
/// so a buffer or window switch between keystrokes is never seen stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferContext {
	/// Cursor with its column clamped to the line.
	pub cursor: Position,
	/// Text of the cursor line.
	pub line: String,
	pub mode: Mode,
}

impl BufferContext {
	pub fn fetch<H: Host + ?Sized>(host: &H) -> Result<Self> {
		let cursor = host.cursor()?;
		let line = host.line(cursor.line)?;
		let mode = host.mode()?;
		Ok(Self::new(cursor, line, mode))
	}

	/// Builds a context, clamping the cursor column into the line.
	pub fn new(cursor: Position, line: impl Into<String>, mode: Mode) -> Self {
		let line = line.into();
		let col = clamp_col(&line, cursor.col);
		if col != cursor.col {
			debug!(reported = cursor.col, clamped = col, "cursor column beyond line end");
		}
		Self {
			cursor: cursor.with_col(col),
			line,
			mode,
		}
	}

	pub fn char_before_cursor(&self) -> Option<char> {
		char_before(&self.line, self.cursor.col)
	}

	pub fn char_under_cursor(&self) -> Option<char> {
		char_at(&self.line, self.cursor.col)
	}
}
