//! Key behaviors triggered by a double tap.

use doubletap_primitives::len_chars;

/// Splice a pair of characters in place of the doubled key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertPair {
	/// The text spliced in, e.g. `"()"`.
	pub insert_text: String,
	/// How far the cursor moves back from the end of `insert_text`.
	pub backspace_count: usize,
	/// Quote-like keys honor the in-string veto.
	pub is_string_delimiter: bool,
}

impl InsertPair {
	/// A pair with the cursor placed before its last character.
	pub fn new(insert_text: impl Into<String>) -> Self {
		Self {
			insert_text: insert_text.into(),
			backspace_count: 1,
			is_string_delimiter: false,
		}
	}

	/// A symmetric quote pair that honors the in-string veto.
	pub fn quote(quote: char) -> Self {
		Self {
			is_string_delimiter: true,
			..Self::new(format!("{quote}{quote}"))
		}
	}

	#[must_use]
	pub fn with_backspace(mut self, backspace_count: usize) -> Self {
		self.backspace_count = backspace_count;
		self
	}

	/// Cursor offset from the splice point after insertion.
	///
	/// Saturates at zero when `backspace_count` exceeds the inserted text.
	pub fn cursor_offset(&self) -> usize {
		len_chars(&self.insert_text).saturating_sub(self.backspace_count)
	}
}

/// Append a terminator to the end of the current line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinishLine {
	pub terminator: char,
}

/// Move the cursor past the next occurrence of a closing character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpOut {
	pub right_char: char,
}

/// What a confirmed double tap of a trigger key does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Behavior {
	InsertPair(InsertPair),
	FinishLine(FinishLine),
	JumpOut(JumpOut),
}

impl Behavior {
	/// Name of the configuration map this behavior lives in.
	pub fn map_name(&self) -> &'static str {
		match self {
			Behavior::InsertPair(_) => "insert",
			Behavior::FinishLine(_) => "finishers",
			Behavior::JumpOut(_) => "jump",
		}
	}
}

/// A configured behavior plus its enabled flag.
///
/// Disabled bindings stay in the resolved maps so a filetype layer can
/// re-enable them, but they are never mapped and never trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding<T> {
	pub action: T,
	pub enabled: bool,
}

impl<T> Binding<T> {
	pub fn new(action: T) -> Self {
		Self { action, enabled: true }
	}

	pub fn disabled(action: T) -> Self {
		Self { action, enabled: false }
	}

	/// Returns the action when the binding is enabled.
	pub fn active(&self) -> Option<&T> {
		self.enabled.then_some(&self.action)
	}
}
