/// The host editor's mode at the time of a key event.
///
/// Only the distinction between insert and normal mode matters for editing:
/// in insert mode the host has already placed the first tap in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
	#[default]
	Insert,
	Normal,
	/// Visual, replace, command-line, and anything else.
	Other,
}

impl Mode {
	/// Parses a Vim-style `mode()` string (`"i"`, `"n"`, `"niI"`, ...).
	///
	/// Only the first character is significant.
	pub fn from_mode_str(s: &str) -> Self {
		match s.chars().next().map(|c| c.to_ascii_lowercase()) {
			Some('i') => Mode::Insert,
			Some('n') => Mode::Normal,
			_ => Mode::Other,
		}
	}

	pub fn is_insert(self) -> bool {
		matches!(self, Mode::Insert)
	}
}
