//! Host adapter interface.
//!
//! The core never owns a buffer. Every read and write goes through these
//! traits, and every call is synchronous: the host blocks the keystroke
//! until the entry point returns.

use doubletap_config::VariableSource;
use doubletap_primitives::{Mode, Position};
use thiserror::Error;

use crate::keymap::MapCommand;

/// Failure reported by a host adapter.
///
/// Entry points catch these, log them, and insert the key literally.
#[derive(Debug, Error)]
pub enum HostError {
	/// A call into the host failed or returned malformed data.
	#[error("host call {method} failed: {message}")]
	Call {
		/// Name of the failed operation.
		method: &'static str,
		/// Host-provided description.
		message: String,
	},

	/// A line index outside the buffer.
	#[error("line {line} out of range ({len} lines)")]
	LineOutOfRange {
		/// Requested line.
		line: usize,
		/// Number of lines in the buffer.
		len: usize,
	},
}

impl HostError {
	pub fn call(method: &'static str, message: impl Into<String>) -> Self {
		Self::Call {
			method,
			message: message.into(),
		}
	}
}

/// Result type for host calls.
pub type Result<T> = std::result::Result<T, HostError>;

/// Cursor and line access to the current buffer.
///
/// Positions are 0-indexed lines and character columns.
pub trait BufferAccess {
	fn cursor(&self) -> Result<Position>;

	fn set_cursor(&mut self, pos: Position) -> Result<()>;

	/// Returns the text of line `line`, without its line terminator.
	fn line(&self, line: usize) -> Result<String>;

	/// Replaces the text of line `line`.
	fn set_line(&mut self, line: usize, text: &str) -> Result<()>;

	/// Finds the next `needle` at or after `from`, without wrapping.
	///
	/// Hosts may bound the scan (by lines or time); a bounded miss is `None`.
	fn search_forward(&self, needle: char, from: Position) -> Result<Option<Position>>;
}

/// Everything a host editor exposes to the double-tap session.
pub trait Host: BufferAccess + VariableSource {
	/// Filetype of the current buffer; empty when undetected.
	fn filetype(&self) -> Result<String>;

	fn mode(&self) -> Result<Mode>;

	/// Syntax group name of the character under the cursor; empty if none.
	fn syntax_name_at_cursor(&self) -> Result<String>;

	/// Routes a key to a session entry point.
	fn register_mapping(&mut self, mapping: &MapCommand) -> Result<()>;
}
