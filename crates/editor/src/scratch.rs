//! An in-memory host.
//!
//! [`ScratchHost`] keeps a buffer as a list of lines and behaves like an
//! editor that maps keys through [`MapCommand`]s: typing a mapped key calls
//! the session entry point and inserts what it returns, typing anything
//! else inserts the key. Used for headless runs and the test suites.

use std::collections::{BTreeSet, HashMap};
use std::ops::Range;

use doubletap_config::VariableSource;
use doubletap_input::Clock;
use doubletap_primitives::{CharIdx, Mode, Position, clamp_col, len_chars, splice};
use serde_json::Value;

use crate::host::{BufferAccess, Host, HostError, Result};
use crate::keymap::{MapCommand, MapMode};
use crate::session::DoubleTap;

#[derive(Debug, Clone)]
struct SyntaxRegion {
	line: usize,
	cols: Range<CharIdx>,
	name: String,
}

#[derive(Debug, Clone)]
pub struct ScratchHost {
	lines: Vec<String>,
	cursor: Position,
	mode: Mode,
	filetype: String,
	syntax: Vec<SyntaxRegion>,
	variables: HashMap<String, Value>,
	mappings: Vec<MapCommand>,
	failing: BTreeSet<&'static str>,
}

impl Default for ScratchHost {
	fn default() -> Self {
		Self::new("")
	}
}

impl ScratchHost {
	/// A buffer holding `text`, in insert mode, cursor at the start.
	pub fn new(text: &str) -> Self {
		Self {
			lines: text.split('\n').map(str::to_string).collect(),
			cursor: Position::default(),
			mode: Mode::Insert,
			filetype: String::new(),
			syntax: Vec::new(),
			variables: HashMap::new(),
			mappings: Vec::new(),
			failing: BTreeSet::new(),
		}
	}

	#[must_use]
	pub fn with_cursor(mut self, line: usize, col: CharIdx) -> Self {
		self.cursor = Position::new(line, col);
		self
	}

	#[must_use]
	pub fn with_mode(mut self, mode: Mode) -> Self {
		self.mode = mode;
		self
	}

	#[must_use]
	pub fn with_filetype(mut self, filetype: &str) -> Self {
		self.filetype = filetype.to_string();
		self
	}

	/// Defines a host variable, e.g. `g:doubletap_timeout`.
	#[must_use]
	pub fn with_variable(mut self, name: &str, value: Value) -> Self {
		self.variables.insert(name.to_string(), value);
		self
	}

	/// Marks columns `cols` of `line` as syntax group `name`.
	#[must_use]
	pub fn with_syntax(mut self, line: usize, cols: Range<CharIdx>, name: &str) -> Self {
		self.syntax.push(SyntaxRegion {
			line,
			cols,
			name: name.to_string(),
		});
		self
	}

	/// Makes every call to host operation `method` fail.
	#[must_use]
	pub fn fail_on(mut self, method: &'static str) -> Self {
		self.failing.insert(method);
		self
	}

	pub fn set_mode(&mut self, mode: Mode) {
		self.mode = mode;
	}

	pub fn set_filetype(&mut self, filetype: &str) {
		self.filetype = filetype.to_string();
	}

	pub fn set_variable(&mut self, name: &str, value: Value) {
		self.variables.insert(name.to_string(), value);
	}

	pub fn lines(&self) -> &[String] {
		&self.lines
	}

	/// The buffer joined with `\n`.
	pub fn text(&self) -> String {
		self.lines.join("\n")
	}

	pub fn position(&self) -> Position {
		self.cursor
	}

	/// Mappings registered so far, in registration order.
	pub fn mappings(&self) -> &[MapCommand] {
		&self.mappings
	}

	/// Types `key` the way an editor with the registered mappings would.
	///
	/// Returns the text that reached the buffer. In normal mode the entry
	/// point's return value is discarded, as with `:call`.
	pub fn type_key<C: Clock>(&mut self, session: &mut DoubleTap<C>, key: char) -> String {
		let map_mode = match self.mode {
			Mode::Insert => Some(MapMode::Insert),
			Mode::Normal => Some(MapMode::Normal),
			Mode::Other => None,
		};
		let mapping = map_mode.and_then(|mode| self.mappings.iter().find(|m| m.mode == mode && m.key == key).copied());

		let text = match mapping {
			Some(mapping) => session.handle(self, mapping.entry, &key.to_string()),
			None => {
				session.observe_key(key);
				key.to_string()
			}
		};

		if self.mode.is_insert() {
			self.insert_at_cursor(&text);
			text
		} else {
			String::new()
		}
	}

	fn insert_at_cursor(&mut self, text: &str) {
		let Some(line) = self.lines.get_mut(self.cursor.line) else {
			return;
		};
		let col = clamp_col(line, self.cursor.col);
		*line = splice(line, col, col, text);
		self.cursor.col = col + len_chars(text);
	}

	fn check(&self, method: &'static str) -> Result<()> {
		if self.failing.contains(method) {
			return Err(HostError::call(method, "injected failure"));
		}
		Ok(())
	}

	fn line_index(&self, line: usize) -> Result<usize> {
		if line < self.lines.len() {
			Ok(line)
		} else {
			Err(HostError::LineOutOfRange {
				line,
				len: self.lines.len(),
			})
		}
	}
}

impl BufferAccess for ScratchHost {
	fn cursor(&self) -> Result<Position> {
		self.check("cursor")?;
		Ok(self.cursor)
	}

	fn set_cursor(&mut self, pos: Position) -> Result<()> {
		self.check("set_cursor")?;
		let line = self.line_index(pos.line)?;
		self.cursor = Position::new(line, clamp_col(&self.lines[line], pos.col));
		Ok(())
	}

	fn line(&self, line: usize) -> Result<String> {
		self.check("line")?;
		let line = self.line_index(line)?;
		Ok(self.lines[line].clone())
	}

	fn set_line(&mut self, line: usize, text: &str) -> Result<()> {
		self.check("set_line")?;
		let line = self.line_index(line)?;
		self.lines[line] = text.to_string();
		Ok(())
	}

	fn search_forward(&self, needle: char, from: Position) -> Result<Option<Position>> {
		self.check("search_forward")?;
		let hit = self.lines.iter().enumerate().skip(from.line).find_map(|(idx, line)| {
			let skip = if idx == from.line { from.col } else { 0 };
			line.chars()
				.enumerate()
				.skip(skip)
				.find(|(_, c)| *c == needle)
				.map(|(col, _)| Position::new(idx, col))
		});
		Ok(hit)
	}
}

impl VariableSource for ScratchHost {
	fn variable(&self, name: &str) -> Option<Value> {
		self.variables.get(name).cloned()
	}
}

impl Host for ScratchHost {
	fn filetype(&self) -> Result<String> {
		self.check("filetype")?;
		Ok(self.filetype.clone())
	}

	fn mode(&self) -> Result<Mode> {
		self.check("mode")?;
		Ok(self.mode)
	}

	fn syntax_name_at_cursor(&self) -> Result<String> {
		self.check("syntax_name_at_cursor")?;
		let name = self
			.syntax
			.iter()
			.find(|region| region.line == self.cursor.line && region.cols.contains(&self.cursor.col))
			.map(|region| region.name.clone())
			.unwrap_or_default();
		Ok(name)
	}

	fn register_mapping(&mut self, mapping: &MapCommand) -> Result<()> {
		self.check("register_mapping")?;
		self.mappings.retain(|m| !(m.mode == mapping.mode && m.key == mapping.key));
		self.mappings.push(*mapping);
		Ok(())
	}
}
