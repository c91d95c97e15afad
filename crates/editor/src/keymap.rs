//! Key-mapping commands routing trigger keys to session entry points.

use std::collections::BTreeSet;
use std::fmt;

use doubletap_config::{Behavior, ResolvedConfig};

/// Host mode a mapping applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MapMode {
	Insert,
	Normal,
}

/// Session entry point a key is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntryPoint {
	Insert,
	FinishLine,
	JumpOut,
}

impl EntryPoint {
	/// Name of the host function bound to this entry point.
	pub fn function_name(self) -> &'static str {
		match self {
			EntryPoint::Insert => "DoubleTapInsert",
			EntryPoint::FinishLine => "DoubleTapFinishLine",
			EntryPoint::JumpOut => "DoubleTapJumpOut",
		}
	}

	/// The enabled behavior `key` has under this entry point's map.
	pub fn behavior(self, config: &ResolvedConfig, key: char) -> Option<Behavior> {
		match self {
			EntryPoint::Insert => config.insert(key).cloned().map(Behavior::InsertPair),
			EntryPoint::FinishLine => config.finisher(key).map(Behavior::FinishLine),
			EntryPoint::JumpOut => config.jump(key).map(Behavior::JumpOut),
		}
	}
}

impl fmt::Display for EntryPoint {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.function_name())
	}
}

/// One key mapping to register with the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MapCommand {
	pub mode: MapMode,
	pub key: char,
	pub entry: EntryPoint,
}

impl MapCommand {
	pub fn new(mode: MapMode, key: char, entry: EntryPoint) -> Self {
		Self { mode, key, entry }
	}

	/// Renders the Vim mapping command.
	///
	/// Insert mappings evaluate the entry point through `<C-R>=` so its
	/// return value is inserted; normal mappings leave insert mode and
	/// `:call` it.
	pub fn to_command(&self) -> String {
		let lhs = key_notation(self.key);
		let func = self.entry.function_name();
		let arg = quoted_arg(self.key);
		match self.mode {
			MapMode::Insert => format!("imap <silent> {lhs} <C-R>={func}({arg})<CR>"),
			MapMode::Normal => format!("nmap <silent> {lhs} <ESC>:call {func}({arg})<CR>"),
		}
	}
}

impl fmt::Display for MapCommand {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_command())
	}
}

/// Key notation for characters that cannot appear raw in a mapping.
///
/// Whitespace and control characters would split or end the command, so
/// anything without a named form is written as `<Char-N>`.
fn key_notation(key: char) -> String {
	match key {
		'<' => "<lt>".to_string(),
		'|' => "<Bar>".to_string(),
		'\\' => "<Bslash>".to_string(),
		' ' => "<Space>".to_string(),
		'\t' => "<Tab>".to_string(),
		'\n' => "<NL>".to_string(),
		'\r' => "<CR>".to_string(),
		c if c.is_whitespace() || c.is_control() => format!("<Char-{}>", u32::from(c)),
		c => c.to_string(),
	}
}

fn quoted_arg(key: char) -> String {
	match key {
		'\'' => "\"'\"".to_string(),
		c => format!("'{}'", key_notation(c)),
	}
}

/// Every mapping the resolved configuration needs, in registration order.
///
/// Disabled keys are skipped. A key already claimed in insert mode by an
/// earlier map is not mapped again, matching [`ResolvedConfig::behavior`]
/// precedence.
pub fn mappings(config: &ResolvedConfig) -> Vec<MapCommand> {
	let mut claimed = BTreeSet::new();
	let mut out = Vec::new();

	let inserts = config.inserts().iter().filter(|(_, b)| b.enabled).map(|(k, _)| (*k, EntryPoint::Insert));
	let finishers = config
		.finishers()
		.iter()
		.filter(|(_, b)| b.enabled)
		.map(|(k, _)| (*k, EntryPoint::FinishLine));
	let jumps = config.jumps().iter().filter(|(_, b)| b.enabled).map(|(k, _)| (*k, EntryPoint::JumpOut));

	for (key, entry) in inserts.chain(finishers).chain(jumps) {
		if !claimed.insert(key) {
			continue;
		}
		out.push(MapCommand::new(MapMode::Insert, key, entry));
		if entry == EntryPoint::FinishLine {
			out.push(MapCommand::new(MapMode::Normal, key, entry));
		}
	}
	out
}
