//! Built-in defaults applied before any host variable.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::behavior::{Binding, FinishLine, InsertPair, JumpOut};

/// Maximum gap between two taps of the same key.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(750);

/// Whether double taps are honored while the cursor is inside a string.
pub const INSERT_IN_STRING: bool = false;

/// Substrings of syntax group names that mark string-like regions.
pub const SYNTAX_STRINGS: &[&str] = &[
	"string",
	"quotes",
	"heredoc",
	"doctestvalue",
	"doctest",
	"doctest2",
	"bytesescape",
];

pub fn inserts() -> BTreeMap<char, Binding<InsertPair>> {
	let brackets = [('(', "()"), ('[', "[]"), ('{', "{}"), ('<', "<>")]
		.into_iter()
		.map(|(key, pair)| (key, Binding::new(InsertPair::new(pair))));
	let quotes = ['\'', '"', '`']
		.into_iter()
		.map(|quote| (quote, Binding::new(InsertPair::quote(quote))));
	brackets.chain(quotes).collect()
}

pub fn finishers() -> BTreeMap<char, Binding<FinishLine>> {
	[';', ',']
		.into_iter()
		.map(|key| (key, Binding::new(FinishLine { terminator: key })))
		.collect()
}

pub fn jumps() -> BTreeMap<char, Binding<JumpOut>> {
	[')', ']', '}', '>']
		.into_iter()
		.map(|key| (key, Binding::new(JumpOut { right_char: key })))
		.collect()
}

pub fn syntax_types() -> Vec<String> {
	SYNTAX_STRINGS.iter().map(|s| s.to_string()).collect()
}
