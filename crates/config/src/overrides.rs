//! Partial override values read from host variables.
//!
//! Every apply function works on a copy of the map and commits only when
//! the whole variable parsed, so a malformed entry leaves the lower layer
//! untouched.

use std::collections::BTreeMap;
use std::time::Duration;

use doubletap_primitives::len_chars;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::behavior::{Binding, FinishLine, InsertPair, JumpOut};
use crate::error::{ConfigError, Result};

/// Marker value that disables a finisher or jump key.
const DISABLED: &str = "disabled";

/// Vim has no booleans; `0`/`1` and `v:true`/`v:false` both show up.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
enum Flag {
	Bool(bool),
	Int(i64),
}

impl From<Flag> for bool {
	fn from(flag: Flag) -> Self {
		match flag {
			Flag::Bool(b) => b,
			Flag::Int(n) => n != 0,
		}
	}
}

#[derive(Debug, Default, Deserialize)]
struct InsertFields {
	insert: Option<String>,
	bs: Option<usize>,
	string: Option<Flag>,
	disabled: Option<Flag>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JumpEntry {
	Marker(String),
	Fields(JumpFields),
}

#[derive(Debug, Default, Deserialize)]
struct JumpFields {
	r: Option<String>,
	disabled: Option<Flag>,
}

fn parse<T: DeserializeOwned>(variable: &str, value: Value) -> Result<T> {
	serde_json::from_value(value).map_err(|source| ConfigError::Json {
		variable: variable.to_string(),
		source,
	})
}

fn single_char(s: &str) -> Option<char> {
	let mut chars = s.chars();
	let c = chars.next()?;
	chars.next().is_none().then_some(c)
}

/// Trigger keys are single printable characters.
fn parse_key(variable: &str, raw: &str) -> Result<char> {
	single_char(raw).filter(|c| !c.is_control()).ok_or_else(|| ConfigError::InvalidKey {
		variable: variable.to_string(),
		key: raw.to_string(),
	})
}

pub(crate) fn apply_inserts(map: &mut BTreeMap<char, Binding<InsertPair>>, variable: &str, value: Value) -> Result<()> {
	let entries: BTreeMap<String, InsertFields> = parse(variable, value)?;
	let mut next = map.clone();

	for (raw, fields) in entries {
		let key = parse_key(variable, &raw)?;
		let mut binding = match next.remove(&key) {
			Some(existing) => existing,
			None => {
				let text = fields
					.insert
					.as_deref()
					.ok_or_else(|| ConfigError::invalid(variable, format!("new key {key:?} needs an `insert` text")))?;
				Binding::new(InsertPair::new(text))
			}
		};

		if let Some(text) = fields.insert {
			binding.action.insert_text = text;
		}
		if let Some(bs) = fields.bs {
			binding.action.backspace_count = bs;
		}
		if let Some(string) = fields.string {
			binding.action.is_string_delimiter = string.into();
		}
		if let Some(disabled) = fields.disabled {
			binding.enabled = !bool::from(disabled);
		}

		let len = len_chars(&binding.action.insert_text);
		if len == 0 {
			return Err(ConfigError::invalid(variable, format!("empty insert text for {key:?}")));
		}
		if binding.action.backspace_count > len {
			return Err(ConfigError::invalid(
				variable,
				format!("bs {} exceeds insert text {:?}", binding.action.backspace_count, binding.action.insert_text),
			));
		}
		next.insert(key, binding);
	}

	*map = next;
	Ok(())
}

pub(crate) fn apply_finishers(map: &mut BTreeMap<char, Binding<FinishLine>>, variable: &str, value: Value) -> Result<()> {
	let entries: BTreeMap<String, String> = parse(variable, value)?;
	let mut next = map.clone();

	for (raw, terminator) in entries {
		let key = parse_key(variable, &raw)?;
		let binding = if terminator == DISABLED {
			let action = next.get(&key).map_or(FinishLine { terminator: key }, |b| b.action);
			Binding::disabled(action)
		} else {
			let terminator = single_char(&terminator).ok_or_else(|| {
				ConfigError::invalid(variable, format!("terminator for {key:?} must be one character, got {terminator:?}"))
			})?;
			Binding::new(FinishLine { terminator })
		};
		next.insert(key, binding);
	}

	*map = next;
	Ok(())
}

pub(crate) fn apply_jumps(map: &mut BTreeMap<char, Binding<JumpOut>>, variable: &str, value: Value) -> Result<()> {
	let entries: BTreeMap<String, JumpEntry> = parse(variable, value)?;
	let mut next = map.clone();

	for (raw, entry) in entries {
		let key = parse_key(variable, &raw)?;
		let mut binding = next
			.remove(&key)
			.unwrap_or_else(|| Binding::new(JumpOut { right_char: key }));

		let fields = match entry {
			JumpEntry::Marker(marker) if marker == DISABLED => JumpFields {
				disabled: Some(Flag::Bool(true)),
				..JumpFields::default()
			},
			JumpEntry::Marker(right) => JumpFields {
				r: Some(right),
				..JumpFields::default()
			},
			JumpEntry::Fields(fields) => fields,
		};

		if let Some(right) = fields.r {
			binding.action.right_char = single_char(&right).ok_or_else(|| {
				ConfigError::invalid(variable, format!("jump target for {key:?} must be one character, got {right:?}"))
			})?;
		}
		if let Some(disabled) = fields.disabled {
			binding.enabled = !bool::from(disabled);
		}
		next.insert(key, binding);
	}

	*map = next;
	Ok(())
}

/// Parses a timeout in milliseconds.
pub(crate) fn parse_timeout(variable: &str, value: Value) -> Result<Duration> {
	let millis = value.as_u64().or_else(|| {
		value
			.as_f64()
			.filter(|ms| ms.is_finite() && *ms >= 0.0)
			.map(|ms| ms.round() as u64)
	});
	millis
		.map(Duration::from_millis)
		.ok_or_else(|| ConfigError::invalid(variable, format!("expected milliseconds, got {value}")))
}

pub(crate) fn parse_flag(variable: &str, value: Value) -> Result<bool> {
	parse::<Flag>(variable, value).map(bool::from)
}

pub(crate) fn parse_syntax_types(variable: &str, value: Value) -> Result<Vec<String>> {
	let names: Vec<String> = parse(variable, value)?;
	Ok(names.into_iter().map(|name| name.to_lowercase()).collect())
}
