//! Layered, per-filetype configuration resolution.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::behavior::{Behavior, Binding, FinishLine, InsertPair, JumpOut};
use crate::error::Result;
use crate::{defaults, overrides};

/// Prefix shared by every configuration variable.
const VAR_PREFIX: &str = "g:doubletap_";

/// Read access to the host's named variables.
///
/// Values arrive as JSON so adapters can forward whatever their RPC layer
/// decodes without knowing the configuration schema.
pub trait VariableSource {
	/// Returns the value of `name`, or `None` when it is not defined.
	fn variable(&self, name: &str) -> Option<Value>;
}

impl VariableSource for HashMap<String, Value> {
	fn variable(&self, name: &str) -> Option<Value> {
		self.get(name).cloned()
	}
}

impl VariableSource for BTreeMap<String, Value> {
	fn variable(&self, name: &str) -> Option<Value> {
		self.get(name).cloned()
	}
}

/// A source with no variables defined; resolves to the built-in defaults.
impl VariableSource for () {
	fn variable(&self, _name: &str) -> Option<Value> {
		None
	}
}

/// One overridable setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Setting {
	Insert,
	Finishers,
	Jump,
	Timeout,
	InsertInString,
	SyntaxTypes,
}

impl Setting {
	pub const ALL: [Setting; 6] = [
		Setting::Insert,
		Setting::Finishers,
		Setting::Jump,
		Setting::Timeout,
		Setting::InsertInString,
		Setting::SyntaxTypes,
	];

	pub fn name(self) -> &'static str {
		match self {
			Setting::Insert => "insert",
			Setting::Finishers => "finishers",
			Setting::Jump => "jump",
			Setting::Timeout => "timeout",
			Setting::InsertInString => "insert_in_string",
			Setting::SyntaxTypes => "syntax_types",
		}
	}

	/// Host variable holding this setting, optionally scoped to a filetype.
	pub fn variable_name(self, filetype: Option<&str>) -> String {
		match filetype {
			Some(ft) => format!("{VAR_PREFIX}{ft}_{}", self.name()),
			None => format!("{VAR_PREFIX}{}", self.name()),
		}
	}
}

/// Fully merged configuration for one filetype.
///
/// Immutable once built; shared between the detector and the executor
/// through an [`Arc`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
	filetype: String,
	inserts: BTreeMap<char, Binding<InsertPair>>,
	finishers: BTreeMap<char, Binding<FinishLine>>,
	jumps: BTreeMap<char, Binding<JumpOut>>,
	timeout: Duration,
	insert_in_string: bool,
	syntax_types: Vec<String>,
}

impl Default for ResolvedConfig {
	fn default() -> Self {
		Self::defaults("")
	}
}

impl ResolvedConfig {
	/// Built-in defaults with no host variables applied.
	pub fn defaults(filetype: &str) -> Self {
		Self {
			filetype: filetype.to_string(),
			inserts: defaults::inserts(),
			finishers: defaults::finishers(),
			jumps: defaults::jumps(),
			timeout: defaults::DEFAULT_TIMEOUT,
			insert_in_string: defaults::INSERT_IN_STRING,
			syntax_types: defaults::syntax_types(),
		}
	}

	/// Builds the configuration for `filetype` from `vars`, uncached.
	///
	/// An empty filetype only sees the global layer.
	pub fn build(filetype: &str, vars: &(impl VariableSource + ?Sized)) -> Self {
		let mut config = Self::defaults(filetype);
		config.apply_layer(vars, None);
		if !filetype.is_empty() {
			config.apply_layer(vars, Some(filetype));
		}
		config.report_conflicts();
		config
	}

	fn apply_layer(&mut self, vars: &(impl VariableSource + ?Sized), filetype: Option<&str>) {
		for setting in Setting::ALL {
			let name = setting.variable_name(filetype);
			let Some(value) = vars.variable(&name) else {
				continue;
			};
			match self.apply(setting, &name, value) {
				Ok(()) => debug!(variable = %name, "applied doubletap setting"),
				Err(err) => warn!(variable = %name, error = %err, "ignoring malformed doubletap setting"),
			}
		}
	}

	fn apply(&mut self, setting: Setting, variable: &str, value: Value) -> Result<()> {
		match setting {
			Setting::Insert => overrides::apply_inserts(&mut self.inserts, variable, value)?,
			Setting::Finishers => overrides::apply_finishers(&mut self.finishers, variable, value)?,
			Setting::Jump => overrides::apply_jumps(&mut self.jumps, variable, value)?,
			Setting::Timeout => self.timeout = overrides::parse_timeout(variable, value)?,
			Setting::InsertInString => self.insert_in_string = overrides::parse_flag(variable, value)?,
			Setting::SyntaxTypes => self.syntax_types = overrides::parse_syntax_types(variable, value)?,
		}
		Ok(())
	}

	fn report_conflicts(&self) {
		let mut seen = BTreeSet::new();
		let keys = self.inserts.keys().chain(self.finishers.keys()).chain(self.jumps.keys());
		for key in keys {
			if !seen.insert(*key) {
				warn!(key = %key, filetype = %self.filetype, "trigger key configured in more than one map");
			}
		}
	}

	pub fn filetype(&self) -> &str {
		&self.filetype
	}

	pub fn inserts(&self) -> &BTreeMap<char, Binding<InsertPair>> {
		&self.inserts
	}

	pub fn finishers(&self) -> &BTreeMap<char, Binding<FinishLine>> {
		&self.finishers
	}

	pub fn jumps(&self) -> &BTreeMap<char, Binding<JumpOut>> {
		&self.jumps
	}

	/// Returns the enabled insert pair for `key`.
	pub fn insert(&self, key: char) -> Option<&InsertPair> {
		self.inserts.get(&key).and_then(Binding::active)
	}

	/// Returns the enabled finisher for `key`.
	pub fn finisher(&self, key: char) -> Option<FinishLine> {
		self.finishers.get(&key).and_then(Binding::active).copied()
	}

	/// Returns the enabled jump target for `key`.
	pub fn jump(&self, key: char) -> Option<JumpOut> {
		self.jumps.get(&key).and_then(Binding::active).copied()
	}

	/// Returns the single behavior `key` triggers in this scope.
	///
	/// A key configured in several maps resolves insert, then finisher,
	/// then jump.
	pub fn behavior(&self, key: char) -> Option<Behavior> {
		if let Some(pair) = self.insert(key) {
			return Some(Behavior::InsertPair(pair.clone()));
		}
		if let Some(finish) = self.finisher(key) {
			return Some(Behavior::FinishLine(finish));
		}
		self.jump(key).map(Behavior::JumpOut)
	}

	pub fn timeout(&self) -> Duration {
		self.timeout
	}

	pub fn insert_in_string(&self) -> bool {
		self.insert_in_string
	}

	/// Whether a host syntax group name denotes a string-like region.
	pub fn is_string_syntax(&self, syntax_name: &str) -> bool {
		if syntax_name.is_empty() {
			return false;
		}
		let name = syntax_name.to_lowercase();
		self.syntax_types.iter().any(|ty| name.contains(ty.as_str()))
	}
}

/// Compute-once cache of [`ResolvedConfig`] keyed by filetype.
#[derive(Debug, Default)]
pub struct ConfigResolver {
	cache: HashMap<String, Arc<ResolvedConfig>>,
}

impl ConfigResolver {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the configuration for `filetype`, building it on first use.
	///
	/// Later calls return the cached value without consulting `vars`.
	pub fn resolve(&mut self, filetype: &str, vars: &(impl VariableSource + ?Sized)) -> Arc<ResolvedConfig> {
		if let Some(config) = self.cache.get(filetype) {
			return Arc::clone(config);
		}

		debug!(filetype = %filetype, "building doubletap config");
		let config = Arc::new(ResolvedConfig::build(filetype, vars));
		self.cache.insert(filetype.to_string(), Arc::clone(&config));
		config
	}

	/// Drops the cached configuration for one filetype.
	pub fn invalidate(&mut self, filetype: &str) -> bool {
		self.cache.remove(filetype).is_some()
	}

	/// Drops every cached configuration.
	pub fn clear(&mut self) {
		self.cache.clear();
	}

	pub fn len(&self) -> usize {
		self.cache.len()
	}

	pub fn is_empty(&self) -> bool {
		self.cache.is_empty()
	}
}
