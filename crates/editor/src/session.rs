//! The per-keystroke double-tap pipeline.

use std::sync::Arc;

use doubletap_config::{Behavior, ConfigResolver, ResolvedConfig};
use doubletap_input::{Clock, DoubleTapDetector, SystemClock};
use tracing::{debug, warn};

use crate::context::BufferContext;
use crate::executor::{self, EditOutcome};
use crate::host::{Host, Result};
use crate::keymap::{self, EntryPoint};

/// One plugin session: detector state, cached configuration, and clock.
///
/// Entry points take the host by reference on every call and never keep
/// it, so each keystroke sees the buffer as it is now.
///
/// Each keystroke resolves the filetype's configuration, looks the key up in
/// the entry point's map, applies the string veto, classifies the tap, and
/// executes the behavior on a double tap.
/// Anything that is not a confirmed, executable double tap returns the key
/// unchanged for the host to insert.
#[derive(Debug)]
pub struct DoubleTap<C: Clock = SystemClock> {
	detector: DoubleTapDetector,
	resolver: ConfigResolver,
	clock: C,
}

impl Default for DoubleTap<SystemClock> {
	fn default() -> Self {
		Self::new()
	}
}

impl DoubleTap<SystemClock> {
	pub fn new() -> Self {
		Self::with_clock(SystemClock)
	}
}

impl<C: Clock> DoubleTap<C> {
	pub fn with_clock(clock: C) -> Self {
		Self {
			detector: DoubleTapDetector::new(),
			resolver: ConfigResolver::new(),
			clock,
		}
	}

	pub fn detector(&self) -> &DoubleTapDetector {
		&self.detector
	}

	/// Configuration cache, e.g. to invalidate after the host's variables change.
	pub fn resolver_mut(&mut self) -> &mut ConfigResolver {
		&mut self.resolver
	}

	/// Resolved configuration for the host's current filetype.
	pub fn config<H: Host + ?Sized>(&mut self, host: &H) -> Result<Arc<ResolvedConfig>> {
		let filetype = host.filetype()?;
		Ok(self.resolver.resolve(&filetype, host))
	}

	/// Resolves configuration for a newly entered buffer and maps its keys.
	///
	/// Returns how many mappings the host accepted. A rejected mapping is
	/// logged and skipped; that key then behaves as ordinary input.
	pub fn on_buffer_enter<H: Host + ?Sized>(&mut self, host: &mut H) -> Result<usize> {
		self.detector.reset();
		let config = self.config(host)?;
		let mut registered = 0;
		for mapping in keymap::mappings(&config) {
			match host.register_mapping(&mapping) {
				Ok(()) => registered += 1,
				Err(err) => warn!(mapping = %mapping, error = %err, "failed to register mapping"),
			}
		}
		debug!(filetype = %config.filetype(), registered, "buffer mappings registered");
		Ok(registered)
	}

	/// Records an ordinary keystroke the host inserted without calling an
	/// entry point, so an unrelated key between two taps breaks the pair.
	pub fn observe_key(&mut self, key: char) {
		let now = self.clock.now();
		self.detector.observe(key, now);
	}

	pub fn handle_insert<H: Host + ?Sized>(&mut self, host: &mut H, key: &str) -> String {
		self.handle(host, EntryPoint::Insert, key)
	}

	pub fn handle_finish_line<H: Host + ?Sized>(&mut self, host: &mut H, key: &str) -> String {
		self.handle(host, EntryPoint::FinishLine, key)
	}

	pub fn handle_jump_out<H: Host + ?Sized>(&mut self, host: &mut H, key: &str) -> String {
		self.handle(host, EntryPoint::JumpOut, key)
	}

	/// Runs `entry` for `key` and returns the text the host should insert.
	///
	/// A missing key yields `""`. Host failures are logged and yield the key
	/// itself, so a keystroke is never lost.
	pub fn handle<H: Host + ?Sized>(&mut self, host: &mut H, entry: EntryPoint, key: &str) -> String {
		let mut chars = key.chars();
		let Some(ch) = chars.next() else {
			return String::new();
		};
		if chars.next().is_some() {
			debug!(key, %entry, "multi-character key passed through");
			return key.to_string();
		}

		match self.process(host, entry, ch) {
			Ok(Some(outcome)) => outcome.into_replacement(),
			Ok(None) => key.to_string(),
			Err(err) => {
				warn!(key, %entry, error = %err, "host call failed; inserting key literally");
				key.to_string()
			}
		}
	}

	fn process<H: Host + ?Sized>(&mut self, host: &mut H, entry: EntryPoint, key: char) -> Result<Option<EditOutcome>> {
		let config = self.config(host)?;
		let Some(behavior) = entry.behavior(&config, key) else {
			return Ok(None);
		};

		if let Behavior::InsertPair(pair) = &behavior
			&& pair.is_string_delimiter
			&& !config.insert_in_string()
		{
			let syntax = host.syntax_name_at_cursor()?;
			if config.is_string_syntax(&syntax) {
				debug!(key = %key, syntax = %syntax, "inside string; double tap vetoed");
				return Ok(None);
			}
		}

		let now = self.clock.now();
		if !self.detector.classify(key, now, config.timeout()).is_double() {
			return Ok(None);
		}

		let ctx = BufferContext::fetch(host)?;
		if ctx.mode.is_insert() && ctx.char_before_cursor() != Some(key) {
			debug!(key = %key, cursor = %ctx.cursor, "first tap not left of cursor; passing through");
			return Ok(None);
		}

		debug!(key = %key, %entry, map = behavior.map_name(), "double tap");
		executor::execute(host, &ctx, key, &behavior).map(Some)
	}
}
