//! Shared fixtures: a scratch buffer wired to a session on a manual clock.

use doubletap_editor::{DoubleTap, ScratchHost};
use doubletap_input::ManualClock;

/// Gap between the two taps of a typical double tap.
pub const QUICK_MS: u64 = 100;

pub struct Harness {
	pub host: ScratchHost,
	pub session: DoubleTap<ManualClock>,
	pub clock: ManualClock,
}

impl Harness {
	/// Enters `host`'s buffer, registering its mappings.
	pub fn new(mut host: ScratchHost) -> Self {
		let clock = ManualClock::new();
		let mut session = DoubleTap::with_clock(clock.clone());
		session.on_buffer_enter(&mut host).expect("buffer enter");
		Self { host, session, clock }
	}

	/// Single-line buffer with the cursor at `col`.
	pub fn line(text: &str, col: usize) -> Self {
		Self::new(ScratchHost::new(text).with_cursor(0, col))
	}

	pub fn tap(&mut self, key: char) -> String {
		self.host.type_key(&mut self.session, key)
	}

	/// Types `key` twice, `gap_ms` apart.
	pub fn double(&mut self, key: char, gap_ms: u64) {
		self.tap(key);
		self.clock.advance_ms(gap_ms);
		self.tap(key);
	}

	pub fn text(&self) -> String {
		self.host.text()
	}

	pub fn col(&self) -> usize {
		self.host.position().col
	}
}
