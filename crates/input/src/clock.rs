//! Monotonic time sources.

use std::time::Instant;

/// Source of monotonic timestamps for key events.
pub trait Clock {
	fn now(&self) -> Instant;
}

/// Reads [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
	fn now(&self) -> Instant {
		Instant::now()
	}
}

/// A clock that only moves when told to.
///
/// Clones share the same time, so a test can keep a handle while the
/// session owns another.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Clone)]
pub struct ManualClock {
	now: std::rc::Rc<std::cell::Cell<Instant>>,
}

#[cfg(any(test, feature = "test-support"))]
impl ManualClock {
	pub fn new() -> Self {
		Self {
			now: std::rc::Rc::new(std::cell::Cell::new(Instant::now())),
		}
	}

	pub fn advance(&self, by: std::time::Duration) {
		self.now.set(self.now.get() + by);
	}

	pub fn advance_ms(&self, millis: u64) {
		self.advance(std::time::Duration::from_millis(millis));
	}
}

#[cfg(any(test, feature = "test-support"))]
impl Default for ManualClock {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(any(test, feature = "test-support"))]
impl Clock for ManualClock {
	fn now(&self) -> Instant {
		self.now.get()
	}
}
