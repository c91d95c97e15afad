//! Double-tap timing state machine.

use std::time::{Duration, Instant};

use tracing::trace;

/// Classification of one keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tap {
	/// Not part of a double tap; the host inserts the key normally.
	Single,
	/// Second tap of the same key within the timeout.
	Double,
}

impl Tap {
	pub fn is_double(self) -> bool {
		matches!(self, Tap::Double)
	}
}

/// Detector state between keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetectorState {
	/// No pending key.
	#[default]
	Idle,
	/// `key` was seen at `since` and may still be repeated.
	Armed { key: char, since: Instant },
}

/// Decides whether a keystroke completes a double tap.
///
/// One detector serves every key in a session. A confirmed double tap
/// returns the detector to [`DetectorState::Idle`], so a third tap starts a
/// new pair instead of triggering again.
#[derive(Debug, Clone, Default)]
pub struct DoubleTapDetector {
	state: DetectorState,
}

impl DoubleTapDetector {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn state(&self) -> DetectorState {
		self.state
	}

	/// Returns the armed key, if any.
	pub fn armed_key(&self) -> Option<char> {
		match self.state {
			DetectorState::Idle => None,
			DetectorState::Armed { key, .. } => Some(key),
		}
	}

	/// Forgets any pending key.
	pub fn reset(&mut self) {
		self.state = DetectorState::Idle;
	}

	/// Records `key` as typed at `now` without classifying it.
	///
	/// Used for keys the host inserted on its own; a different key armed
	/// here breaks any pending pair.
	pub fn observe(&mut self, key: char, now: Instant) {
		self.state = DetectorState::Armed { key, since: now };
	}

	/// Classifies `key` pressed at `now`.
	///
	/// A gap exactly equal to `timeout` still counts as a double tap. A `now`
	/// earlier than the armed timestamp carries no timing evidence and is
	/// treated as a fresh first tap.
	pub fn classify(&mut self, key: char, now: Instant, timeout: Duration) -> Tap {
		if let DetectorState::Armed { key: armed, since } = self.state
			&& armed == key
			&& let Some(elapsed) = now.checked_duration_since(since)
			&& elapsed <= timeout
		{
			trace!(key = %key, elapsed_ms = elapsed.as_millis() as u64, "double tap");
			self.state = DetectorState::Idle;
			return Tap::Double;
		}

		self.state = DetectorState::Armed { key, since: now };
		Tap::Single
	}
}
