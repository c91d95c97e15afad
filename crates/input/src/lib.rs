//! Double-tap detection.
//!
//! * [`DoubleTapDetector`]: Idle/Armed state machine classifying each key
//! * [`Clock`]: monotonic time source, swappable for deterministic tests

pub mod clock;
pub mod detector;

#[cfg(any(test, feature = "test-support"))]
pub use clock::ManualClock;
pub use clock::{Clock, SystemClock};
pub use detector::{DetectorState, DoubleTapDetector, Tap};
