//! Double-tap editing for a host text editor.
//!
//! The host routes each configured key to one of the [`DoubleTap`] entry
//! points and inserts whatever string comes back. A first tap comes back
//! unchanged; a confirmed double tap edits the buffer through the [`Host`]
//! and comes back empty, swallowing the keystroke.
//!
//! * [`host`]: the interface a host adapter implements
//! * [`executor`]: the buffer edits for each [`Behavior`](doubletap_config::Behavior)
//! * [`keymap`]: key-mapping commands registered per buffer
//! * [`session`]: the per-keystroke pipeline
//! * [`scratch`]: an in-memory host for headless use and tests

pub mod context;
pub mod executor;
pub mod host;
pub mod keymap;
pub mod logging;
pub mod scratch;
pub mod session;

pub use context::BufferContext;
pub use executor::EditOutcome;
pub use host::{BufferAccess, Host, HostError, Result};
pub use keymap::{EntryPoint, MapCommand, MapMode};
pub use scratch::ScratchHost;
pub use session::DoubleTap;
