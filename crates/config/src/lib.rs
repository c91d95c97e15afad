//! Configuration for double-tap editing.
//!
//! Each trigger key maps to one [`Behavior`]: splice in a pair, finish the
//! line with a terminator, or jump past a closing character. Settings come
//! from three layers, highest precedence first:
//!
//! 1. Filetype-scoped host variables (`g:doubletap_<filetype>_<setting>`)
//! 2. Global host variables (`g:doubletap_<setting>`)
//! 3. Built-in defaults (see [`defaults`])
//!
//! Map-valued settings merge entry by entry and field by field, so a
//! filetype can change the cursor offset of `(` without restating its
//! insert text or touching any other key:
//!
//! ```json
//! { "(": { "bs": 0 }, "|": { "insert": "||" } }
//! ```
//!
//! [`ConfigResolver`] computes a [`ResolvedConfig`] once per filetype and
//! caches it for the session. Malformed variables are logged and skipped;
//! resolution itself never fails.

pub mod behavior;
pub mod defaults;
pub mod error;
mod overrides;
pub mod resolver;

pub use behavior::{Behavior, Binding, FinishLine, InsertPair, JumpOut};
pub use error::{ConfigError, Result};
pub use resolver::{ConfigResolver, ResolvedConfig, Setting, VariableSource};
