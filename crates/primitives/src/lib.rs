//! Core types shared by the double-tap crates: cursor positions, editor
//! modes, and char-indexed line editing helpers.

/// Char-indexed helpers for reading and splicing a single line of text.
pub mod line;
/// Editor mode reported by the host.
pub mod mode;
/// Cursor positions in (line, column) form.
pub mod position;

pub use line::{CharIdx, char_at, char_before, clamp_col, len_chars, remove_char_before, splice};
pub use mode::Mode;
pub use position::Position;
