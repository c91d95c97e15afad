//! Every function here takes character columns and clamps them into
//! `[0, len_chars(line)]`, so out-of-range input from a host never panics.

/// A column measured in characters (not bytes).
pub type CharIdx = usize;

/// Returns the number of characters in `line`.
#[inline]
pub fn len_chars(line: &str) -> usize {
	line.chars().count()
}

/// Clamps `col` to the valid cursor range of `line`.
///
/// The end-of-line position (`len_chars(line)`) is valid, matching an
/// insert-mode cursor placed after the last character.
#[inline]
pub fn clamp_col(line: &str, col: CharIdx) -> CharIdx {
	col.min(len_chars(line))
}

/// Converts a clamped character column to a byte offset.
fn byte_idx(line: &str, col: CharIdx) -> usize {
	line.char_indices().nth(col).map_or(line.len(), |(idx, _)| idx)
}

/// Returns the character under the cursor, if any.
pub fn char_at(line: &str, col: CharIdx) -> Option<char> {
	line.chars().nth(col)
}

/// Returns the character immediately left of the cursor, if any.
pub fn char_before(line: &str, col: CharIdx) -> Option<char> {
	clamp_col(line, col).checked_sub(1).and_then(|idx| char_at(line, idx))
}

/// Replaces the characters in `start..end` with `insert`.
///
/// Both bounds are clamped and reordered if reversed.
pub fn splice(line: &str, start: CharIdx, end: CharIdx, insert: &str) -> String {
	let start = clamp_col(line, start);
	let end = clamp_col(line, end);
	let (start, end) = if start <= end { (start, end) } else { (end, start) };

	let (head, tail) = (byte_idx(line, start), byte_idx(line, end));
	let mut out = String::with_capacity(line.len() - (tail - head) + insert.len());
	out.push_str(&line[..head]);
	out.push_str(insert);
	out.push_str(&line[tail..]);
	out
}

/// Removes the character left of `col` when it equals `expected`.
///
/// Returns the edited line, or `None` when there is nothing to remove.
pub fn remove_char_before(line: &str, col: CharIdx, expected: char) -> Option<String> {
	let col = clamp_col(line, col);
	if char_before(line, col) != Some(expected) {
		return None;
	}
	Some(splice(line, col - 1, col, ""))
}
