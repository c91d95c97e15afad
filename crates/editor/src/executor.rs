//! Buffer edits performed on a confirmed double tap.
//!
//! Each behavior is one splice of the cursor line plus a cursor move. In
//! insert mode the host has already inserted the first tap, so every edit
//! first removes that literal when it sits immediately left of the cursor.

use doubletap_config::{Behavior, FinishLine, InsertPair, JumpOut};
use doubletap_primitives::{Position, clamp_col, len_chars, remove_char_before, splice};
use tracing::{debug, warn};

use crate::context::BufferContext;
use crate::host::{BufferAccess, Result};

/// What the host should insert after an edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
	/// The edit was applied; the pending keystroke is swallowed.
	Applied,
	/// Nothing was edited in place; the host inserts this text.
	Literal(String),
}

impl EditOutcome {
	/// The replacement string returned to the host.
	pub fn into_replacement(self) -> String {
		match self {
			EditOutcome::Applied => String::new(),
			EditOutcome::Literal(text) => text,
		}
	}
}

/// Performs `behavior` for a confirmed double tap of `key`.
pub fn execute<H: BufferAccess + ?Sized>(
	host: &mut H,
	ctx: &BufferContext,
	key: char,
	behavior: &Behavior,
) -> Result<EditOutcome> {
	match behavior {
		Behavior::InsertPair(pair) => insert_pair(host, ctx, key, pair),
		Behavior::FinishLine(finish) => finish_line(host, ctx, key, *finish),
		Behavior::JumpOut(jump) => jump_out(host, ctx, key, *jump),
	}
}

/// Splits out the host-inserted literal left of the cursor, if present.
///
/// Returns the line without it and the column the literal occupied (or the
/// cursor column when there was nothing to remove).
fn without_literal(ctx: &BufferContext, key: char) -> (String, usize, bool) {
	match remove_char_before(&ctx.line, ctx.cursor.col, key) {
		Some(line) => (line, ctx.cursor.col - 1, true),
		None => (ctx.line.clone(), ctx.cursor.col, false),
	}
}

/// Writes `new_line` over the cursor line, then moves the cursor.
///
/// When the move fails the original line is written back, so a failed edit
/// leaves the buffer as the user typed it.
fn commit<H: BufferAccess + ?Sized>(
	host: &mut H,
	ctx: &BufferContext,
	new_line: &str,
	cursor: Option<Position>,
) -> Result<()> {
	host.set_line(ctx.cursor.line, new_line)?;
	let Some(cursor) = cursor else {
		return Ok(());
	};
	if let Err(err) = host.set_cursor(cursor) {
		if let Err(restore) = host.set_line(ctx.cursor.line, &ctx.line) {
			warn!(line = ctx.cursor.line, error = %restore, "failed to restore line after cursor move");
		}
		return Err(err);
	}
	Ok(())
}

/// Replaces the doubled key with `pair.insert_text`.
///
/// The cursor lands `backspace_count` characters before the end of the
/// inserted text.
pub fn insert_pair<H: BufferAccess + ?Sized>(
	host: &mut H,
	ctx: &BufferContext,
	key: char,
	pair: &InsertPair,
) -> Result<EditOutcome> {
	let (line, at, _) = without_literal(ctx, key);
	let new_line = splice(&line, at, at, &pair.insert_text);
	let col = clamp_col(&new_line, at + pair.cursor_offset());

	debug!(key = %key, pair = %pair.insert_text, col, "insert pair");
	commit(host, ctx, &new_line, Some(ctx.cursor.with_col(col)))?;
	Ok(EditOutcome::Applied)
}

/// Right-trims the line and appends the terminator unless already present.
///
/// Empty lines are only trimmed. In insert mode a cursor at the end of the
/// content follows the appended terminator; elsewhere it keeps its column.
pub fn finish_line<H: BufferAccess + ?Sized>(
	host: &mut H,
	ctx: &BufferContext,
	key: char,
	finish: FinishLine,
) -> Result<EditOutcome> {
	let (line, col) = if ctx.mode.is_insert() {
		let (line, col, _) = without_literal(ctx, key);
		(line, col)
	} else {
		(ctx.line.clone(), ctx.cursor.col)
	};

	let mut new_line = line.trim_end().to_string();
	let at_end = col >= len_chars(&new_line);
	if let Some(last) = new_line.chars().last()
		&& last != finish.terminator
	{
		new_line.push(finish.terminator);
	}

	debug!(key = %key, terminator = %finish.terminator, "finish line");
	let cursor = ctx.mode.is_insert().then(|| {
		let col = if at_end { len_chars(&new_line) } else { clamp_col(&new_line, col) };
		ctx.cursor.with_col(col)
	});
	commit(host, ctx, &new_line, cursor)?;
	Ok(EditOutcome::Applied)
}

/// Moves the cursor past the next `jump.right_char` at or after the cursor.
///
/// The search runs before the literal is removed, so its hit is shifted
/// left when it lies on the cursor line. On a miss the key comes back
/// doubled: the removed first tap plus the current one.
pub fn jump_out<H: BufferAccess + ?Sized>(
	host: &mut H,
	ctx: &BufferContext,
	key: char,
	jump: JumpOut,
) -> Result<EditOutcome> {
	let hit = host.search_forward(jump.right_char, ctx.cursor)?;
	let (line, col, removed) = without_literal(ctx, key);

	let Some(hit) = hit else {
		debug!(key = %key, right = %jump.right_char, "jump target not found");
		if removed {
			commit(host, ctx, &line, Some(ctx.cursor.with_col(col)))?;
		}
		return Ok(EditOutcome::Literal(key.to_string().repeat(2)));
	};

	let hit = if removed && hit.line == ctx.cursor.line {
		hit.with_col(hit.col.saturating_sub(1))
	} else {
		hit
	};
	let target = Position::new(hit.line, hit.col + 1);
	debug!(key = %key, right = %jump.right_char, %target, "jump out");
	if removed {
		commit(host, ctx, &line, Some(target))?;
	} else {
		host.set_cursor(target)?;
	}
	Ok(EditOutcome::Applied)
}
