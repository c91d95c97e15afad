//! End-to-end keystroke sequences against an in-memory buffer.

use doubletap_editor::{BufferAccess, ScratchHost};
use doubletap_primitives::{Mode, Position};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

use crate::common::{Harness, QUICK_MS};

#[test]
fn double_paren_inserts_pair() {
	let mut h = Harness::line("foo", 3);
	assert_eq!(h.tap('('), "(");
	h.clock.advance_ms(QUICK_MS);
	assert_eq!(h.tap('('), "");
	assert_eq!(h.text(), "foo()");
	assert_eq!(h.host.position(), Position::new(0, 4));
}

#[test]
fn double_semicolon_finishes_line() {
	let mut h = Harness::line("x = 1", 5);
	h.double(';', QUICK_MS);
	assert_eq!(h.text(), "x = 1;");
	assert_eq!(h.col(), 6);
}

#[test]
fn double_semicolon_trims_trailing_space() {
	let mut h = Harness::line("let y = 2   ", 12);
	h.double(';', QUICK_MS);
	assert_eq!(h.text(), "let y = 2;");
	assert_eq!(h.col(), 10);
}

#[test]
fn double_close_paren_jumps_out() {
	let mut h = Harness::line("foo()", 4);
	h.double(')', QUICK_MS);
	assert_eq!(h.text(), "foo()");
	assert_eq!(h.col(), 5);
}

#[test]
fn jump_out_skips_to_next_line() {
	let mut h = Harness::new(ScratchHost::new("call(a,\n  b)").with_cursor(0, 7));
	h.double(')', QUICK_MS);
	assert_eq!(h.text(), "call(a,\n  b)");
	assert_eq!(h.host.position(), Position::new(1, 4));
}

#[test]
fn jump_out_without_target_types_both_keys() {
	let mut h = Harness::line("foo", 3);
	h.double(')', QUICK_MS);
	assert_eq!(h.text(), "foo))");
	assert_eq!(h.col(), 5);
}

#[rstest]
#[case(749, "foo()")]
#[case(750, "foo()")]
#[case(751, "foo((")]
#[case(2000, "foo((")]
fn timeout_boundary(#[case] gap_ms: u64, #[case] expected: &str) {
	let mut h = Harness::line("foo", 3);
	h.double('(', gap_ms);
	assert_eq!(h.text(), expected);
}

#[test]
fn triple_tap_starts_a_new_pair() {
	let mut h = Harness::line("foo", 3);
	h.double('(', QUICK_MS);
	h.clock.advance_ms(QUICK_MS);
	assert_eq!(h.tap('('), "(");
	assert_eq!(h.text(), "foo(()");

	h.clock.advance_ms(QUICK_MS);
	h.tap('(');
	assert_eq!(h.text(), "foo(())");
	assert_eq!(h.col(), 5);
}

#[test]
fn different_keys_do_not_pair() {
	let mut h = Harness::line("", 0);
	h.tap('(');
	h.clock.advance_ms(QUICK_MS);
	h.tap('[');
	assert_eq!(h.text(), "([");
}

#[test]
fn unmapped_key_between_taps_breaks_pair() {
	let mut h = Harness::line("", 0);
	h.tap('(');
	h.clock.advance_ms(10);
	h.tap('x');
	assert_eq!(h.session.detector().armed_key(), Some('x'));
	h.clock.advance_ms(10);
	h.tap('(');
	assert_eq!(h.text(), "(x(");
}

#[test]
fn cursor_moved_between_taps_passes_through() {
	let mut h = Harness::line("foo", 3);
	h.tap('(');
	h.host.set_cursor(Position::new(0, 0)).expect("move");
	h.clock.advance_ms(QUICK_MS);
	assert_eq!(h.tap('('), "(");
	assert_eq!(h.text(), "(foo(");
}

#[test]
fn quote_inside_string_is_not_paired() {
	let host = ScratchHost::new("s = ").with_cursor(0, 4).with_syntax(0, 0..20, "pythonString");
	let mut h = Harness::new(host);
	h.double('"', QUICK_MS);
	assert_eq!(h.text(), "s = \"\"");
	assert_eq!(h.col(), 6);
	assert_eq!(h.session.detector().armed_key(), None);
}

#[test]
fn quote_outside_string_is_paired() {
	let host = ScratchHost::new("s = ").with_cursor(0, 4).with_syntax(0, 0..3, "pythonString");
	let mut h = Harness::new(host);
	h.double('"', QUICK_MS);
	assert_eq!(h.text(), "s = \"\"");
	assert_eq!(h.col(), 5);
}

#[test]
fn insert_in_string_allows_pairing_in_strings() {
	let host = ScratchHost::new("s = ")
		.with_cursor(0, 4)
		.with_syntax(0, 0..20, "String")
		.with_variable("g:doubletap_insert_in_string", json!(1));
	let mut h = Harness::new(host);
	h.double('\'', QUICK_MS);
	assert_eq!(h.text(), "s = ''");
	assert_eq!(h.col(), 5);
}

#[test]
fn brackets_pair_inside_strings() {
	let host = ScratchHost::new("\"").with_cursor(0, 1).with_syntax(0, 0..20, "rustString");
	let mut h = Harness::new(host);
	h.double('[', QUICK_MS);
	assert_eq!(h.text(), "\"[]");
}

#[test]
fn normal_mode_finisher_keeps_cursor() {
	let mut h = Harness::new(ScratchHost::new("x = 1").with_cursor(0, 2).with_mode(Mode::Normal));
	h.double(';', QUICK_MS);
	assert_eq!(h.text(), "x = 1;");
	assert_eq!(h.col(), 2);
}

#[test]
fn host_failure_inserts_key_literally() {
	let mut h = Harness::new(ScratchHost::new("foo").with_cursor(0, 3).fail_on("set_line"));
	h.tap('(');
	h.clock.advance_ms(QUICK_MS);
	assert_eq!(h.tap('('), "(");
	assert_eq!(h.text(), "foo((");
}

#[rstest]
#[case("foo", 3, '(', "foo((")]
#[case("foo()", 4, ')', "foo()))")]
#[case("foo", 3, ')', "foo))")]
#[case("x = 1", 5, ';', "x = 1;;")]
fn failed_cursor_move_keeps_both_taps(
	#[case] line: &str,
	#[case] col: usize,
	#[case] key: char,
	#[case] expected: &str,
) {
	let mut h = Harness::new(ScratchHost::new(line).with_cursor(0, col).fail_on("set_cursor"));
	h.double(key, QUICK_MS);
	assert_eq!(h.text(), expected);
	assert_eq!(h.col(), col + 2);
}

#[test]
fn unreadable_filetype_inserts_key_literally() {
	let mut h = Harness::line("", 0);
	h.host = h.host.clone().fail_on("filetype");
	h.double('(', QUICK_MS);
	assert_eq!(h.text(), "((");
}

#[test]
fn custom_pair_with_backspace_count() {
	let host = ScratchHost::new("fn ")
		.with_cursor(0, 3)
		.with_variable("g:doubletap_insert", json!({"{": {"insert": "{  }", "bs": 2}}));
	let mut h = Harness::new(host);
	h.double('{', QUICK_MS);
	assert_eq!(h.text(), "fn {  }");
	assert_eq!(h.col(), 5);
}

#[test]
fn filetype_override_disables_key() {
	let host = ScratchHost::new("")
		.with_filetype("rust")
		.with_variable("g:doubletap_rust_insert", json!({"<": {"disabled": 1}}));
	let mut h = Harness::new(host);
	h.double('<', QUICK_MS);
	assert_eq!(h.text(), "<<");

	let mut other = Harness::new(ScratchHost::new("").with_filetype("html"));
	other.double('<', QUICK_MS);
	assert_eq!(other.text(), "<>");
}

#[test]
fn filetype_timeout_override() {
	let host = ScratchHost::new("")
		.with_filetype("python")
		.with_variable("g:doubletap_timeout", json!(1000))
		.with_variable("g:doubletap_python_timeout", json!(200));
	let mut h = Harness::new(host);
	h.double('(', 300);
	assert_eq!(h.text(), "((");
}

#[test]
fn multi_char_key_passes_through() {
	let mut h = Harness::line("", 0);
	let mut host = h.host.clone();
	assert_eq!(h.session.handle_insert(&mut host, "(("), "((");
	assert_eq!(h.session.handle_insert(&mut host, ""), "");
	assert_eq!(host.line(0).expect("line"), "");
}
