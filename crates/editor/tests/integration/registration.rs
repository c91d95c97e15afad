//! Buffer-enter registration and configuration caching through a session.

use doubletap_editor::{DoubleTap, EntryPoint, MapCommand, MapMode, ScratchHost};
use doubletap_input::ManualClock;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{Harness, QUICK_MS};

#[test]
fn default_buffer_registers_every_key() {
	let h = Harness::line("", 0);
	let maps = h.host.mappings();
	assert_eq!(maps.len(), 15);
	assert!(maps.contains(&MapCommand::new(MapMode::Insert, '"', EntryPoint::Insert)));
	assert!(maps.contains(&MapCommand::new(MapMode::Normal, ';', EntryPoint::FinishLine)));
	assert!(!maps.contains(&MapCommand::new(MapMode::Normal, ')', EntryPoint::JumpOut)));

	let rendered: Vec<String> = maps.iter().map(MapCommand::to_command).collect();
	assert!(rendered.contains(&"imap <silent> ( <C-R>=DoubleTapInsert('(')<CR>".to_string()));
	assert!(rendered.contains(&"nmap <silent> , <ESC>:call DoubleTapFinishLine(',')<CR>".to_string()));
}

#[test]
fn reentering_buffer_does_not_duplicate_mappings() {
	let mut h = Harness::line("", 0);
	assert_eq!(h.session.on_buffer_enter(&mut h.host).expect("enter"), 15);
	assert_eq!(h.host.mappings().len(), 15);
}

#[test]
fn rejected_mappings_are_skipped() {
	let mut host = ScratchHost::new("").fail_on("register_mapping");
	let mut session = DoubleTap::with_clock(ManualClock::new());
	assert_eq!(session.on_buffer_enter(&mut host).expect("enter"), 0);
	assert!(host.mappings().is_empty());
}

#[test]
fn buffer_enter_fails_without_filetype() {
	let mut host = ScratchHost::new("").fail_on("filetype");
	let mut session = DoubleTap::with_clock(ManualClock::new());
	assert!(session.on_buffer_enter(&mut host).is_err());
}

#[test]
fn buffer_enter_forgets_pending_tap() {
	let mut h = Harness::line("", 0);
	h.tap('(');
	assert_eq!(h.session.detector().armed_key(), Some('('));
	h.session.on_buffer_enter(&mut h.host).expect("enter");
	assert_eq!(h.session.detector().armed_key(), None);
	h.clock.advance_ms(QUICK_MS);
	h.tap('(');
	assert_eq!(h.text(), "((");
}

#[test]
fn added_keys_are_registered() {
	let host = ScratchHost::new("")
		.with_variable("g:doubletap_finishers", json!({".": "."}))
		.with_variable("g:doubletap_jump", json!({"|": "|"}));
	let h = Harness::new(host);
	let maps = h.host.mappings();
	assert!(maps.contains(&MapCommand::new(MapMode::Normal, '.', EntryPoint::FinishLine)));
	assert!(maps.contains(&MapCommand::new(MapMode::Insert, '|', EntryPoint::JumpOut)));
	assert_eq!(maps.len(), 18);
}

#[test]
fn configuration_is_cached_until_invalidated() {
	let mut h = Harness::new(ScratchHost::new("").with_filetype("rust"));
	let first = h.session.config(&h.host).expect("config");

	h.host.set_variable("g:doubletap_rust_timeout", json!(100));
	let cached = h.session.config(&h.host).expect("config");
	assert!(std::sync::Arc::ptr_eq(&first, &cached));

	assert!(h.session.resolver_mut().invalidate("rust"));
	let fresh = h.session.config(&h.host).expect("config");
	assert_eq!(fresh.timeout(), std::time::Duration::from_millis(100));
}

#[test]
fn buffer_switch_uses_new_filetype() {
	let mut h = Harness::new(
		ScratchHost::new("")
			.with_filetype("rust")
			.with_variable("g:doubletap_python_insert", json!({"(": {"disabled": 1}})),
	);
	assert!(h.host.mappings().iter().any(|m| m.key == '('));

	let mut python = ScratchHost::new("").with_filetype("python");
	python.set_variable("g:doubletap_python_insert", json!({"(": {"disabled": 1}}));
	h.session.on_buffer_enter(&mut python).expect("enter");
	assert!(!python.mappings().iter().any(|m| m.key == '('));
	assert_eq!(h.session.resolver_mut().len(), 2);
}
