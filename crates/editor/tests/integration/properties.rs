use doubletap_editor::ScratchHost;
use doubletap_primitives::len_chars;
use proptest::prelude::*;

use crate::common::{Harness, QUICK_MS};

proptest! {
	#[test]
	fn paired_insert_lands_between_the_pair(line in "[a-zé ]{0,24}", raw_col in 0usize..32) {
		let col = raw_col.min(len_chars(&line));
		let mut h = Harness::new(ScratchHost::new(&line).with_cursor(0, col));
		h.double('[', QUICK_MS);

		let (head, tail): (String, String) = (line.chars().take(col).collect(), line.chars().skip(col).collect());
		prop_assert_eq!(h.text(), format!("{head}[]{tail}"));
		prop_assert_eq!(h.col(), col + 1);
	}

	#[test]
	fn slow_taps_type_literally(line in "[a-z]{0,12}", gap in 751u64..5000) {
		let col = len_chars(&line);
		let mut h = Harness::new(ScratchHost::new(&line).with_cursor(0, col));
		h.double('(', gap);
		prop_assert_eq!(h.text(), format!("{line}(("));
	}
}
