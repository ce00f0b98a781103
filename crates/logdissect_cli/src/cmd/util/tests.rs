use logdissect::dissect::{Casts, Dissect, DissectError};
use logdissect_testkit::fixture_path;

use super::{DissectorArgs, DissectorKind, build_dissector, load_table, parse_table};

fn args(kind: DissectorKind) -> DissectorArgs {
	DissectorArgs {
		kind,
		settings: None,
		table: None,
		now: None,
	}
}

#[test]
fn table_keeps_file_order_and_accepts_both_cast_forms() {
	let table = parse_table(br#"{"Z:zeta": "STRING_OR_LONG", "A:alpha": ["string", "double"]}"#).expect("table parses");

	let entries: Vec<_> = table.entries().iter().map(|decl| (decl.qualified(), decl.casts)).collect();
	assert_eq!(entries, [("Z:zeta".to_owned(), Casts::STRING_OR_LONG), ("A:alpha".to_owned(), Casts::STRING_OR_DOUBLE)]);
}

#[test]
fn table_errors_name_the_problem() {
	let err = parse_table(br#"{"X:x": ["STRING", "BYTES"]}"#).expect_err("unknown cast should fail");
	assert!(err.to_string().contains("BYTES"), "unexpected error: {err}");

	let err = parse_table(br#"{"X:x": 3}"#).expect_err("non-list casts should fail");
	assert!(!err.to_string().is_empty());

	let err = parse_table(b"{}").expect_err("empty table should fail");
	assert!(err.downcast_ref::<DissectError>().is_some_and(|inner| matches!(inner, DissectError::EmptyOutputTable)));
}

#[test]
fn fixture_table_loads() {
	let table = load_table(&fixture_path("dummy_table.json")).expect("fixture table loads");
	assert_eq!(table.entries()[0].qualified(), "HTTP.URI:uri");
	assert_eq!(table.len(), 3);
}

#[test]
fn settings_are_applied_before_prepare() {
	let mut dummy = args(DissectorKind::Dummy);
	dummy.settings = Some("HTTP.QUERYSTRING".to_owned());
	let dissector = build_dissector(&dummy).expect("dummy builds");
	assert_eq!(dissector.input_type(), "HTTP.QUERYSTRING");

	let dissector = build_dissector(&args(DissectorKind::Dummy)).expect("dummy builds");
	assert_eq!(dissector.input_type(), "INPUT");

	let dissector = build_dissector(&args(DissectorKind::SetCookie)).expect("set-cookie builds");
	assert_eq!(dissector.input_type(), "HTTP.SETCOOKIE");
}
