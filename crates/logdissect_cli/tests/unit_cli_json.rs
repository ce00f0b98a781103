#![allow(missing_docs)]

use std::process::{Command, Output};

use logdissect_testkit::fixture_path;
use serde_json::Value;

#[test]
fn outputs_json_lists_set_cookie_fields() {
	let json = run_json(&["outputs", "set-cookie", "--json"]);

	assert_eq!(json["dissector"], "setcookie");
	assert_eq!(json["input_type"], "HTTP.SETCOOKIE");
	let names: Vec<_> = json["outputs"]
		.as_array()
		.expect("outputs array")
		.iter()
		.map(|item| item["name"].as_str().expect("output name").to_owned())
		.collect();
	assert_eq!(names, ["STRING:value", "STRING:expires", "STRING:path", "STRING:domain", "STRING:comment"]);
}

#[test]
fn outputs_json_uses_table_file_for_dummy() {
	let table = fixture_path("dummy_table.json");
	let json = run_json(&["outputs", "dummy", "--table", table.to_str().expect("utf-8 path"), "--settings", "HTTP.URI", "--json"]);

	assert_eq!(json["input_type"], "HTTP.URI");
	assert_eq!(json["outputs"][1]["name"], "TIME.EPOCH:epoch");
	assert_eq!(json["outputs"][1]["casts"], serde_json::json!(["STRING", "LONG"]));
}

#[test]
fn negotiate_json_reports_casts() {
	let json = run_json(&["negotiate", "dummy", "in.double", "--input-name", "in", "--json"]);

	assert_eq!(json["output"], "in.double");
	assert_eq!(json["casts"], serde_json::json!(["STRING", "DOUBLE"]));
}

#[test]
fn negotiate_unknown_output_fails() {
	let output = run(&["negotiate", "set-cookie", "secure"]);

	assert!(!output.status.success(), "unknown output should fail");
	assert!(String::from_utf8_lossy(&output.stderr).contains("does not produce output"));
}

#[test]
fn dissect_json_reports_each_record() {
	let json = run_json(&[
		"dissect",
		"set-cookie",
		"--now",
		"1000",
		"--input-name",
		"resp",
		"--json",
		"a=1; Max-Age=60, b=2; Path=/x; Domain=example.com",
		"broken=\"quote",
		"",
	]);

	let records = json["records"].as_array().expect("records array");
	assert_eq!(records.len(), 3);

	let first = records[0]["dissections"].as_array().expect("dissections array");
	assert_eq!(first.len(), 10);
	assert_eq!(first[0]["name"], "resp.value");
	assert_eq!(first[1]["value"], "1060");
	assert_eq!(first[8]["value"], "example.com");
	assert!(records[0]["error"].is_null());

	assert!(records[1]["error"].as_str().is_some_and(|item| item.contains("unterminated")));
	assert!(records[1]["dissections"].as_array().is_some_and(|items| items.is_empty()));

	assert!(records[2]["error"].is_null());
	assert!(records[2]["dissections"].as_array().is_some_and(|items| items.is_empty()));
}

fn run(args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_logdissect")).args(args).output().expect("command executes")
}

fn run_json(args: &[&str]) -> Value {
	let output = run(args);
	assert!(
		output.status.success(),
		"logdissect failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}
