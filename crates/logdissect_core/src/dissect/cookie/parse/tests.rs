use super::{SetCookie, parse_set_cookie, quote_cookie_value};
use crate::dissect::CookieError;

fn names_and_values(cookies: &[SetCookie]) -> Vec<(&str, &str)> {
	cookies.iter().map(|item| (item.name.as_str(), item.value.as_str())).collect()
}

#[test]
fn commas_separate_cookies() {
	let cookies = parse_set_cookie("a=1; Max-Age=60, b=2; Path=/x; Domain=Example.COM").expect("header parses");

	assert_eq!(names_and_values(&cookies), [("a", "1"), ("b", "2")]);
	assert_eq!(cookies[0].max_age, Some(60));
	assert_eq!(cookies[0].path, None);
	assert_eq!(cookies[1].max_age, None);
	assert_eq!(cookies[1].path.as_deref(), Some("/x"));
	assert_eq!(cookies[1].domain.as_deref(), Some("example.com"));
}

#[test]
fn expires_attribute_keeps_header_as_one_cookie() {
	let cookies = parse_set_cookie("id=a3fWa; Expires=Wed, 21 Oct 2015 07:28:00 GMT; Secure; HttpOnly").expect("legacy header parses");

	assert_eq!(cookies.len(), 1);
	let cookie = &cookies[0];
	assert_eq!(cookie.expires, Some(1_445_412_480));
	assert!(cookie.secure);
	assert!(cookie.http_only);
	assert_eq!(cookie.expires_at(0), Some(1_445_412_480));
}

#[test]
fn max_age_wins_over_expires_in_any_order() {
	let cookies = parse_set_cookie("id=1; Max-Age=10; Expires=Wed, 21 Oct 2015 07:28:00 GMT").expect("header parses");
	assert_eq!(cookies[0].expires_at(100), Some(110));

	let cookies = parse_set_cookie("id=1; Expires=Wed, 21 Oct 2015 07:28:00 GMT; max-age=10").expect("header parses");
	assert_eq!(cookies[0].expires_at(100), Some(110));
}

#[test]
fn quoted_values_keep_separators_and_lose_quotes() {
	let cookies = parse_set_cookie("a=\"x; y, z\"; Comment=\"hello, world\", b=2").expect("quoted header parses");

	assert_eq!(names_and_values(&cookies), [("a", "x; y, z"), ("b", "2")]);
	assert_eq!(cookies[0].comment.as_deref(), Some("hello, world"));
}

#[test]
fn attribute_names_are_case_insensitive_and_last_wins() {
	let cookies = parse_set_cookie("a=1; PATH=/one; path=/two; DoMaIn=.Example.org; unknown=x").expect("header parses");

	assert_eq!(cookies[0].path.as_deref(), Some("/two"));
	assert_eq!(cookies[0].domain.as_deref(), Some(".example.org"));
}

#[test]
fn header_name_prefix_is_stripped() {
	let cookies = parse_set_cookie("Set-Cookie: sid=42; Path=/").expect("prefixed header parses");
	assert_eq!(names_and_values(&cookies), [("sid", "42")]);

	let cookies = parse_set_cookie("set-cookie2: sid=43").expect("prefixed header parses");
	assert_eq!(names_and_values(&cookies), [("sid", "43")]);
}

#[test]
fn values_may_contain_equals_signs() {
	let cookies = parse_set_cookie("token=YWJj==; Path=/").expect("header parses");
	assert_eq!(cookies[0].value, "YWJj==");
}

#[test]
fn blank_segments_are_skipped() {
	let cookies = parse_set_cookie("a=1,, b=2,").expect("header parses");
	assert_eq!(names_and_values(&cookies), [("a", "1"), ("b", "2")]);
}

#[test]
fn unparseable_expires_is_ignored() {
	let cookies = parse_set_cookie("a=1; Expires=someday").expect("header parses");
	assert_eq!(cookies[0].expires, None);
	assert_eq!(cookies[0].expires_at(500), None);
}

#[test]
fn unterminated_quote_fails() {
	let err = parse_set_cookie("a=1, b=\"open; Path=/").expect_err("unterminated quote should fail");
	assert_eq!(err, CookieError::UnterminatedQuote { at: 7 });
}

#[test]
fn missing_equals_fails() {
	let err = parse_set_cookie("a=1, flag; Path=/").expect_err("missing pair should fail");
	assert_eq!(err, CookieError::MissingNameValue { at: 4 });

	let err = parse_set_cookie("; Path=/").expect_err("attributes without cookie should fail");
	assert_eq!(err, CookieError::MissingNameValue { at: 0 });
}

#[test]
fn illegal_names_fail() {
	for header in ["=1", "$Version=1", "Path=/", "a b=1", "Max-Age=3"] {
		let err = parse_set_cookie(header).expect_err("illegal name should fail");
		assert!(matches!(err, CookieError::InvalidName { .. }), "{header:?}: {err}");
	}
}

#[test]
fn non_numeric_max_age_fails() {
	let err = parse_set_cookie("a=1; Max-Age=soon").expect_err("bad max-age should fail");
	assert_eq!(err, CookieError::InvalidMaxAge { value: "soon".to_owned() });
}

#[test]
fn quote_inside_a_value_is_literal() {
	let cookies = parse_set_cookie("a=5\"; Path=/").expect("embedded quote parses");
	assert_eq!(names_and_values(&cookies), [("a", "5\"")]);
	assert_eq!(cookies[0].path.as_deref(), Some("/"));

	let cookies = parse_set_cookie("a=x\"y, b=2").expect("embedded quote parses");
	assert_eq!(names_and_values(&cookies), [("a", "x\"y"), ("b", "2")]);

	let err = parse_set_cookie("a=\"open").expect_err("leading quote still opens a section");
	assert_eq!(err, CookieError::UnterminatedQuote { at: 2 });
}

#[test]
fn expires_anywhere_in_the_header_disables_comma_splitting() {
	let cookies = parse_set_cookie("a=\"expires=x\", b=2").expect("header parses");
	assert_eq!(cookies.len(), 1);
	assert_eq!(cookies[0].name, "a");
	assert_eq!(cookies[0].value, "\"expires=x\", b=2");
}

#[test]
fn quoted_rendering_parses_back() {
	assert_eq!(quote_cookie_value("abc=="), "abc==");
	assert_eq!(quote_cookie_value("lang=en, tz=UTC"), "\"lang=en, tz=UTC\"");

	for value in ["lang=en, tz=UTC", " padded ", "a;b", "\"lead", "tail\"", "", "x\" y"] {
		let header = format!("x={}; Max-Age=1", quote_cookie_value(value));
		let cookies = parse_set_cookie(&header).expect("rendered header parses");
		assert_eq!(names_and_values(&cookies), [("x", value)], "{header:?}");
	}
}
