use super::{OutputDeclaration, extract_field_name};
use crate::dissect::{Casts, DissectError};

#[test]
fn parse_splits_on_first_colon() {
	let decl = OutputDeclaration::parse("TIME.EPOCH:expires", Casts::STRING_OR_LONG).expect("qualified name parses");
	assert_eq!(decl.type_tag.as_ref(), "TIME.EPOCH");
	assert_eq!(decl.name.as_ref(), "expires");
	assert_eq!(decl.qualified(), "TIME.EPOCH:expires");
	assert_eq!(decl.to_string(), decl.qualified());
}

#[test]
fn parse_rejects_missing_parts() {
	for bad in ["value", ":value", "STRING:", ""] {
		let err = OutputDeclaration::parse(bad, Casts::STRING_ONLY).expect_err("malformed name should fail");
		assert!(matches!(err, DissectError::InvalidOutputName { .. }), "{bad:?}: {err}");
	}
}

#[test]
fn field_name_prefix_is_optional() {
	assert_eq!(extract_field_name("response.cookies", "response.cookies.value"), "value");
	assert_eq!(extract_field_name("response.cookies", "value"), "value");
	assert_eq!(extract_field_name("response.cookies", "response.cookiesvalue"), "response.cookiesvalue");
	assert_eq!(extract_field_name("", "value"), "value");
}
