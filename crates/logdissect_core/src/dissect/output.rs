use std::fmt;

use crate::dissect::{Casts, DissectError, Result};

/// One advertised output: `<TYPE>:<name>` plus the casts it supports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDeclaration {
	/// Type tag, the part before `:`.
	pub type_tag: Box<str>,
	/// Output name, the part after `:`.
	pub name: Box<str>,
	/// Representations the output may be consumed as.
	pub casts: Casts,
}

impl OutputDeclaration {
	/// Build a declaration from its parts.
	pub fn new(type_tag: &str, name: &str, casts: Casts) -> Self {
		Self {
			type_tag: type_tag.into(),
			name: name.into(),
			casts,
		}
	}

	/// Parse a qualified `<TYPE>:<name>` string.
	pub fn parse(qualified: &str, casts: Casts) -> Result<Self> {
		let Some((type_tag, name)) = qualified.split_once(':') else {
			return Err(DissectError::InvalidOutputName { name: qualified.to_owned() });
		};
		let (type_tag, name) = (type_tag.trim(), name.trim());
		if type_tag.is_empty() || name.is_empty() {
			return Err(DissectError::InvalidOutputName { name: qualified.to_owned() });
		}
		Ok(Self::new(type_tag, name, casts))
	}

	/// Render as `<TYPE>:<name>`.
	pub fn qualified(&self) -> String {
		format!("{}:{}", self.type_tag, self.name)
	}
}

impl fmt::Display for OutputDeclaration {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.type_tag, self.name)
	}
}

/// Strip an optional `<input_name>.` prefix from `output_name`.
///
/// Engines address outputs either by bare name (`value`) or by their full
/// path below the input (`response.cookies.value`); both resolve to `value`.
pub fn extract_field_name<'a>(input_name: &str, output_name: &'a str) -> &'a str {
	if !input_name.is_empty()
		&& let Some(rest) = output_name.strip_prefix(input_name)
		&& let Some(name) = rest.strip_prefix('.')
	{
		return name;
	}
	output_name
}

#[cfg(test)]
mod tests;
