mod date;
mod parse;

use std::fmt;

pub use parse::{SetCookie, parse_set_cookie, quote_cookie_value};

use crate::dissect::{Casts, Dissect, DissectError, FieldValue, OutputDeclaration, Record, ReferenceClock, Result, extract_field_name};

const NAME: &str = "setcookie";

/// Per-output type tag strategy for [`SetCookieDissector`].
///
/// The same tag is used when declaring an output and when emitting it.
#[derive(Clone, Copy)]
pub struct TypeNaming(fn(&str) -> &'static str);

impl TypeNaming {
	/// Every output is tagged `STRING`.
	pub const STRING: Self = Self(string_type);

	/// Use `naming` to pick the tag from the output name.
	pub fn new(naming: fn(&str) -> &'static str) -> Self {
		Self(naming)
	}

	/// Type tag for `output_name`.
	pub fn type_of(self, output_name: &str) -> &'static str {
		(self.0)(output_name)
	}
}

impl Default for TypeNaming {
	fn default() -> Self {
		Self::STRING
	}
}

impl fmt::Debug for TypeNaming {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("TypeNaming(..)")
	}
}

fn string_type(_: &str) -> &'static str {
	"STRING"
}

#[derive(Debug, Clone, Copy)]
enum CookieField {
	Value,
	Expires,
	Path,
	Domain,
	Comment,
}

/// Emission order for every cookie.
const FIELDS: [CookieField; 5] = [CookieField::Value, CookieField::Expires, CookieField::Path, CookieField::Domain, CookieField::Comment];

impl CookieField {
	fn name(self) -> &'static str {
		match self {
			Self::Value => "value",
			Self::Expires => "expires",
			Self::Path => "path",
			Self::Domain => "domain",
			Self::Comment => "comment",
		}
	}

	fn text(self, cookie: &SetCookie, now: i64) -> String {
		match self {
			Self::Value => cookie.value.clone(),
			Self::Expires => cookie
				.expires_at(now)
				.map_or_else(|| SetCookieDissector::NO_EXPIRY.to_owned(), |at| at.to_string()),
			Self::Path => cookie.path.clone().unwrap_or_default(),
			Self::Domain => cookie.domain.clone().unwrap_or_default(),
			Self::Comment => cookie.comment.clone().unwrap_or_default(),
		}
	}
}

/// Splits an HTTP response `Set-Cookie` value into per-cookie sub-fields.
///
/// Emits `value`, `expires`, `path`, `domain`, `comment` for every cookie in
/// the header, in header order. `expires` is absolute epoch seconds.
#[derive(Debug, Clone)]
pub struct SetCookieDissector {
	naming: TypeNaming,
	clock: ReferenceClock,
	outputs: Vec<OutputDeclaration>,
	prepared: bool,
}

impl SetCookieDissector {
	/// Input type this dissector consumes.
	pub const INPUT_TYPE: &'static str = "HTTP.SETCOOKIE";

	/// `expires` text for a cookie with neither `Max-Age` nor a valid `Expires`.
	pub const NO_EXPIRY: &'static str = "";

	/// Dissector using the system clock and `STRING` tags.
	pub fn new() -> Self {
		Self::with_type_naming(TypeNaming::default())
	}

	/// Dissector tagging outputs through `naming`.
	pub fn with_type_naming(naming: TypeNaming) -> Self {
		let outputs = FIELDS
			.iter()
			.map(|field| OutputDeclaration::new(naming.type_of(field.name()), field.name(), Casts::STRING_ONLY))
			.collect();
		Self {
			naming,
			clock: ReferenceClock::System,
			outputs,
			prepared: false,
		}
	}

	/// Replace the reference clock.
	pub fn with_clock(mut self, clock: ReferenceClock) -> Self {
		self.clock = clock;
		self
	}

	/// Reference clock used by [`Dissect::dissect`].
	pub fn clock(&self) -> ReferenceClock {
		self.clock
	}

	/// Dissect with an explicit reference timestamp instead of the clock.
	pub fn dissect_at(&self, record: &mut dyn Record, input_name: &str, now: i64) -> Result<()> {
		self.dissect_with(record, input_name, || now)
	}

	fn dissect_with(&self, record: &mut dyn Record, input_name: &str, now: impl FnOnce() -> i64) -> Result<()> {
		let raw = match record.value_as_text(Self::INPUT_TYPE, input_name) {
			Some(raw) if !raw.is_empty() => raw,
			_ => {
				tracing::debug!(dissector = NAME, input_name, "empty Set-Cookie value, nothing to dissect");
				return Ok(());
			}
		};

		let now = now();
		let cookies = parse_set_cookie(&raw).map_err(|source| {
			tracing::debug!(dissector = NAME, input_name, error = %source, "Set-Cookie value does not parse");
			DissectError::DissectionFailure {
				dissector: NAME,
				input_name: input_name.to_owned(),
				source: Box::new(source),
			}
		})?;

		for cookie in &cookies {
			tracing::trace!(dissector = NAME, input_name, cookie = %cookie.name, "emitting cookie");
			for field in FIELDS {
				let name = field.name();
				record.emit(input_name, self.naming.type_of(name), name, FieldValue::from(field.text(cookie, now)));
			}
		}
		Ok(())
	}
}

impl Default for SetCookieDissector {
	fn default() -> Self {
		Self::new()
	}
}

impl Dissect for SetCookieDissector {
	fn name(&self) -> &'static str {
		NAME
	}

	fn input_type(&self) -> &str {
		Self::INPUT_TYPE
	}

	fn possible_outputs(&self) -> &[OutputDeclaration] {
		&self.outputs
	}

	fn initialize_from_settings(&mut self, settings: &str) -> Result<()> {
		if self.prepared {
			return Err(DissectError::AlreadyPrepared { dissector: NAME });
		}
		if !settings.is_empty() {
			tracing::debug!(dissector = NAME, settings, "settings are not used");
		}
		Ok(())
	}

	fn prepare_for_dissect(&self, input_name: &str, output_name: &str) -> Option<Casts> {
		let name = extract_field_name(input_name, output_name);
		self.outputs.iter().find(|decl| decl.name.as_ref() == name).map(|decl| decl.casts)
	}

	fn prepare_for_run(&mut self) {
		self.prepared = true;
	}

	fn dissect(&self, record: &mut dyn Record, input_name: &str) -> Result<()> {
		let clock = self.clock;
		self.dissect_with(record, input_name, || clock.now_seconds())
	}

	fn new_instance(&self) -> Self {
		Self {
			prepared: false,
			..self.clone()
		}
	}
}
