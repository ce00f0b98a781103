use std::mem;

use super::date::parse_cookie_date;
use crate::dissect::CookieError;

/// Attribute names a cookie may not be named after.
const RESERVED_NAMES: [&str; 11] = [
	"comment",
	"commenturl",
	"discard",
	"domain",
	"expires",
	"httponly",
	"max-age",
	"path",
	"port",
	"secure",
	"version",
];

/// One cookie definition from a `Set-Cookie` header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetCookie {
	/// Cookie name.
	pub name: String,
	/// Cookie value with surrounding quotes removed.
	pub value: String,
	/// `Max-Age` in seconds.
	pub max_age: Option<i64>,
	/// `Expires` as seconds since the Unix epoch, when the date parsed.
	pub expires: Option<i64>,
	/// `Path` attribute.
	pub path: Option<String>,
	/// `Domain` attribute, lower-cased.
	pub domain: Option<String>,
	/// `Comment` attribute.
	pub comment: Option<String>,
	/// `Secure` flag.
	pub secure: bool,
	/// `HttpOnly` flag.
	pub http_only: bool,
}

impl SetCookie {
	/// Absolute expiry in seconds since the epoch, taking `now` as the
	/// reference for `Max-Age`. `Max-Age` wins over `Expires`.
	pub fn expires_at(&self, now: i64) -> Option<i64> {
		match self.max_age {
			Some(max_age) => Some(now.saturating_add(max_age)),
			None => self.expires,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
	Name,
	Value,
	AttrName,
	AttrValue,
}

/// Parse a `Set-Cookie` header value into its cookie definitions, in order.
///
/// Commas separate cookies unless the header carries an `expires=`
/// attribute, in which case the whole header is one legacy cookie.
/// The `expires=` check scans the whole header text, quoted values and
/// later cookies included, so `a="expires=x", b=2` is a single cookie.
///
/// A `"` opens a quoted section only as the first non-blank character of a
/// value. Anywhere else it is kept as a literal character.
pub fn parse_set_cookie(header: &str) -> Result<Vec<SetCookie>, CookieError> {
	let (base, body) = strip_header_name(header);
	let split_on_comma = !body.to_ascii_lowercase().contains("expires=");

	let mut parser = Parser {
		state: State::Name,
		cookie_start: base,
		key: String::new(),
		buf: String::new(),
		current: None,
		cookies: Vec::new(),
	};
	let mut quote_at = None;

	for (idx, ch) in body.char_indices() {
		let at = base + idx;
		if quote_at.is_some() {
			parser.buf.push(ch);
			if ch == '"' {
				quote_at = None;
			}
			continue;
		}

		match ch {
			'"' if matches!(parser.state, State::Value | State::AttrValue) && parser.buf.trim().is_empty() => {
				quote_at = Some(at);
				parser.buf.push(ch);
			}
			'=' if parser.state == State::Name => parser.begin_value(State::Value),
			'=' if parser.state == State::AttrName => parser.begin_value(State::AttrValue),
			';' => {
				parser.end_pair()?;
				parser.state = State::AttrName;
			}
			',' if split_on_comma => {
				parser.end_pair()?;
				parser.end_cookie();
				parser.state = State::Name;
				parser.cookie_start = at + 1;
			}
			_ => parser.buf.push(ch),
		}
	}

	if let Some(at) = quote_at {
		return Err(CookieError::UnterminatedQuote { at });
	}
	parser.end_pair()?;
	parser.end_cookie();
	Ok(parser.cookies)
}

/// Render `value` so that `name=<rendered>` parses back to `value`.
///
/// Values without whitespace, `,` or `;` that do not start with `"` are
/// returned as they are; anything else is wrapped in double quotes. A value
/// holding a `"` followed later by `,` or `;` has no such rendering, since
/// the header grammar has no escape for a quote inside a quoted section.
pub fn quote_cookie_value(value: &str) -> String {
	let bare = !value.starts_with('"') && !value.chars().any(|ch| ch.is_whitespace() || ch == ',' || ch == ';');
	if bare {
		value.to_owned()
	} else {
		format!("\"{value}\"")
	}
}

struct Parser {
	state: State,
	cookie_start: usize,
	key: String,
	buf: String,
	current: Option<SetCookie>,
	cookies: Vec<SetCookie>,
}

impl Parser {
	fn begin_value(&mut self, next: State) {
		self.key = mem::take(&mut self.buf);
		self.state = next;
	}

	fn end_pair(&mut self) -> Result<(), CookieError> {
		let key = mem::take(&mut self.key);
		let buf = mem::take(&mut self.buf);
		let text = buf.trim();

		match self.state {
			State::Name if text.is_empty() => Ok(()),
			State::Name => Err(CookieError::MissingNameValue { at: self.cookie_start }),
			State::Value => {
				let name = key.trim();
				check_name(name)?;
				self.current = Some(SetCookie {
					name: name.to_owned(),
					value: unquote(text).to_owned(),
					..SetCookie::default()
				});
				Ok(())
			}
			State::AttrName if text.is_empty() => Ok(()),
			State::AttrName | State::AttrValue => {
				let Some(cookie) = self.current.as_mut() else {
					return Err(CookieError::MissingNameValue { at: self.cookie_start });
				};
				match self.state {
					State::AttrName => apply_attr(cookie, text, ""),
					_ => apply_attr(cookie, key.trim(), unquote(text)),
				}
			}
		}
	}

	fn end_cookie(&mut self) {
		if let Some(cookie) = self.current.take() {
			self.cookies.push(cookie);
		}
	}
}

fn apply_attr(cookie: &mut SetCookie, name: &str, value: &str) -> Result<(), CookieError> {
	match name.to_ascii_lowercase().as_str() {
		"max-age" => {
			let max_age = value
				.parse::<i64>()
				.map_err(|_| CookieError::InvalidMaxAge { value: value.to_owned() })?;
			cookie.max_age = Some(max_age);
		}
		"expires" => match parse_cookie_date(value) {
			Some(at) => cookie.expires = Some(at),
			None => tracing::debug!(cookie = %cookie.name, expires = value, "ignoring unparseable cookie expiry"),
		},
		"path" => cookie.path = Some(value.to_owned()),
		"domain" => cookie.domain = Some(value.to_ascii_lowercase()),
		"comment" => cookie.comment = Some(value.to_owned()),
		"secure" => cookie.secure = true,
		"httponly" => cookie.http_only = true,
		_ => {}
	}
	Ok(())
}

fn check_name(name: &str) -> Result<(), CookieError> {
	let is_token = !name.is_empty() && name.bytes().all(|byte| byte.is_ascii_graphic() && !b"()<>@,;:\\\"/[]?={}".contains(&byte));
	let reserved = name.starts_with('$') || RESERVED_NAMES.iter().any(|item| item.eq_ignore_ascii_case(name));
	if !is_token || reserved {
		return Err(CookieError::InvalidName { name: name.to_owned() });
	}
	Ok(())
}

fn unquote(text: &str) -> &str {
	text.strip_prefix('"')
		.and_then(|inner| inner.strip_suffix('"'))
		.unwrap_or(text)
}

/// Drop a leading `Set-Cookie:` or `Set-Cookie2:` and return the byte offset
/// of the remaining text.
fn strip_header_name(header: &str) -> (usize, &str) {
	for prefix in ["set-cookie2:", "set-cookie:"] {
		if let Some(head) = header.get(..prefix.len())
			&& head.eq_ignore_ascii_case(prefix)
		{
			return (prefix.len(), &header[prefix.len()..]);
		}
	}
	(0, header)
}

#[cfg(test)]
mod tests;
