//! Tolerant cookie-date parsing in the style of RFC 6265 §5.1.1.

const MONTHS: [&str; 12] = ["jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec"];

/// Parse an `Expires` attribute value into seconds since the Unix epoch.
///
/// Accepts the usual variants (`Wed, 21 Oct 2015 07:28:00 GMT`,
/// `Wed, 21-Oct-15 07:28:00 GMT`, `Wed Oct 21 2015 07:28:00 GMT+0000`).
/// Returns `None` when a component is missing or out of range.
pub(crate) fn parse_cookie_date(input: &str) -> Option<i64> {
	let mut time = None;
	let mut day = None;
	let mut month = None;
	let mut year = None;

	for token in input.split(is_delimiter).filter(|token| !token.is_empty()) {
		if time.is_none()
			&& let Some(found) = parse_time(token)
		{
			time = Some(found);
			continue;
		}
		if day.is_none()
			&& let Some(found) = leading_number(token, 1, 2)
		{
			day = Some(found);
			continue;
		}
		if month.is_none()
			&& let Some(found) = parse_month(token)
		{
			month = Some(found);
			continue;
		}
		if year.is_none()
			&& let Some(found) = leading_number(token, 2, 4)
		{
			year = Some(found);
		}
	}

	let (hour, minute, second) = time?;
	let (day, month) = (day?, month?);
	let year = match year? {
		y @ 70..=99 => y + 1900,
		y @ 0..=69 => y + 2000,
		y => y,
	};

	if year < 1601 || hour > 23 || minute > 59 || second > 59 || day == 0 || day > days_in_month(year, month) {
		return None;
	}

	let days = days_from_civil(i64::from(year), month, day);
	Some(days * 86_400 + i64::from(hour) * 3_600 + i64::from(minute) * 60 + i64::from(second))
}

fn is_delimiter(ch: char) -> bool {
	matches!(ch, '\t' | '\x20'..='\x2f' | '\x3b'..='\x40' | '\x5b'..='\x60' | '\x7b'..='\x7e')
}

/// Leading run of `min..=max` ASCII digits; trailing non-digits are allowed.
fn leading_number(token: &str, min: usize, max: usize) -> Option<u32> {
	let digits = token.bytes().take_while(u8::is_ascii_digit).count();
	if digits < min || digits > max {
		return None;
	}
	token[..digits].parse().ok()
}

fn parse_time(token: &str) -> Option<(u32, u32, u32)> {
	let mut parts = token.splitn(3, ':');
	let hour = parts.next()?;
	let minute = parts.next()?;
	let second = parts.next()?;
	if hour.len() > 2 || minute.len() > 2 {
		return None;
	}
	Some((exact_number(hour)?, exact_number(minute)?, leading_number(second, 1, 2)?))
}

fn exact_number(part: &str) -> Option<u32> {
	if part.is_empty() || !part.bytes().all(|byte| byte.is_ascii_digit()) {
		return None;
	}
	part.parse().ok()
}

fn parse_month(token: &str) -> Option<u32> {
	let prefix = token.get(..3)?;
	MONTHS
		.iter()
		.position(|name| name.eq_ignore_ascii_case(prefix))
		.map(|idx| idx as u32 + 1)
}

fn days_in_month(year: u32, month: u32) -> u32 {
	match month {
		2 if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) => 29,
		2 => 28,
		4 | 6 | 9 | 11 => 30,
		_ => 31,
	}
}

/// Days since 1970-01-01 in the proleptic Gregorian calendar.
fn days_from_civil(year: i64, month: u32, day: u32) -> i64 {
	let year = if month <= 2 { year - 1 } else { year };
	let era = if year >= 0 { year } else { year - 399 } / 400;
	let yoe = year - era * 400;
	let month = i64::from(month);
	let doy = (153 * (if month > 2 { month - 3 } else { month + 9 }) + 2) / 5 + i64::from(day) - 1;
	let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
	era * 146_097 + doe - 719_468
}
