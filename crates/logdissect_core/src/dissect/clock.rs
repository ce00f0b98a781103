use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the reference timestamp used for time-relative outputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReferenceClock {
	/// Wall clock, whole seconds since the Unix epoch.
	#[default]
	System,
	/// Fixed timestamp in seconds since the Unix epoch.
	Fixed(i64),
}

impl ReferenceClock {
	/// Current reference time in whole seconds since the Unix epoch.
	pub fn now_seconds(self) -> i64 {
		match self {
			Self::Fixed(seconds) => seconds,
			Self::System => match SystemTime::now().duration_since(UNIX_EPOCH) {
				Ok(elapsed) => i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX),
				Err(before) => i64::try_from(before.duration().as_secs()).map_or(i64::MIN, |secs| -secs),
			},
		}
	}
}
