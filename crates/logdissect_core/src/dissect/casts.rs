use std::fmt;
use std::str::FromStr;

use crate::dissect::{DissectError, Result};

/// One representation a dissected value can be consumed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cast {
	/// Original textual form.
	String,
	/// Signed 64-bit integer.
	Long,
	/// 64-bit float.
	Double,
}

impl Cast {
	const ALL: [Cast; 3] = [Cast::String, Cast::Long, Cast::Double];

	/// Upper-case name used in configuration and output.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::String => "STRING",
			Self::Long => "LONG",
			Self::Double => "DOUBLE",
		}
	}

	fn bit(self) -> u8 {
		match self {
			Self::String => 0b001,
			Self::Long => 0b010,
			Self::Double => 0b100,
		}
	}
}

impl fmt::Display for Cast {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Cast {
	type Err = DissectError;

	fn from_str(name: &str) -> Result<Self> {
		Self::ALL
			.into_iter()
			.find(|cast| cast.as_str().eq_ignore_ascii_case(name.trim()))
			.ok_or_else(|| DissectError::UnknownCast { name: name.to_owned() })
	}
}

/// Non-empty set of [`Cast`] values an output supports.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Casts(u8);

impl Casts {
	/// Text only.
	pub const STRING_ONLY: Self = Self(0b001);
	/// Text or integer.
	pub const STRING_OR_LONG: Self = Self(0b011);
	/// Text or float.
	pub const STRING_OR_DOUBLE: Self = Self(0b101);
	/// Text, integer, or float.
	pub const STRING_OR_LONG_OR_DOUBLE: Self = Self(0b111);

	const NAMED: [(&'static str, Casts); 4] = [
		("STRING_ONLY", Self::STRING_ONLY),
		("STRING_OR_LONG", Self::STRING_OR_LONG),
		("STRING_OR_DOUBLE", Self::STRING_OR_DOUBLE),
		("STRING_OR_LONG_OR_DOUBLE", Self::STRING_OR_LONG_OR_DOUBLE),
	];

	/// Build a set from individual casts; `None` when `casts` is empty.
	pub fn of(casts: impl IntoIterator<Item = Cast>) -> Option<Self> {
		let bits = casts.into_iter().fold(0_u8, |acc, cast| acc | cast.bit());
		(bits != 0).then_some(Self(bits))
	}

	/// Parse cast names (`STRING`, `LONG`, `DOUBLE`) or one set constant name
	/// such as `STRING_OR_LONG`.
	pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<Self> {
		let mut bits = 0_u8;
		for name in names {
			let trimmed = name.trim();
			if let Some((_, set)) = Self::NAMED.iter().find(|(label, _)| label.eq_ignore_ascii_case(trimmed)) {
				bits |= set.0;
			} else {
				bits |= trimmed.parse::<Cast>()?.bit();
			}
		}
		if bits == 0 {
			return Err(DissectError::EmptyCasts);
		}
		Ok(Self(bits))
	}

	/// Whether `cast` is a member.
	pub fn contains(self, cast: Cast) -> bool {
		self.0 & cast.bit() != 0
	}

	/// Whether every member of `other` is also a member of `self`.
	pub fn is_superset(self, other: Casts) -> bool {
		self.0 & other.0 == other.0
	}

	/// Number of members.
	pub fn len(self) -> usize {
		self.0.count_ones() as usize
	}

	/// Always false; sets are non-empty by construction.
	pub fn is_empty(self) -> bool {
		self.0 == 0
	}

	/// Members in `STRING`, `LONG`, `DOUBLE` order.
	pub fn iter(self) -> impl Iterator<Item = Cast> {
		Cast::ALL.into_iter().filter(move |cast| self.contains(*cast))
	}
}

impl fmt::Display for Casts {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (idx, cast) in self.iter().enumerate() {
			if idx > 0 {
				f.write_str("|")?;
			}
			f.write_str(cast.as_str())?;
		}
		Ok(())
	}
}

impl fmt::Debug for Casts {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Casts({self})")
	}
}
