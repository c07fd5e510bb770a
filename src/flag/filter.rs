use std::ops::{BitOr, BitOrAssign};

use crate::flag::{Codec, Value};

/// Inclusion and descent decision for one discovered position.
///
/// The two bits combine by bitwise OR, so any filter asking to skip or to
/// stop descending wins over filters that do not.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FilterResult {
	/// Include the position and visit its fields.
	#[default]
	IncludeAndDescend,
	/// Include the position but do not visit its fields.
	IncludeNoDescend,
	/// Leave the position out but still visit its fields.
	SkipAndDescend,
	/// Leave the position and its fields out.
	SkipNoDescend,
}

const NO_DESCEND: u8 = 0b01;
const SKIP: u8 = 0b10;

impl FilterResult {
	/// Two-bit encoding: `0b10` is skip, `0b01` is no-descend.
	pub fn bits(self) -> u8 {
		match self {
			Self::IncludeAndDescend => 0b00,
			Self::IncludeNoDescend => 0b01,
			Self::SkipAndDescend => 0b10,
			Self::SkipNoDescend => 0b11,
		}
	}

	/// Decode the two low bits; higher bits are ignored.
	pub fn from_bits(bits: u8) -> Self {
		match bits & (SKIP | NO_DESCEND) {
			0b00 => Self::IncludeAndDescend,
			0b01 => Self::IncludeNoDescend,
			0b10 => Self::SkipAndDescend,
			_ => Self::SkipNoDescend,
		}
	}

	/// True when the position is left out of the results.
	pub fn is_skip(self) -> bool {
		self.bits() & SKIP != 0
	}

	/// True when the walk does not visit the position's fields.
	pub fn is_no_descend(self) -> bool {
		self.bits() & NO_DESCEND != 0
	}
}

impl BitOr for FilterResult {
	type Output = Self;

	fn bitor(self, rhs: Self) -> Self {
		Self::from_bits(self.bits() | rhs.bits())
	}
}

impl BitOrAssign for FilterResult {
	fn bitor_assign(&mut self, rhs: Self) {
		*self = *self | rhs;
	}
}

/// Caller-supplied discovery filter.
pub type Filter<'f> = dyn Fn(&Value<'_>) -> FilterResult + 'f;

/// Combine every filter's decision for `value`.
///
/// A missing value is skipped without descent; no filters means include and descend.
pub fn filter(value: Option<&Value<'_>>, filters: &[&Filter<'_>]) -> FilterResult {
	let Some(value) = value else {
		return FilterResult::SkipNoDescend;
	};
	filters.iter().fold(FilterResult::IncludeAndDescend, |acc, cond| acc | cond(value))
}

/// Stop descending once a position is `depth` fields below the root.
pub fn max_depth(depth: usize) -> impl Fn(&Value<'_>) -> FilterResult {
	move |value: &Value<'_>| {
		if value.path().len() >= depth {
			FilterResult::IncludeNoDescend
		} else {
			FilterResult::IncludeAndDescend
		}
	}
}

/// Leave record positions out while still visiting their fields.
pub fn skip_records() -> impl Fn(&Value<'_>) -> FilterResult {
	|value: &Value<'_>| {
		if value.codec() == Some(Codec::Record) {
			FilterResult::SkipAndDescend
		} else {
			FilterResult::IncludeAndDescend
		}
	}
}

/// Leave the root position out while still visiting its fields.
pub fn skip_root() -> impl Fn(&Value<'_>) -> FilterResult {
	|value: &Value<'_>| {
		if value.path().is_empty() {
			FilterResult::SkipAndDescend
		} else {
			FilterResult::IncludeAndDescend
		}
	}
}
