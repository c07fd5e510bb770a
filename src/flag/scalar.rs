use std::any::Any;

use num_complex::{Complex, Complex32, Complex64};

use crate::flag::{FlagError, Reflect, Result, ScalarKind};

/// Parse `text` as `kind` and store it into `value`.
///
/// The value is only written after the whole text parsed.
pub fn parse_into(kind: ScalarKind, value: &mut dyn Reflect, text: &str) -> Result<()> {
	let label = kind.label();
	let any = value.as_any_mut();
	match kind {
		ScalarKind::Bool => store(any, parse_bool(text)?),
		ScalarKind::I8 => store(any, parse_int::<i8>(label, text, true)?),
		ScalarKind::I16 => store(any, parse_int::<i16>(label, text, true)?),
		ScalarKind::I32 => store(any, parse_int::<i32>(label, text, true)?),
		ScalarKind::I64 => store(any, parse_int::<i64>(label, text, true)?),
		ScalarKind::Isize => store(any, parse_int::<isize>(label, text, true)?),
		ScalarKind::U8 => store(any, parse_int::<u8>(label, text, false)?),
		ScalarKind::U16 => store(any, parse_int::<u16>(label, text, false)?),
		ScalarKind::U32 => store(any, parse_int::<u32>(label, text, false)?),
		ScalarKind::U64 => store(any, parse_int::<u64>(label, text, false)?),
		ScalarKind::Usize => store(any, parse_int::<usize>(label, text, false)?),
		ScalarKind::F32 => store(any, parse_f32(label, text)?),
		ScalarKind::F64 => store(any, parse_f64(label, text)?),
		ScalarKind::Complex32 => store(any, parse_complex(label, text, parse_f32)?),
		ScalarKind::Complex64 => store(any, parse_complex(label, text, parse_f64)?),
		ScalarKind::String => store(any, text.to_owned()),
	}
}

/// Render `value` as `kind`. Zero values render as the empty string.
pub fn render(kind: ScalarKind, value: &dyn Reflect) -> String {
	let any = value.as_any();
	let rendered = match kind {
		ScalarKind::Bool => any.downcast_ref::<bool>().map(|v| if *v { "true".to_owned() } else { String::new() }),
		ScalarKind::I8 => any.downcast_ref::<i8>().map(|v| render_int(i128::from(*v))),
		ScalarKind::I16 => any.downcast_ref::<i16>().map(|v| render_int(i128::from(*v))),
		ScalarKind::I32 => any.downcast_ref::<i32>().map(|v| render_int(i128::from(*v))),
		ScalarKind::I64 => any.downcast_ref::<i64>().map(|v| render_int(i128::from(*v))),
		ScalarKind::Isize => any.downcast_ref::<isize>().map(|v| render_int(*v as i128)),
		ScalarKind::U8 => any.downcast_ref::<u8>().map(|v| render_int(i128::from(*v))),
		ScalarKind::U16 => any.downcast_ref::<u16>().map(|v| render_int(i128::from(*v))),
		ScalarKind::U32 => any.downcast_ref::<u32>().map(|v| render_int(i128::from(*v))),
		ScalarKind::U64 => any.downcast_ref::<u64>().map(|v| render_int(i128::from(*v))),
		ScalarKind::Usize => any.downcast_ref::<usize>().map(|v| render_int(*v as i128)),
		ScalarKind::F32 => any.downcast_ref::<f32>().map(|v| if *v == 0.0 { String::new() } else { format_f32(*v) }),
		ScalarKind::F64 => any.downcast_ref::<f64>().map(|v| if *v == 0.0 { String::new() } else { format_f64(*v) }),
		ScalarKind::Complex32 => any.downcast_ref::<Complex32>().map(|v| if is_zero(v) { String::new() } else { format_complex32(*v) }),
		ScalarKind::Complex64 => any.downcast_ref::<Complex64>().map(|v| if is_zero(v) { String::new() } else { format_complex64(*v) }),
		ScalarKind::String => any.downcast_ref::<String>().cloned(),
	};
	rendered.unwrap_or_default()
}

fn store<T: 'static>(any: &mut dyn Any, parsed: T) -> Result<()> {
	let slot = any.downcast_mut::<T>().ok_or(FlagError::Unsupported {
		type_name: std::any::type_name::<T>(),
	})?;
	*slot = parsed;
	Ok(())
}

fn render_int(value: i128) -> String {
	if value == 0 { String::new() } else { value.to_string() }
}

fn is_zero<T: PartialEq + Default>(value: &Complex<T>) -> bool {
	value.re == T::default() && value.im == T::default()
}

/// Parse a boolean literal: `1 t T TRUE true True 0 f F FALSE false False`.
pub fn parse_bool(text: &str) -> Result<bool> {
	match text {
		"1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
		"0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
		_ => Err(FlagError::format("bool", text, "expected a boolean literal")),
	}
}

/// Parse an integer literal with base prefixes and digit separators.
///
/// Accepts an optional sign (`-` only when `signed`), the prefixes `0x`, `0o`,
/// `0b`, a bare leading `0` for octal, and `_` between digits. Empty text is zero.
pub fn parse_int<T: TryFrom<i128>>(label: &'static str, text: &str, signed: bool) -> Result<T> {
	if text.is_empty() {
		return T::try_from(0_i128).map_err(|_| FlagError::overflow(label, text));
	}

	let (negative, body) = match text.as_bytes()[0] {
		b'+' if signed => (false, &text[1..]),
		b'-' if signed => (true, &text[1..]),
		_ => (false, text),
	};

	let bytes = body.as_bytes();
	let (radix, digits, prefixed) = if bytes.len() >= 2 && bytes[0] == b'0' {
		match bytes[1] {
			b'x' | b'X' => (16, &body[2..], true),
			b'o' | b'O' => (8, &body[2..], true),
			b'b' | b'B' => (2, &body[2..], true),
			_ => (8, &body[1..], true),
		}
	} else {
		(10, body, false)
	};

	if digits.is_empty() {
		return Err(FlagError::format(label, text, "missing digits"));
	}

	let mut magnitude: u128 = 0;
	let mut previous_digit = prefixed;
	let chars: Vec<char> = digits.chars().collect();
	for (pos, ch) in chars.iter().enumerate() {
		if *ch == '_' {
			let next_digit = chars.get(pos + 1).is_some_and(|next| next.is_digit(radix));
			if !previous_digit || !next_digit {
				return Err(FlagError::format(label, text, "misplaced digit separator"));
			}
			previous_digit = false;
			continue;
		}
		let digit = ch.to_digit(radix).ok_or_else(|| FlagError::format(label, text, "invalid digit"))?;
		magnitude = magnitude
			.checked_mul(u128::from(radix))
			.and_then(|value| value.checked_add(u128::from(digit)))
			.ok_or_else(|| FlagError::overflow(label, text))?;
		previous_digit = true;
	}

	let magnitude = i128::try_from(magnitude).map_err(|_| FlagError::overflow(label, text))?;
	let value = if negative { -magnitude } else { magnitude };
	T::try_from(value).map_err(|_| FlagError::overflow(label, text))
}

/// Parse a 64-bit float. Empty text is zero.
pub fn parse_f64(label: &'static str, text: &str) -> Result<f64> {
	if text.is_empty() {
		return Ok(0.0);
	}
	let value: f64 = text.parse().map_err(|_| FlagError::format(label, text, "invalid float syntax"))?;
	if value.is_infinite() && !is_infinity_literal(text) {
		return Err(FlagError::overflow(label, text));
	}
	Ok(value)
}

/// Parse a 32-bit float. Finite literals beyond `f32` range overflow.
pub fn parse_f32(label: &'static str, text: &str) -> Result<f32> {
	if text.is_empty() {
		return Ok(0.0);
	}
	let value: f32 = text.parse().map_err(|_| FlagError::format(label, text, "invalid float syntax"))?;
	if value.is_infinite() && !is_infinity_literal(text) {
		return Err(FlagError::overflow(label, text));
	}
	Ok(value)
}

fn is_infinity_literal(text: &str) -> bool {
	let unsigned = text.trim_start_matches(['+', '-']);
	unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

/// Parse a complex literal: `R`, `Ii`, `R+Ii` or `R-Ii`, optionally in parentheses.
///
/// A bare `i` with an optional sign stands for a unit imaginary part.
pub fn parse_complex<F>(label: &'static str, text: &str, part: fn(&'static str, &str) -> Result<F>) -> Result<Complex<F>>
where
	F: Default + std::ops::Neg<Output = F> + From<u8>,
{
	if text.is_empty() {
		return Ok(Complex::new(F::default(), F::default()));
	}

	let inner = match (text.strip_prefix('('), text.ends_with(')')) {
		(Some(rest), true) => &rest[..rest.len() - 1],
		(None, false) => text,
		_ => return Err(FlagError::format(label, text, "unbalanced parentheses")),
	};
	if inner.is_empty() {
		return Err(FlagError::format(label, text, "missing components"));
	}

	let part_of = |component: &str| part(label, component).map_err(|err| relabel(err, label, text));

	let Some(body) = inner.strip_suffix('i') else {
		return Ok(Complex::new(part_of(inner)?, F::default()));
	};

	let split = body
		.char_indices()
		.rev()
		.find(|(pos, ch)| *pos > 0 && matches!(*ch, '+' | '-') && !body[..*pos].ends_with(['e', 'E']))
		.map(|(pos, _)| pos);

	let (real, imag) = match split {
		Some(pos) => (part_of(&body[..pos])?, &body[pos..]),
		None => (F::default(), body),
	};

	let imag = match imag {
		"" | "+" => F::from(1),
		"-" => -F::from(1),
		other => part_of(other)?,
	};
	Ok(Complex::new(real, imag))
}

fn relabel(err: FlagError, label: &'static str, text: &str) -> FlagError {
	match err {
		FlagError::Overflow { .. } => FlagError::overflow(label, text),
		FlagError::Format { reason, .. } => FlagError::format(label, text, reason),
		other => other,
	}
}

/// Shortest round-trip decimal rendering of an `f64`.
///
/// Exponent form is used for exponents below -4 or from 6 upwards.
pub fn format_f64(value: f64) -> String {
	if value.is_nan() {
		return "NaN".to_owned();
	}
	if value.is_infinite() {
		return if value > 0.0 { "+Inf".to_owned() } else { "-Inf".to_owned() };
	}
	shortest(format!("{value:e}"), || format!("{value}"))
}

/// Shortest round-trip decimal rendering of an `f32`.
pub fn format_f32(value: f32) -> String {
	if value.is_nan() {
		return "NaN".to_owned();
	}
	if value.is_infinite() {
		return if value > 0.0 { "+Inf".to_owned() } else { "-Inf".to_owned() };
	}
	shortest(format!("{value:e}"), || format!("{value}"))
}

fn shortest(scientific: String, plain: impl FnOnce() -> String) -> String {
	let Some((mantissa, exponent)) = scientific.split_once('e') else {
		return scientific;
	};
	let Ok(exponent) = exponent.parse::<i32>() else {
		return scientific;
	};
	if (-4..6).contains(&exponent) {
		return plain();
	}
	let sign = if exponent < 0 { '-' } else { '+' };
	format!("{mantissa}e{sign}{:02}", exponent.abs())
}

/// Render a `Complex64` as `a+bi`.
pub fn format_complex64(value: Complex64) -> String {
	join_complex(format_f64(value.re), format_f64(value.im))
}

/// Render a `Complex32` as `a+bi`.
pub fn format_complex32(value: Complex32) -> String {
	join_complex(format_f32(value.re), format_f32(value.im))
}

fn join_complex(real: String, imag: String) -> String {
	if imag.starts_with(['+', '-']) {
		format!("{real}{imag}i")
	} else {
		format!("{real}+{imag}i")
	}
}
