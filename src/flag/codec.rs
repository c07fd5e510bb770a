use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use num_complex::{Complex32, Complex64};

use crate::flag::scalar::{self, format_complex32, format_complex64};
use crate::flag::{Def, FlagError, Reflect, Result, ScalarKind, Shape, deref, deref_mut};

/// Text codec chosen for a bound position from its static shape.
///
/// Pointer layers are looked through, so the codec always describes the
/// pointed-to value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
	/// Primitive parsed and rendered directly.
	Scalar(ScalarKind),
	/// `Vec<u8>` as one standard base64 string.
	Bytes,
	/// List of primitives; each set appends one parsed element.
	ScalarList(ScalarKind),
	/// List of byte strings; each set appends one base64-decoded element.
	BytesList,
	/// List of lists; each set appends one JSON-decoded element.
	ListList,
	/// List of maps; each set appends one JSON-decoded element.
	MapList,
	/// List of records; each set appends one JSON-decoded element.
	RecordList,
	/// Map replaced wholesale by a JSON object.
	Map,
	/// Record replaced wholesale by a JSON object.
	Record,
}

/// Renderings that carry no information for a record default.
const DEGENERATE_RECORD_JSON: [&str; 5] = ["{}", "[]", "\"\"", "0", "false"];

impl Codec {
	/// Select the codec for `shape`, or `None` when it has no flag representation.
	pub fn for_shape(shape: &Shape) -> Option<Self> {
		match shape.clone().unwrap_pointers().def {
			Def::Scalar(kind) => Some(Self::Scalar(kind)),
			Def::List(element) => Self::for_list(element()),
			Def::Map => Some(Self::Map),
			Def::Record(_) => Some(Self::Record),
			Def::Pointer(_) | Def::Opaque => None,
		}
	}

	fn for_list(element: Shape) -> Option<Self> {
		if matches!(element.def, Def::Scalar(ScalarKind::U8)) {
			return Some(Self::Bytes);
		}
		match element.unwrap_pointers().def {
			Def::Scalar(kind) => Some(Self::ScalarList(kind)),
			Def::List(inner) if matches!(inner().def, Def::Scalar(ScalarKind::U8)) => Some(Self::BytesList),
			Def::List(_) => Some(Self::ListList),
			Def::Map => Some(Self::MapList),
			Def::Record(_) => Some(Self::RecordList),
			Def::Pointer(_) | Def::Opaque => None,
		}
	}

	/// Human-readable kind label.
	pub fn label(self) -> &'static str {
		match self {
			Self::Scalar(kind) => kind.label(),
			Self::Bytes => "base64",
			Self::ScalarList(kind) => kind.list_label(),
			Self::BytesList => "base64 (JSON list)",
			Self::ListList => "JSON list",
			Self::MapList | Self::RecordList => "JSON object (JSON list)",
			Self::Map | Self::Record => "JSON object",
		}
	}

	/// True when the position holds a boolean.
	pub fn is_bool(self) -> bool {
		self == Self::Scalar(ScalarKind::Bool)
	}

	/// Render the pointed-to `value`. Empty and zero values render as `""`.
	pub fn render(self, value: &dyn Reflect) -> String {
		match self {
			Self::Scalar(kind) => scalar::render(kind, value),
			Self::Bytes => value
				.as_any()
				.downcast_ref::<Vec<u8>>()
				.filter(|bytes| !bytes.is_empty())
				.map(|bytes| STANDARD.encode(bytes))
				.unwrap_or_default(),
			Self::ScalarList(kind) if kind.is_complex() => render_complex_list(kind, value),
			Self::BytesList => render_bytes_list(value),
			Self::ScalarList(_) | Self::ListList | Self::MapList | Self::RecordList | Self::Map => {
				if value.is_empty() {
					return String::new();
				}
				value.to_json().unwrap_or_default()
			}
			Self::Record => {
				let json = value.to_json().unwrap_or_default();
				if DEGENERATE_RECORD_JSON.contains(&json.as_str()) { String::new() } else { json }
			}
		}
	}

	/// Apply `text` to the pointed-to `value`.
	///
	/// Lists grow by one element per call. Maps and records are replaced
	/// only after the whole document decoded.
	pub fn parse(self, value: &mut dyn Reflect, text: &str) -> Result<()> {
		match self {
			Self::Scalar(kind) => scalar::parse_into(kind, value, text),
			Self::Bytes => {
				let decoded = STANDARD.decode(text)?;
				let type_name = value.reflect_shape().type_name;
				let bytes = value.as_any_mut().downcast_mut::<Vec<u8>>().ok_or(FlagError::Unsupported { type_name })?;
				*bytes = decoded;
				Ok(())
			}
			Self::ScalarList(kind) => value.push_with(&mut |slot| scalar::parse_into(kind, deref_mut(slot), text)),
			Self::BytesList => {
				let mut decoded = Some(STANDARD.decode(text)?);
				value.push_with(&mut |slot| {
					let target = deref_mut(slot);
					let type_name = target.reflect_shape().type_name;
					let bytes = target.as_any_mut().downcast_mut::<Vec<u8>>().ok_or(FlagError::Unsupported { type_name })?;
					*bytes = decoded.take().unwrap_or_default();
					Ok(())
				})
			}
			Self::ListList | Self::MapList | Self::RecordList => value.push_json(text),
			Self::Map | Self::Record => value.replace_json(text),
		}
	}
}

fn render_complex_list(kind: ScalarKind, list: &dyn Reflect) -> String {
	if list.is_empty() {
		return String::new();
	}
	let items: Vec<String> = (0..list.len())
		.filter_map(|index| list.element(index))
		.map(|element| {
			let Some(target) = deref(element) else {
				return "null".to_owned();
			};
			let any = target.as_any();
			let text = match kind {
				ScalarKind::Complex32 => any.downcast_ref::<Complex32>().map(|v| format_complex32(*v)),
				_ => any.downcast_ref::<Complex64>().map(|v| format_complex64(*v)),
			};
			quote(&text.unwrap_or_default())
		})
		.collect();
	format!("[{}]", items.join(","))
}

fn render_bytes_list(list: &dyn Reflect) -> String {
	if list.is_empty() {
		return String::new();
	}
	let items: Vec<String> = (0..list.len())
		.filter_map(|index| list.element(index))
		.map(|element| match deref(element).and_then(|target| target.as_any().downcast_ref::<Vec<u8>>()) {
			Some(bytes) => quote(&STANDARD.encode(bytes)),
			None => "null".to_owned(),
		})
		.collect();
	format!("[{}]", items.join(","))
}

fn quote(text: &str) -> String {
	serde_json::to_string(text).unwrap_or_else(|_| format!("\"{text}\""))
}

#[cfg(test)]
mod tests;
