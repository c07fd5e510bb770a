//! Runtime helpers for code generated by `#[derive(Reflect)]`.
//! Not a stable interface.

pub use serde;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::flag::{Result, Shape};

/// Shape recorded for fields that discovery never visits.
pub fn unexported_shape() -> Shape {
	Shape::opaque("unexported")
}

/// JSON encoding of a derived record.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
	crate::flag::reflect::encode_json(value)
}

/// Decode a fresh record and install it only when decoding succeeded.
pub fn replace_json<T: DeserializeOwned>(slot: &mut T, text: &str) -> Result<()> {
	crate::flag::reflect::replace_from_json(slot, text)
}
