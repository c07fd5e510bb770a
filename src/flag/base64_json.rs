//! Serde adapter that writes `Vec<u8>` fields as standard base64 strings.
//!
//! serde encodes a plain `Vec<u8>` as an array of numbers, while a byte
//! buffer flag reads and renders base64. A record holding byte buffers
//! renders and parses consistently with its own byte fields only when those
//! fields use this adapter:
//!
//! ```ignore
//! #[derive(Default, Serialize, Deserialize, jsonflag::Reflect)]
//! struct Upload {
//!     #[serde(with = "jsonflag::flag::base64_json")]
//!     pub body: Vec<u8>,
//!     #[serde(default, with = "jsonflag::flag::base64_json::option")]
//!     pub digest: Option<Vec<u8>>,
//! }
//! ```

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

/// Serialize bytes as one base64 string.
pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	serializer.serialize_str(&STANDARD.encode(bytes))
}

/// Deserialize a base64 string; `null` decodes to an empty buffer.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
	D: Deserializer<'de>,
{
	let text = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
	STANDARD.decode(text).map_err(D::Error::custom)
}

/// The same adapter for `Option<Vec<u8>>`, with `None` as `null`.
pub mod option {
	use base64::Engine as _;
	use base64::engine::general_purpose::STANDARD;
	use serde::de::Error as _;
	use serde::{Deserialize, Deserializer, Serializer};

	/// Serialize `Some` as a base64 string and `None` as `null`.
	pub fn serialize<S>(bytes: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		match bytes {
			Some(bytes) => serializer.serialize_str(&STANDARD.encode(bytes)),
			None => serializer.serialize_none(),
		}
	}

	/// Deserialize `null` as `None` and a string as decoded bytes.
	pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
	where
		D: Deserializer<'de>,
	{
		Option::<String>::deserialize(deserializer)?
			.map(|text| STANDARD.decode(text).map_err(D::Error::custom))
			.transpose()
	}
}

#[cfg(test)]
mod tests;
