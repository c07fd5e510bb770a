//! Shared fixture records and assertion helpers for jsonflag tests.

use std::collections::BTreeMap;

use jsonflag::{Reflect, Value};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Record with a single string field.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, Reflect)]
pub struct Leaf {
	/// Leaf payload.
	pub value: String,
}

/// Every container shape around one element type.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, Reflect)]
pub struct Generic<T> {
	/// Plain value.
	pub value: T,
	/// Optional value.
	pub ptr: Option<T>,
	/// List of values.
	pub list: Vec<T>,
	/// Optional list of values.
	pub optional_list: Option<Vec<T>>,
	/// List of optional values.
	pub list_of_options: Vec<Option<T>>,
}

/// Root fixture covering every supported kind behind optional boxes.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, Reflect)]
pub struct Base {
	/// Plain integer next to the nested records.
	pub skip_value: i32,
	/// Optional integer next to the nested records.
	pub skip_ptr: Option<i32>,
	/// Booleans.
	pub boolean: Option<Box<Generic<bool>>>,
	/// Signed integers.
	pub int: Option<Box<Generic<i64>>>,
	/// Bytes as scalars; the plain list becomes a byte buffer.
	pub byte: Option<Box<Generic<u8>>>,
	/// Floats.
	pub float: Option<Box<Generic<f64>>>,
	/// Complex numbers.
	pub complex: Option<Box<Generic<Complex64>>>,
	/// Strings.
	pub string: Option<Box<Generic<String>>>,
	/// Byte buffers.
	pub bytes: Option<Box<Generic<Vec<u8>>>>,
	/// Lists of strings.
	pub list: Option<Box<Generic<Vec<String>>>>,
	/// String maps.
	pub map: Option<Box<Generic<BTreeMap<String, String>>>>,
	/// Records.
	pub record: Option<Box<Generic<Leaf>>>,
}

/// Record mixing visible and hidden fields.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, Reflect)]
pub struct Hidden {
	secret: i32,
	/// Visible to discovery.
	pub visible: i32,
	/// Public but excluded from discovery.
	#[jsonflag(skip)]
	pub skipped: i32,
	/// Opaque kinds have no flag form.
	pub letter: char,
}

impl Hidden {
	/// Value of the private field.
	pub fn secret(&self) -> i32 {
		self.secret
	}
}

/// Self-referential record; discovery needs a depth limit.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, Reflect)]
pub struct Tree {
	/// Node label.
	pub label: String,
	/// Optional subtree.
	pub child: Option<Box<Tree>>,
}

/// Record with serde renames and help text.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(rename_all = "camelCase")]
pub struct Documented {
	/// Connection timeout in seconds.
	pub connect_timeout: u32,
	/// Overridden by the attribute.
	#[jsonflag(description = "remote address", usage = "host:port to dial")]
	pub remote_addr: String,
	/// Send a trace header.
	#[serde(rename = "X-Trace")]
	#[jsonflag(desc = "trace header")]
	pub trace: bool,
	/// Never serialized.
	#[serde(skip)]
	pub internal: Option<Leaf>,
}

/// Snapshot of one node: field path, kind label and rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
	/// Dot-joined field names; empty for the root.
	pub path: String,
	/// Kind label.
	pub kind: &'static str,
	/// Current rendering.
	pub text: String,
}

impl NodeData {
	/// Build an expected snapshot.
	pub fn new(path: &str, kind: &'static str, text: &str) -> Self {
		Self {
			path: path.to_owned(),
			kind,
			text: text.to_owned(),
		}
	}
}

/// Snapshot one node.
pub fn data_of(value: &Value<'_>) -> NodeData {
	NodeData {
		path: value.path().iter().map(|field| field.name).collect::<Vec<_>>().join("."),
		kind: value.type_name(),
		text: value.string(),
	}
}

/// Snapshot every node, in order.
pub fn data_of_all(values: &[Value<'_>]) -> Vec<NodeData> {
	values.iter().map(data_of).collect()
}

/// Dot-joined field paths of every node, in order.
pub fn paths_of(values: &[Value<'_>]) -> Vec<String> {
	data_of_all(values).into_iter().map(|data| data.path).collect()
}

/// JSON form of a fixture, for whole-record comparisons.
pub fn json_of<T: Serialize>(value: &T) -> serde_json::Value {
	serde_json::to_value(value).unwrap_or(serde_json::Value::Null)
}
