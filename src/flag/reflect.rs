use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use num_complex::{Complex32, Complex64};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::flag::{FlagError, Result};

/// Primitive kinds with a dedicated text codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
	/// `bool`.
	Bool,
	/// `i8`.
	I8,
	/// `i16`.
	I16,
	/// `i32`.
	I32,
	/// `i64`.
	I64,
	/// `isize`, the platform-width signed integer.
	Isize,
	/// `u8`.
	U8,
	/// `u16`.
	U16,
	/// `u32`.
	U32,
	/// `u64`.
	U64,
	/// `usize`, the platform-width unsigned integer.
	Usize,
	/// `f32`.
	F32,
	/// `f64`.
	F64,
	/// `Complex32`, two `f32` components.
	Complex32,
	/// `Complex64`, two `f64` components.
	Complex64,
	/// `String`.
	String,
}

impl ScalarKind {
	/// Kind label shown next to a flag.
	pub fn label(self) -> &'static str {
		match self {
			Self::Bool => "bool",
			Self::I8 => "int8",
			Self::I16 => "int16",
			Self::I32 => "int32",
			Self::I64 => "int64",
			Self::Isize => "int",
			Self::U8 => "uint8",
			Self::U16 => "uint16",
			Self::U32 => "uint32",
			Self::U64 => "uint64",
			Self::Usize => "uint",
			Self::F32 => "float32",
			Self::F64 => "float64",
			Self::Complex32 => "complex64",
			Self::Complex64 => "complex128",
			Self::String => "string",
		}
	}

	/// Kind label for a list with elements of this kind.
	pub fn list_label(self) -> &'static str {
		match self {
			Self::Bool => "bool (JSON list)",
			Self::I8 => "int8 (JSON list)",
			Self::I16 => "int16 (JSON list)",
			Self::I32 => "int32 (JSON list)",
			Self::I64 => "int64 (JSON list)",
			Self::Isize => "int (JSON list)",
			Self::U8 => "uint8 (JSON list)",
			Self::U16 => "uint16 (JSON list)",
			Self::U32 => "uint32 (JSON list)",
			Self::U64 => "uint64 (JSON list)",
			Self::Usize => "uint (JSON list)",
			Self::F32 => "float32 (JSON list)",
			Self::F64 => "float64 (JSON list)",
			Self::Complex32 => "complex64 (JSON list)",
			Self::Complex64 => "complex128 (JSON list)",
			Self::String => "string (JSON list)",
		}
	}

	/// True for the two complex kinds.
	pub fn is_complex(self) -> bool {
		matches!(self, Self::Complex32 | Self::Complex64)
	}
}

/// Static description of a reflected type.
#[derive(Debug, Clone)]
pub struct Shape {
	/// Rust type name, for diagnostics.
	pub type_name: &'static str,
	/// Structural definition.
	pub def: Def,
}

/// Structural category of a reflected type.
///
/// Nested shapes are reached through `fn` pointers so that describing a
/// record never builds the shapes of its descendants eagerly.
#[derive(Debug, Clone)]
pub enum Def {
	/// Primitive with a text codec.
	Scalar(ScalarKind),
	/// Optional or boxed indirection to another shape.
	Pointer(fn() -> Shape),
	/// Growable list of elements.
	List(fn() -> Shape),
	/// JSON-object-shaped map.
	Map,
	/// Record with named fields in declaration order.
	Record(Vec<FieldInfo>),
	/// Kind with no flag representation.
	Opaque,
}

impl Shape {
	/// Build a shape from its parts.
	pub fn new(type_name: &'static str, def: Def) -> Self {
		Self { type_name, def }
	}

	/// Shape of a type that cannot be bound to a flag.
	pub fn opaque(type_name: &'static str) -> Self {
		Self::new(type_name, Def::Opaque)
	}

	/// Strip every pointer layer and return the pointed-to shape.
	pub fn unwrap_pointers(self) -> Self {
		let mut shape = self;
		while let Def::Pointer(inner) = shape.def {
			shape = inner();
		}
		shape
	}

	/// True when the pointer-unwrapped shape is a record.
	pub fn is_record(&self) -> bool {
		matches!(self.clone().unwrap_pointers().def, Def::Record(_))
	}
}

/// Textual key/value metadata attached to a record field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tags(&'static [(&'static str, &'static str)]);

impl Tags {
	/// No tags.
	pub const EMPTY: Self = Self(&[]);

	/// Wrap a static list of `(key, value)` pairs.
	pub const fn new(pairs: &'static [(&'static str, &'static str)]) -> Self {
		Self(pairs)
	}

	/// Value stored under `key`, if the key is present.
	pub fn lookup(&self, key: &str) -> Option<&'static str> {
		self.0.iter().find(|(name, _)| *name == key).map(|(_, value)| *value)
	}

	/// Value stored under `key`, or the empty string.
	pub fn get(&self, key: &str) -> &'static str {
		self.lookup(key).unwrap_or("")
	}

	/// Iterate all `(key, value)` pairs in declaration order.
	pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
		self.0.iter().copied()
	}
}

/// Descriptor of one record field.
#[derive(Debug, Clone)]
pub struct FieldInfo {
	/// Field identifier as declared.
	pub name: &'static str,
	/// Field metadata (JSON name, usage text).
	pub tags: Tags,
	/// Whether the field is visible to discovery.
	pub exported: bool,
	/// Shape of the field's declared type.
	pub shape: fn() -> Shape,
}

impl FieldInfo {
	/// Exported field without tags and with an opaque shape.
	///
	/// Mostly useful for building paths by hand when deriving flag names.
	pub fn named(name: &'static str) -> Self {
		Self {
			name,
			tags: Tags::EMPTY,
			exported: true,
			shape: opaque_shape,
		}
	}

	/// Replace the field tags.
	pub fn with_tags(mut self, tags: &'static [(&'static str, &'static str)]) -> Self {
		self.tags = Tags::new(tags);
		self
	}
}

fn opaque_shape() -> Shape {
	Shape::opaque("opaque")
}

/// Structural access to a value, the substitute for runtime reflection.
///
/// Implemented for primitives, `String`, `Vec`, `Option`, `Box` and the
/// standard maps; records get it from `#[derive(Reflect)]`.
pub trait Reflect: Any {
	/// Static shape of the implementing type.
	fn shape() -> Shape
	where
		Self: Sized;

	/// Shape of the value's concrete type.
	fn reflect_shape(&self) -> Shape;

	/// Upcast for downcasting to the concrete type.
	fn as_any(&self) -> &dyn Any;

	/// Mutable upcast for downcasting to the concrete type.
	fn as_any_mut(&mut self) -> &mut dyn Any;

	/// Record field by declaration index. `None` for unexported fields and non-records.
	fn field(&self, index: usize) -> Option<&dyn Reflect> {
		let _ = index;
		None
	}

	/// Mutable record field by declaration index.
	fn field_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
		let _ = index;
		None
	}

	/// True for optional and boxed indirections.
	fn is_pointer(&self) -> bool {
		false
	}

	/// Pointed-to value, or `None` when the pointer is empty or this is not a pointer.
	fn pointee(&self) -> Option<&dyn Reflect> {
		None
	}

	/// Pointed-to value, allocating a default one when the pointer is empty.
	///
	/// Non-pointer values return themselves.
	fn pointee_mut(&mut self) -> &mut dyn Reflect;

	/// Reset an optional pointer back to empty. No-op for everything else.
	fn clear_pointee(&mut self) {}

	/// Number of entries of a list or map; zero otherwise.
	fn len(&self) -> usize {
		0
	}

	/// True when [`Reflect::len`] is zero.
	fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// List element by position.
	fn element(&self, index: usize) -> Option<&dyn Reflect> {
		let _ = index;
		None
	}

	/// Append one element that `fill` decodes into a fresh default slot.
	///
	/// The element is only appended when `fill` succeeds.
	fn push_with(&mut self, fill: &mut dyn FnMut(&mut dyn Reflect) -> Result<()>) -> Result<()> {
		let _ = fill;
		Err(FlagError::Unsupported {
			type_name: self.reflect_shape().type_name,
		})
	}

	/// Append one element decoded from a JSON document.
	fn push_json(&mut self, text: &str) -> Result<()> {
		let _ = text;
		Err(FlagError::Unsupported {
			type_name: self.reflect_shape().type_name,
		})
	}

	/// Compact JSON encoding of the value.
	fn to_json(&self) -> Result<String>;

	/// Replace the value with a fresh one decoded from a JSON document.
	fn replace_json(&mut self, text: &str) -> Result<()>;
}

/// Everything a type needs to sit inside a bindable container.
pub trait Bindable: Reflect + Default + Serialize + DeserializeOwned {}

impl<T> Bindable for T where T: Reflect + Default + Serialize + DeserializeOwned {}

/// Follow pointers without allocating. `None` when an empty pointer is met.
pub fn deref(value: &dyn Reflect) -> Option<&dyn Reflect> {
	let mut value = value;
	while value.is_pointer() {
		value = value.pointee()?;
	}
	Some(value)
}

/// Follow pointers, allocating default values through empty ones.
pub fn deref_mut(value: &mut dyn Reflect) -> &mut dyn Reflect {
	let mut value = value;
	while value.is_pointer() {
		value = value.pointee_mut();
	}
	value
}

/// Read-only navigation along record field indexes.
pub(crate) fn locate<'r>(root: &'r dyn Reflect, index: &[usize]) -> Option<&'r dyn Reflect> {
	let mut value = root;
	for &step in index {
		value = deref(value)?.field(step)?;
	}
	Some(value)
}

/// Navigation along record field indexes, materializing empty pointers on the way.
pub(crate) fn locate_mut<'r>(root: &'r mut dyn Reflect, index: &[usize]) -> Option<&'r mut dyn Reflect> {
	let mut value = root;
	for &step in index {
		value = deref_mut(value).field_mut(step)?;
	}
	Some(value)
}

pub(crate) fn encode_json<T: Serialize>(value: &T) -> Result<String> {
	Ok(serde_json::to_string(value)?)
}

/// JSON encoding with object keys sorted, whatever the value's iteration order.
pub(crate) fn encode_json_sorted<T: Serialize>(value: &T) -> Result<String> {
	Ok(serde_json::to_value(value)?.to_string())
}

pub(crate) fn replace_from_json<T: DeserializeOwned>(slot: &mut T, text: &str) -> Result<()> {
	let fresh: T = serde_json::from_str(text)?;
	*slot = fresh;
	Ok(())
}

macro_rules! reflect_common {
	() => {
		reflect_common!(encode_json);
	};
	($encode:ident) => {
		fn reflect_shape(&self) -> Shape {
			<Self as Reflect>::shape()
		}

		fn as_any(&self) -> &dyn Any {
			self
		}

		fn as_any_mut(&mut self) -> &mut dyn Any {
			self
		}

		fn to_json(&self) -> Result<String> {
			$encode(self)
		}

		fn replace_json(&mut self, text: &str) -> Result<()> {
			replace_from_json(self, text)
		}
	};
}

macro_rules! impl_scalar {
	($($ty:ty => $kind:ident),* $(,)?) => {
		$(
			impl Reflect for $ty {
				fn shape() -> Shape {
					Shape::new(stringify!($ty), Def::Scalar(ScalarKind::$kind))
				}

				fn pointee_mut(&mut self) -> &mut dyn Reflect {
					self
				}

				reflect_common!();
			}
		)*
	};
}

impl_scalar!(
	bool => Bool,
	i8 => I8,
	i16 => I16,
	i32 => I32,
	i64 => I64,
	isize => Isize,
	u8 => U8,
	u16 => U16,
	u32 => U32,
	u64 => U64,
	usize => Usize,
	f32 => F32,
	f64 => F64,
	Complex32 => Complex32,
	Complex64 => Complex64,
	String => String,
);

macro_rules! impl_opaque {
	($($ty:ty),* $(,)?) => {
		$(
			impl Reflect for $ty {
				fn shape() -> Shape {
					Shape::opaque(stringify!($ty))
				}

				fn pointee_mut(&mut self) -> &mut dyn Reflect {
					self
				}

				reflect_common!();
			}
		)*
	};
}

impl_opaque!(char, i128, u128, (), serde_json::Value);

impl<T: Bindable> Reflect for Option<T> {
	fn shape() -> Shape {
		Shape::new(std::any::type_name::<Self>(), Def::Pointer(T::shape))
	}

	fn is_pointer(&self) -> bool {
		true
	}

	fn pointee(&self) -> Option<&dyn Reflect> {
		self.as_ref().map(|value| value as &dyn Reflect)
	}

	fn pointee_mut(&mut self) -> &mut dyn Reflect {
		self.get_or_insert_with(T::default)
	}

	fn clear_pointee(&mut self) {
		*self = None;
	}

	reflect_common!();
}

impl<T: Bindable> Reflect for Box<T> {
	fn shape() -> Shape {
		Shape::new(std::any::type_name::<Self>(), Def::Pointer(T::shape))
	}

	fn is_pointer(&self) -> bool {
		true
	}

	fn pointee(&self) -> Option<&dyn Reflect> {
		Some(&**self)
	}

	fn pointee_mut(&mut self) -> &mut dyn Reflect {
		&mut **self
	}

	reflect_common!();
}

impl<T: Bindable> Reflect for Vec<T> {
	fn shape() -> Shape {
		Shape::new(std::any::type_name::<Self>(), Def::List(T::shape))
	}

	fn pointee_mut(&mut self) -> &mut dyn Reflect {
		self
	}

	fn len(&self) -> usize {
		Vec::len(self)
	}

	fn element(&self, index: usize) -> Option<&dyn Reflect> {
		self.get(index).map(|value| value as &dyn Reflect)
	}

	fn push_with(&mut self, fill: &mut dyn FnMut(&mut dyn Reflect) -> Result<()>) -> Result<()> {
		let mut item = T::default();
		fill(&mut item)?;
		self.push(item);
		Ok(())
	}

	fn push_json(&mut self, text: &str) -> Result<()> {
		let item: T = serde_json::from_str(text)?;
		self.push(item);
		Ok(())
	}

	reflect_common!();
}

impl<K, V> Reflect for HashMap<K, V>
where
	K: Eq + Hash + Serialize + DeserializeOwned + 'static,
	V: Serialize + DeserializeOwned + 'static,
{
	fn shape() -> Shape {
		Shape::new(std::any::type_name::<Self>(), Def::Map)
	}

	fn pointee_mut(&mut self) -> &mut dyn Reflect {
		self
	}

	fn len(&self) -> usize {
		HashMap::len(self)
	}

	reflect_common!(encode_json_sorted);
}

impl<K, V> Reflect for BTreeMap<K, V>
where
	K: Ord + Serialize + DeserializeOwned + 'static,
	V: Serialize + DeserializeOwned + 'static,
{
	fn shape() -> Shape {
		Shape::new(std::any::type_name::<Self>(), Def::Map)
	}

	fn pointee_mut(&mut self) -> &mut dyn Reflect {
		self
	}

	fn len(&self) -> usize {
		BTreeMap::len(self)
	}

	reflect_common!();
}
