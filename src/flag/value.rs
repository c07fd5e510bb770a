use std::cell::{RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::flag::reflect::{locate, locate_mut};
use crate::flag::{BoxError, Codec, FieldInfo, FlagError, Reflect, Result, Shape, deref, deref_mut, name};

/// Caller-supplied rendering of a bound position.
pub type Encoder = Rc<dyn Fn(&dyn Reflect) -> std::result::Result<String, BoxError>>;

/// Caller-supplied parsing into a bound, pointer-resolved value.
pub type Decoder = Rc<dyn Fn(&str, &mut dyn Reflect) -> std::result::Result<(), BoxError>>;

/// Root value shared by every node discovered from it.
pub(crate) type SharedRoot<'a> = Rc<RefCell<&'a mut dyn Reflect>>;

/// One bindable position inside a root value, usable as a flag value.
///
/// A node stores the field index path from the root, so reading and writing
/// always act on the root's current storage. Nodes from the same discovery
/// share the root through a `RefCell`; reads and writes borrow it only for
/// the duration of the call.
///
/// The default node is detached: it renders as `""` and ignores every set.
#[derive(Clone, Default)]
pub struct Value<'a> {
	root: Option<SharedRoot<'a>>,
	index: Vec<usize>,
	path: Vec<FieldInfo>,
	codec: Option<Codec>,
	encoder: Option<Encoder>,
	decoder: Option<Decoder>,
}

impl<'a> Value<'a> {
	/// Bind a node; `None` when the position's shape has no codec.
	pub(crate) fn bind(root: SharedRoot<'a>, index: Vec<usize>, path: Vec<FieldInfo>, shape: &Shape) -> Option<Self> {
		let codec = Codec::for_shape(shape)?;
		Some(Self {
			root: Some(root),
			index,
			path,
			codec: Some(codec),
			encoder: None,
			decoder: None,
		})
	}

	/// Field descriptors from the root to this position. Empty for the root itself.
	pub fn path(&self) -> &[FieldInfo] {
		&self.path
	}

	/// Codec selected for this position, `None` when detached.
	pub fn codec(&self) -> Option<Codec> {
		self.codec
	}

	/// Kind label such as `int64`, `base64` or `JSON object`. Empty when detached.
	pub fn type_name(&self) -> &'static str {
		self.codec.map(Codec::label).unwrap_or("")
	}

	/// True when the position holds a boolean, so a bare flag means `true`.
	pub fn is_bool_flag(&self) -> bool {
		self.codec.is_some_and(Codec::is_bool)
	}

	/// Mutable access to the position, allocating empty pointers on the way
	/// and at the position itself.
	///
	/// `None` when detached or when the root is already borrowed.
	pub fn get(&self) -> Option<RefMut<'_, dyn Reflect + 'static>> {
		self.codec?;
		let guard = self.root.as_ref()?.try_borrow_mut().ok()?;
		RefMut::filter_map(guard, |root| {
			let position = locate_mut(&mut **root, &self.index)?;
			deref_mut(&mut *position);
			Some(position)
		})
		.ok()
	}

	/// Run `f` on the position downcast to `T`.
	///
	/// `T` is the declared type of the position, pointer wrappers included.
	pub fn with<T: Reflect, R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
		let mut target = self.get()?;
		target.as_any_mut().downcast_mut::<T>().map(f)
	}

	/// Render the position. Never allocates; an empty pointer on the path renders `""`.
	pub fn string(&self) -> String {
		let (Some(root), Some(codec)) = (&self.root, self.codec) else {
			return String::new();
		};
		let Ok(guard) = root.try_borrow() else {
			return String::new();
		};
		let Some(target) = locate(&**guard, &self.index) else {
			return String::new();
		};
		if let Some(encoder) = &self.encoder {
			return encoder(target).unwrap_or_default();
		}
		deref(target).map(|value| codec.render(value)).unwrap_or_default()
	}

	/// Parse `text` into the position.
	///
	/// Empty pointers on the way are allocated. On failure the position
	/// keeps its previous value; an optional leaf that was empty stays empty.
	pub fn set(&self, text: &str) -> Result<()> {
		let (Some(root), Some(codec)) = (&self.root, self.codec) else {
			return Ok(());
		};
		let mut guard = root.try_borrow_mut().map_err(|_| FlagError::Borrowed)?;
		let position = locate_mut(&mut **guard, &self.index).ok_or_else(|| FlagError::Unreachable { path: name(&self.path) })?;
		let was_empty = position.is_pointer() && position.pointee().is_none();

		let result = {
			let target = deref_mut(position);
			match &self.decoder {
				Some(decoder) => decoder(text, target).map_err(FlagError::Decode),
				None => codec.parse(target, text),
			}
		};

		if let Err(err) = &result {
			debug!(flag = %name(&self.path), input = text, error = %err, "flag value rejected");
			if was_empty {
				if let Some(position) = locate_mut(&mut **guard, &self.index) {
					position.clear_pointee();
				}
			}
		}
		result
	}

	/// Replace the rendering of this node. Ignored on a detached node.
	pub fn set_encoder(&mut self, encoder: impl Fn(&dyn Reflect) -> std::result::Result<String, BoxError> + 'static) {
		if self.root.is_some() {
			self.encoder = Some(Rc::new(encoder));
		}
	}

	/// Replace the parsing of this node. Ignored on a detached node.
	pub fn set_decoder(&mut self, decoder: impl Fn(&str, &mut dyn Reflect) -> std::result::Result<(), BoxError> + 'static) {
		if self.root.is_some() {
			self.decoder = Some(Rc::new(decoder));
		}
	}
}

impl fmt::Display for Value<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.string())
	}
}

impl fmt::Debug for Value<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Value")
			.field("path", &name(&self.path))
			.field("type", &self.type_name())
			.field("value", &self.string())
			.finish()
	}
}

#[cfg(test)]
mod tests;
