use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::flag::value::SharedRoot;
use crate::flag::{Def, FieldInfo, Filter, Reflect, Shape, Value, filter, name};

/// Build a node for `root` itself.
///
/// Returns `None` when the root's kind has no flag representation.
pub fn new<'a>(root: &'a mut dyn Reflect) -> Option<Value<'a>> {
	let shape = root.reflect_shape();
	let shared: SharedRoot<'a> = Rc::new(RefCell::new(root));
	Value::bind(shared, Vec::new(), Vec::new(), &shape)
}

/// Discover every bindable position of `root`, in pre-order and field declaration order.
///
/// The walk follows the static shape of the root type, so empty optional
/// records are still visited and nothing is allocated until a node is set.
/// All returned nodes share `root` and stay valid for as long as it is borrowed.
///
/// A self-referential record type needs a pruning filter such as
/// [`max_depth`](crate::flag::max_depth), otherwise the walk never ends.
pub fn recursive<'a>(root: &'a mut dyn Reflect, filters: &[&Filter<'_>]) -> Vec<Value<'a>> {
	let shape = root.reflect_shape();
	let mut walk = Walk {
		root: Rc::new(RefCell::new(root)),
		filters,
		index: Vec::new(),
		path: Vec::new(),
		found: Vec::new(),
	};
	walk.visit(&shape);
	walk.found
}

struct Walk<'a, 'f> {
	root: SharedRoot<'a>,
	filters: &'f [&'f Filter<'f>],
	index: Vec<usize>,
	path: Vec<FieldInfo>,
	found: Vec<Value<'a>>,
}

impl Walk<'_, '_> {
	fn visit(&mut self, shape: &Shape) {
		let value = Value::bind(Rc::clone(&self.root), self.index.clone(), self.path.clone(), shape);
		let verdict = filter(value.as_ref(), self.filters);
		let supported = value.is_some();
		let kind = value.as_ref().map_or("unsupported", |value| value.type_name());
		trace!(position = %name(&self.path), kind, ?verdict, "visit");

		if let Some(value) = value.filter(|_| !verdict.is_skip()) {
			self.found.push(value);
		}
		if verdict.is_no_descend() {
			if supported {
				debug!(position = %name(&self.path), "descent pruned by filter");
			}
			return;
		}

		let Def::Record(fields) = shape.clone().unwrap_pointers().def else {
			return;
		};
		for (position, field) in fields.into_iter().enumerate() {
			if !field.exported {
				continue;
			}
			let child = (field.shape)();
			self.index.push(position);
			self.path.push(field);
			self.visit(&child);
			self.index.pop();
			self.path.pop();
		}
	}
}
