//! Bind the fields of a record to command-line flags.
//!
//! [`recursive`] walks a value deriving [`Reflect`] and returns one [`Value`]
//! per bindable position. Each node renders its current value as text and
//! parses text back into the root, so it can back any flag parser.

extern crate self as jsonflag;

/// Reflection, codecs, discovery and naming.
pub mod flag;

#[doc(hidden)]
pub mod rt;

/// Derive structural reflection for a record with named fields.
pub use jsonflag_derive::Reflect;
pub use flag::{
	Codec, FieldInfo, Filter, FilterResult, FlagError, Reflect, Result, Value, dash_case, filter, json_camel_case, json_name, name, new, recursive,
	snake_case, usage,
};
