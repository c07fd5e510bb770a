pub mod base64_json;
mod codec;
mod error;
mod filter;
mod name;
mod recursive;
pub(crate) mod reflect;
/// Scalar text grammars shared by the codecs.
pub mod scalar;
mod value;

/// Text codec selection and container codecs.
pub use codec::Codec;
/// Error and result aliases.
pub use error::{BoxError, FlagError, Result};
/// Discovery filters and their combination.
pub use filter::{Filter, FilterResult, filter, max_depth, skip_records, skip_root};
/// Flag naming and help-text helpers.
pub use name::{dash_case, json_camel_case, json_name, name, snake_case, usage};
/// Discovery entry points.
pub use recursive::{new, recursive};
/// Structural reflection substrate.
pub use reflect::{Bindable, Def, FieldInfo, Reflect, ScalarKind, Shape, Tags, deref, deref_mut};
/// Binding node and its override hooks.
pub use value::{Decoder, Encoder, Value};
