use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, FlagError>;

/// Boxed error returned by caller-supplied encoders and decoders.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors produced while parsing flag text into bound values.
#[derive(Debug, Error)]
pub enum FlagError {
	/// Text does not lexically match the target kind.
	#[error("invalid {kind} literal {input:?}: {reason}")]
	Format {
		/// Kind label of the target value.
		kind: &'static str,
		/// Rejected input text.
		input: String,
		/// Short description of the syntax problem.
		reason: &'static str,
	},
	/// Text is well-formed but does not fit the target width.
	#[error("{kind} value {input:?} out of range")]
	Overflow {
		/// Kind label of the target value.
		kind: &'static str,
		/// Rejected input text.
		input: String,
	},
	/// Text is not valid standard base64.
	#[error("illegal base64 data: {0}")]
	Base64(#[from] base64::DecodeError),
	/// Text is not a valid JSON document for the target type.
	#[error("invalid JSON: {0}")]
	Json(#[from] serde_json::Error),
	/// Caller-supplied decoder failure, propagated unchanged.
	#[error(transparent)]
	Decode(BoxError),
	/// Bound position could not be reached through the root value.
	#[error("flag position {path} is not reachable from the bound root")]
	Unreachable {
		/// Dot-joined field names of the position.
		path: String,
	},
	/// Value does not support the requested operation for its shape.
	#[error("value of type {type_name} does not support this operation")]
	Unsupported {
		/// Rust type name of the value.
		type_name: &'static str,
	},
	/// Bound root is already borrowed through another flag value.
	#[error("bound root is already borrowed by another flag value")]
	Borrowed,
}

impl FlagError {
	/// True for syntax failures, including malformed base64 and JSON.
	pub fn is_format(&self) -> bool {
		matches!(self, Self::Format { .. } | Self::Base64(_) | Self::Json(_))
	}

	/// True when the text parsed but exceeded the target range.
	pub fn is_overflow(&self) -> bool {
		matches!(self, Self::Overflow { .. })
	}

	pub(crate) fn format(kind: &'static str, input: &str, reason: &'static str) -> Self {
		Self::Format {
			kind,
			input: input.to_owned(),
			reason,
		}
	}

	pub(crate) fn overflow(kind: &'static str, input: &str) -> Self {
		Self::Overflow {
			kind,
			input: input.to_owned(),
		}
	}
}
