use jsonflag::FlagError;
use thiserror::Error;

/// Result alias for the command-line front end.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors reported by `simplecurl`.
#[derive(Debug, Error)]
pub enum CliError {
	/// A flag value was rejected by its node.
	#[error("invalid value {input:?} for --{flag}: {source}")]
	InvalidFlag {
		/// Flag name without leading dashes.
		flag: String,
		/// Rejected text.
		input: String,
		/// Underlying parse failure.
		source: FlagError,
	},
	/// Output could not be encoded.
	#[error("failed to encode output: {0}")]
	Output(#[from] serde_json::Error),
}
