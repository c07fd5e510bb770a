/// Command-line error type.
pub mod error;
/// Generated clap arguments for discovered flag values.
pub mod flags;
/// Configuration record and the request built from it.
pub mod request;

pub use error::{CliError, Result};
