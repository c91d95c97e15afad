//! Error types for configuration overrides.

use thiserror::Error;

/// Errors raised while applying a host variable to the configuration.
///
/// These never escape the resolver: the offending variable is logged and
/// ignored, leaving the lower layer in effect.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// A map key was not exactly one character.
	#[error("invalid trigger key {key:?} in {variable}: expected a single printable character")]
	InvalidKey {
		/// Variable the key was read from.
		variable: String,
		/// The rejected key.
		key: String,
	},

	/// A value had the right shape but an unusable content.
	#[error("invalid value for {variable}: {reason}")]
	InvalidValue {
		/// Variable the value was read from.
		variable: String,
		/// What was wrong with it.
		reason: String,
	},

	/// A value could not be deserialized into the expected shape.
	#[error("malformed {variable}: {source}")]
	Json {
		/// Variable the value was read from.
		variable: String,
		/// The underlying deserialization error.
		#[source]
		source: serde_json::Error,
	},
}

impl ConfigError {
	pub(crate) fn invalid(variable: &str, reason: impl Into<String>) -> Self {
		Self::InvalidValue {
			variable: variable.to_string(),
			reason: reason.into(),
		}
	}
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
