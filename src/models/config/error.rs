//! Configuration error types.

use thiserror::Error;
use tracing::error;

/// Errors that can occur while loading or validating the source configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
	/// A required environment variable is not set
	#[error("Missing environment variable: {0}")]
	MissingVariable(String),

	/// A configuration value is invalid
	#[error("Validation error: {0}")]
	ValidationError(String),
}

impl ConfigError {
	/// Creates a new missing variable error with logging
	pub fn missing_variable(name: impl Into<String>) -> Self {
		let error = Self::MissingVariable(name.into());
		error!("{}", error);
		error
	}

	/// Creates a new validation error with logging
	pub fn validation_error(msg: impl Into<String>) -> Self {
		let error = Self::ValidationError(msg.into());
		error!("{}", error);
		error
	}
}
