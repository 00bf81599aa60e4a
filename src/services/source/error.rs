//! Source error types and handling.
//!
//! Every failure of a source call surfaces as a [`SourceError`]. Errors are never
//! retried or recovered from locally; they propagate unchanged to the caller.

use thiserror::Error;
use tracing::error;

use crate::models::{ConfigError, SourceResource};

/// Represents possible errors during source operations
#[derive(Debug, Error)]
pub enum SourceError {
	/// The remote service answered with a non-success status
	#[error("Data source returned non-success status {status}: {body}")]
	Transport {
		/// HTTP status code
		status: u16,
		/// Raw response body
		body: String,
	},

	/// The response body is not valid JSON of the expected shape
	#[error("Failed to parse data source response: {0}")]
	Parse(String),

	/// The request could not be sent or its body could not be read
	#[error("Request error: {0}")]
	Request(String),

	/// The request URL could not be built
	#[error("Invalid URL: {0}")]
	InvalidUrl(String),

	/// A field name is not part of the source's field set
	#[error("Unknown {resource} field `{field}`")]
	UnknownField {
		resource: SourceResource,
		field: String,
	},

	/// A query could not be built from its textual form
	#[error("Invalid query: {0}")]
	InvalidQuery(String),

	/// The source configuration is invalid
	#[error(transparent)]
	Config(#[from] ConfigError),
}

impl SourceError {
	/// Creates a new transport error with logging
	pub fn transport_error(status: u16, body: impl Into<String>) -> Self {
		let error = Self::Transport {
			status,
			body: body.into(),
		};
		error!("{}", error);
		error
	}

	/// Creates a new parse error with logging
	pub fn parse_error(msg: impl Into<String>) -> Self {
		let error = Self::Parse(msg.into());
		error!("{}", error);
		error
	}

	/// Creates a new request error with logging
	pub fn request_error(msg: impl Into<String>) -> Self {
		let error = Self::Request(msg.into());
		error!("{}", error);
		error
	}

	/// Creates a new invalid URL error with logging
	pub fn invalid_url(msg: impl Into<String>) -> Self {
		let error = Self::InvalidUrl(msg.into());
		error!("{}", error);
		error
	}

	/// Creates a new unknown field error with logging
	pub fn unknown_field(resource: SourceResource, field: impl Into<String>) -> Self {
		let error = Self::UnknownField {
			resource,
			field: field.into(),
		};
		error!("{}", error);
		error
	}

	/// Creates a new invalid query error with logging
	pub fn invalid_query(msg: impl Into<String>) -> Self {
		let error = Self::InvalidQuery(msg.into());
		error!("{}", error);
		error
	}

	/// The HTTP status of a transport error
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Transport { status, .. } => Some(*status),
			_ => None,
		}
	}
}

impl From<reqwest::Error> for SourceError {
	fn from(err: reqwest::Error) -> Self {
		if err.is_decode() {
			Self::parse_error(err.to_string())
		} else {
			Self::request_error(err.to_string())
		}
	}
}

impl From<serde_json::Error> for SourceError {
	fn from(err: serde_json::Error) -> Self {
		Self::parse_error(err.to_string())
	}
}
