//! Configuration for reaching the remote indexing service.
//!
//! The configuration is an explicit value handed to the sources at construction;
//! [`SourceConfig::from_env`] builds it from environment variables.

mod error;
mod secret;
mod source_config;

pub use error::ConfigError;
pub use secret::SecretString;
pub use source_config::{
	SourceConfig, API_VERSION_VAR, CLIENT_ID_VAR, DEFAULT_API_VERSION, DEFAULT_HOST,
	DEFAULT_SCHEME, HOST_VAR, SCHEME_VAR,
};
