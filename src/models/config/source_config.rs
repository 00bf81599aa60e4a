//! Connection settings for the remote indexing service.

use url::Url;

use super::{error::ConfigError, secret::SecretString};

/// Environment variable holding the client id
pub const CLIENT_ID_VAR: &str = "THIRDWEB_CLIENT_ID";
/// Environment variable overriding the service host
pub const HOST_VAR: &str = "INSIGHT_HOST";
/// Environment variable overriding the API version path segment
pub const API_VERSION_VAR: &str = "INSIGHT_API_VERSION";
/// Environment variable overriding the URL scheme
pub const SCHEME_VAR: &str = "INSIGHT_SCHEME";

pub const DEFAULT_HOST: &str = "insight.thirdweb.com";
pub const DEFAULT_API_VERSION: &str = "v1";
pub const DEFAULT_SCHEME: &str = "https";

/// Settings used to reach the remote service.
///
/// Requests go to `<scheme>://<chain_id>.<host>/<api_version>/<client_id>/<resource>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
	/// Client id authorizing requests, part of every request path
	pub client_id: SecretString,
	/// Service host; every chain is served from a `<chain_id>.` subdomain of it
	pub host: String,
	/// API version path segment
	pub api_version: String,
	/// URL scheme, `https` or `http`
	pub scheme: String,
}

impl SourceConfig {
	/// Creates a configuration for the public service with the given client id
	pub fn new(client_id: impl Into<SecretString>) -> Self {
		Self {
			client_id: client_id.into(),
			host: DEFAULT_HOST.to_string(),
			api_version: DEFAULT_API_VERSION.to_string(),
			scheme: DEFAULT_SCHEME.to_string(),
		}
	}

	pub fn with_host(mut self, host: impl Into<String>) -> Self {
		self.host = host.into();
		self
	}

	pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
		self.api_version = api_version.into();
		self
	}

	pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
		self.scheme = scheme.into();
		self
	}

	/// Loads the configuration from process environment variables
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Loads the configuration through `lookup`, which maps a variable name to its value
	pub fn from_lookup<L>(lookup: L) -> Result<Self, ConfigError>
	where
		L: Fn(&str) -> Option<String>,
	{
		let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

		let client_id =
			non_empty(CLIENT_ID_VAR).ok_or_else(|| ConfigError::missing_variable(CLIENT_ID_VAR))?;

		let mut config = Self::new(client_id);
		if let Some(host) = non_empty(HOST_VAR) {
			config.host = host;
		}
		if let Some(api_version) = non_empty(API_VERSION_VAR) {
			config.api_version = api_version;
		}
		if let Some(scheme) = non_empty(SCHEME_VAR) {
			config.scheme = scheme;
		}

		config.validate()?;
		Ok(config)
	}

	/// Checks that every value can be placed in a request URL
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.client_id.is_empty() {
			return Err(ConfigError::validation_error("client id must not be empty"));
		}
		if self.client_id.as_str().contains('/') {
			return Err(ConfigError::validation_error(
				"client id must not contain '/'",
			));
		}
		if self.host.is_empty() {
			return Err(ConfigError::validation_error("host must not be empty"));
		}
		if self.host.contains('/') {
			return Err(ConfigError::validation_error(format!(
				"host '{}' must not contain '/'",
				self.host
			)));
		}
		if self.api_version.is_empty() || self.api_version.contains('/') {
			return Err(ConfigError::validation_error(format!(
				"invalid API version '{}'",
				self.api_version
			)));
		}
		if !matches!(self.scheme.as_str(), "http" | "https") {
			return Err(ConfigError::validation_error(format!(
				"unsupported scheme '{}', expected http or https",
				self.scheme
			)));
		}
		// Placeholder chain id; only the host syntax is checked here
		if Url::parse(&format!("{}://0.{}/", self.scheme, self.host)).is_err() {
			return Err(ConfigError::validation_error(format!(
				"invalid host '{}'",
				self.host
			)));
		}
		Ok(())
	}
}
