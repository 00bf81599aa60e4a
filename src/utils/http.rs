use reqwest::Client;
use std::time::Duration;

/// Configuration of the pooled HTTP client shared by the sources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpClientConfig {
	/// Maximum idle connections kept per host
	pub pool_max_idle_per_host: usize,
	/// How long an idle pooled connection is kept
	pub pool_idle_timeout: Duration,
	/// Bound on establishing a TCP/TLS connection; requests themselves are unbounded
	pub connect_timeout: Option<Duration>,
}

impl Default for HttpClientConfig {
	fn default() -> Self {
		Self {
			pool_max_idle_per_host: 10,
			pool_idle_timeout: Duration::from_secs(90),
			connect_timeout: Some(Duration::from_secs(10)),
		}
	}
}

/// Creates the HTTP client used for source requests.
///
/// The client carries no retry middleware: a failed request is reported to the
/// caller as is.
pub fn create_http_client(config: &HttpClientConfig) -> Result<Client, reqwest::Error> {
	let mut builder = Client::builder()
		.user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
		.pool_max_idle_per_host(config.pool_max_idle_per_host)
		.pool_idle_timeout(Some(config.pool_idle_timeout));

	if let Some(connect_timeout) = config.connect_timeout {
		builder = builder.connect_timeout(connect_timeout);
	}

	builder.build()
}
