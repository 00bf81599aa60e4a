//! Shared HTTP dispatch for every source.
//!
//! [`BaseSource`] builds the request URL for a chain and resource, attaches the
//! encoded query parameters, issues a single GET and parses the JSON body.

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::{fmt, marker::PhantomData, sync::Arc, time::Instant};
use tracing::{debug, warn};
use url::Url;

use crate::{
	models::{FilterField, SourceConfig, SourceResource},
	services::source::{encoder::EncodeQuery, QueryParams, SourceError},
	utils::metrics::{SOURCE_REQUESTS_TOTAL, SOURCE_REQUEST_DURATION_SECONDS},
};

/// Common request handling parameterized by a field set `F` and record type `R`.
///
/// `F` and `R` only tie a concrete source to its filters and records at compile
/// time; nothing about them is checked at runtime.
pub struct BaseSource<F, R> {
	client: Client,
	config: Arc<SourceConfig>,
	_marker: PhantomData<fn() -> (F, R)>,
}

impl<F, R> Clone for BaseSource<F, R> {
	fn clone(&self) -> Self {
		Self {
			client: self.client.clone(),
			config: self.config.clone(),
			_marker: PhantomData,
		}
	}
}

impl<F, R> fmt::Debug for BaseSource<F, R> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("BaseSource")
			.field("config", &self.config)
			.finish_non_exhaustive()
	}
}

impl<F: FilterField, R: DeserializeOwned> BaseSource<F, R> {
	/// Creates a base source sharing `client` and `config`
	pub fn new(client: Client, config: Arc<SourceConfig>) -> Self {
		Self {
			client,
			config,
			_marker: PhantomData,
		}
	}

	pub fn config(&self) -> &SourceConfig {
		&self.config
	}

	/// Encodes options for this source; absent options encode to no parameters
	pub fn convert_to_query_params<O>(&self, options: Option<&O>) -> QueryParams
	where
		O: EncodeQuery<F>,
	{
		options.map(EncodeQuery::encode_query).unwrap_or_default()
	}

	/// Builds `<scheme>://<chain_id>.<host>/<api_version>/<client_id>/<resource>?<params>`
	pub fn build_url(
		&self,
		chain_id: &str,
		resource: SourceResource,
		query_params: &QueryParams,
	) -> Result<Url, SourceError> {
		if chain_id.is_empty()
			|| !chain_id
				.chars()
				.all(|c| c.is_ascii_alphanumeric() || c == '-')
		{
			return Err(SourceError::invalid_url(format!(
				"invalid chain id '{}'",
				chain_id
			)));
		}

		let base = format!("{}://{}.{}/", self.config.scheme, chain_id, self.config.host);
		let mut url = Url::parse(&base)
			.map_err(|e| SourceError::invalid_url(format!("{}: {}", base, e)))?;

		url.path_segments_mut()
			.map_err(|_| SourceError::invalid_url(format!("{} cannot be a base", base)))?
			.pop_if_empty()
			.extend([
				self.config.api_version.as_str(),
				self.config.client_id.as_str(),
				resource.as_str(),
			]);

		if !query_params.is_empty() {
			url.query_pairs_mut().extend_pairs(query_params.iter());
		}

		Ok(url)
	}

	/// Issues one GET for `resource` on `chain_id` and parses the JSON body as `T`
	pub async fn fetch<T>(
		&self,
		chain_id: &str,
		resource: SourceResource,
		query_params: &QueryParams,
	) -> Result<T, SourceError>
	where
		T: DeserializeOwned,
	{
		let url = self.build_url(chain_id, resource, query_params)?;

		debug!(
			resource = %resource,
			chain_id = chain_id,
			params = query_params.len(),
			"fetching from data source"
		);

		let started = Instant::now();
		let result = self.send(url).await;
		SOURCE_REQUEST_DURATION_SECONDS
			.with_label_values(&[resource.as_str()])
			.observe(started.elapsed().as_secs_f64());

		let outcome = match &result {
			Ok(_) => "success",
			Err(SourceError::Transport { .. }) => "transport_error",
			Err(SourceError::Parse(_)) => "parse_error",
			Err(_) => "request_error",
		};
		SOURCE_REQUESTS_TOTAL
			.with_label_values(&[resource.as_str(), outcome])
			.inc();

		result
	}

	async fn send<T: DeserializeOwned>(&self, url: Url) -> Result<T, SourceError> {
		let response = self
			.client
			.get(url)
			.send()
			.await
			.map_err(|e| SourceError::request_error(e.to_string()))?;

		let status = response.status();
		if !status.is_success() {
			let body = match response.text().await {
				Ok(body) => body,
				Err(e) => {
					warn!(status = status.as_u16(), error = %e, "failed to read error response body");
					format!("<unreadable body: {}>", e)
				}
			};
			return Err(SourceError::transport_error(status.as_u16(), body));
		}

		let body = response
			.bytes()
			.await
			.map_err(|e| SourceError::request_error(e.to_string()))?;

		Ok(serde_json::from_slice(&body)?)
	}
}
