//! Entry point bundling every source.

use reqwest::Client;
use std::sync::Arc;

use crate::{
	models::SourceConfig,
	services::source::{EventsSource, SourceError, TransactionsSource},
	utils::http::{create_http_client, HttpClientConfig},
};

/// Access to every data source through one value.
///
/// ```no_run
/// # async fn run() -> Result<(), insight_blueprint::services::source::SourceError> {
/// use insight_blueprint::{
/// 	models::{EventFilterField, Filter, Filters, OrderBy, QueryOptions, SourceConfig},
/// 	services::source::{Source, SourceClient},
/// };
///
/// let source = Source::new(SourceConfig::new("my-client-id"))?;
/// let options = QueryOptions::new()
/// 	.filters(Filters::new().with(EventFilterField::Address, Filter::equals("0xabc")))
/// 	.order_by(OrderBy::desc([EventFilterField::BlockTimestamp]))
/// 	.limit(10);
/// let events = source.events.get("1", Some(&options)).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Source {
	pub events: EventsSource,
	pub transactions: TransactionsSource,
}

impl Source {
	/// Validates `config` and creates sources sharing a default HTTP client
	pub fn new(config: SourceConfig) -> Result<Self, SourceError> {
		config.validate()?;
		let client = create_http_client(&HttpClientConfig::default())?;
		Ok(Self::with_client(config, client))
	}

	/// Creates sources from environment variables
	pub fn from_env() -> Result<Self, SourceError> {
		Self::new(SourceConfig::from_env()?)
	}

	/// Creates sources sharing `client`
	pub fn with_client(config: SourceConfig, client: Client) -> Self {
		let config = Arc::new(config);
		Self {
			events: EventsSource::new(client.clone(), config.clone()),
			transactions: TransactionsSource::new(client, config),
		}
	}
}
