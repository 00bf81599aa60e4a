//! Events source.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::instrument;

use crate::{
	models::{
		AggregationQueryOptions, Event, EventFilterField, QueryOptions, SourceAggregatedResponse,
		SourceConfig, SourceResource, SourceResponse,
	},
	services::source::{BaseSource, SourceClient, SourceError},
};

/// Source of contract events.
///
/// Usually obtained through [`crate::services::source::Source::events`].
#[derive(Debug, Clone)]
pub struct EventsSource {
	base: BaseSource<EventFilterField, Event>,
}

impl EventsSource {
	const RESOURCE: SourceResource = SourceResource::Events;

	pub fn new(client: Client, config: Arc<SourceConfig>) -> Self {
		Self {
			base: BaseSource::new(client, config),
		}
	}
}

#[async_trait]
impl SourceClient for EventsSource {
	type Field = EventFilterField;
	type Record = Event;

	#[instrument(skip(self, options), fields(resource = "events"))]
	async fn get(
		&self,
		chain_id: &str,
		options: Option<&QueryOptions<EventFilterField>>,
	) -> Result<SourceResponse<Event>, SourceError> {
		let query_params = self.base.convert_to_query_params(options);
		self.base
			.fetch(chain_id, Self::RESOURCE, &query_params)
			.await
	}

	#[instrument(skip(self, options), fields(resource = "events"))]
	async fn get_aggregated<T>(
		&self,
		chain_id: &str,
		options: Option<&AggregationQueryOptions<EventFilterField>>,
	) -> Result<SourceAggregatedResponse<T>, SourceError>
	where
		T: DeserializeOwned + Send + 'static,
	{
		let query_params = self.base.convert_to_query_params(options);
		self.base
			.fetch(chain_id, Self::RESOURCE, &query_params)
			.await
	}
}
