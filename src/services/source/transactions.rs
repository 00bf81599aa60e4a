//! Transactions source.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::instrument;

use crate::{
	models::{
		AggregationQueryOptions, QueryOptions, SourceAggregatedResponse, SourceConfig,
		SourceResource, SourceResponse, Transaction, TransactionFilterField,
	},
	services::source::{BaseSource, SourceClient, SourceError},
};

/// Source of indexed transactions.
///
/// Usually obtained through [`crate::services::source::Source::transactions`].
#[derive(Debug, Clone)]
pub struct TransactionsSource {
	base: BaseSource<TransactionFilterField, Transaction>,
}

impl TransactionsSource {
	const RESOURCE: SourceResource = SourceResource::Transactions;

	pub fn new(client: Client, config: Arc<SourceConfig>) -> Self {
		Self {
			base: BaseSource::new(client, config),
		}
	}
}

#[async_trait]
impl SourceClient for TransactionsSource {
	type Field = TransactionFilterField;
	type Record = Transaction;

	#[instrument(skip(self, options), fields(resource = "transactions"))]
	async fn get(
		&self,
		chain_id: &str,
		options: Option<&QueryOptions<TransactionFilterField>>,
	) -> Result<SourceResponse<Transaction>, SourceError> {
		let query_params = self.base.convert_to_query_params(options);
		self.base
			.fetch(chain_id, Self::RESOURCE, &query_params)
			.await
	}

	#[instrument(skip(self, options), fields(resource = "transactions"))]
	async fn get_aggregated<T>(
		&self,
		chain_id: &str,
		options: Option<&AggregationQueryOptions<TransactionFilterField>>,
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
