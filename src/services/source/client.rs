//! Capability shared by every source.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::{
	models::{
		AggregationQueryOptions, FilterField, QueryOptions, SourceAggregatedResponse,
		SourceResponse,
	},
	services::source::SourceError,
};

/// A chain-scoped accessor over one category of on-chain records.
///
/// Every call issues exactly one request and returns exactly one page as reported
/// by the response `meta`. Calls are independent of each other and may run
/// concurrently.
#[async_trait]
pub trait SourceClient: Send + Sync {
	/// Fields this source can filter, sort and group on
	type Field: FilterField;

	/// Records returned by plain queries
	type Record: DeserializeOwned + Send;

	/// Fetches one page of records
	async fn get(
		&self,
		chain_id: &str,
		options: Option<&QueryOptions<Self::Field>>,
	) -> Result<SourceResponse<Self::Record>, SourceError>;

	/// Fetches aggregation results.
	///
	/// `T` describes the value of each labelled aggregate (or group key) and is
	/// independent of [`SourceClient::Record`].
	async fn get_aggregated<T>(
		&self,
		chain_id: &str,
		options: Option<&AggregationQueryOptions<Self::Field>>,
	) -> Result<SourceAggregatedResponse<T>, SourceError>
	where
		T: DeserializeOwned + Send + 'static;
}
