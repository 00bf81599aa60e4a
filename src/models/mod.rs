//! Domain models and data structures for querying on-chain data.
//!
//! - `config`: Settings for reaching the remote indexing service
//! - `query`: Filters, ordering, pagination and aggregation options
//! - `source`: Event and transaction records and their response envelopes

mod config;
mod query;
mod source;

pub use config::{
	ConfigError, SecretString, SourceConfig, API_VERSION_VAR, CLIENT_ID_VAR,
	DEFAULT_API_VERSION, DEFAULT_HOST, DEFAULT_SCHEME, HOST_VAR, SCHEME_VAR,
};

pub use query::{
	AggregationQueryOptions, ComparisonOperator, FieldFilter, Filter, FilterField,
	FilterOperator, FilterValue, Filters, OrderBy, Pagination, QueryOptions, SortDirection,
};

pub use source::{
	Event, EventFilterField, SourceAggregatedResponse, SourceMeta, SourceResource,
	SourceResponse, Transaction, TransactionFilterField,
};
