//! Query model shared by every source.
//!
//! - `filter`: field predicates and the per-source field sets
//! - `options`: ordering, pagination and aggregation on top of filters

mod filter;
mod options;

pub(crate) use filter::filter_fields;
pub use filter::{
	ComparisonOperator, FieldFilter, Filter, FilterField, FilterOperator, FilterValue, Filters,
};
pub use options::{AggregationQueryOptions, OrderBy, Pagination, QueryOptions, SortDirection};
