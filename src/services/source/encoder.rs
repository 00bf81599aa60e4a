//! Query encoding.
//!
//! Turns [`QueryOptions`] and [`AggregationQueryOptions`] into the query-string
//! dialect of the remote service:
//!
//! - `filter_<field>` / `filter_<field>_<op>` per predicate, values of `in` joined by `,`
//! - `page`, `limit`
//! - `sort_by` (one entry per field), `sort_order`
//! - `group_by` (one entry per field), `aggregate` (one entry per expression)
//!
//! Facets that are absent produce no parameters. Encoding is pure: the same
//! options always produce the same parameters in the same order.

use crate::{
	models::{
		AggregationQueryOptions, FilterField, FilterOperator, Filters, OrderBy, Pagination,
		QueryOptions,
	},
	services::source::QueryParams,
};

pub const PAGE_PARAM: &str = "page";
pub const LIMIT_PARAM: &str = "limit";
pub const SORT_BY_PARAM: &str = "sort_by";
pub const SORT_ORDER_PARAM: &str = "sort_order";
pub const GROUP_BY_PARAM: &str = "group_by";
pub const AGGREGATE_PARAM: &str = "aggregate";

/// Options that can be encoded into query parameters for a source with field set `F`
pub trait EncodeQuery<F: FilterField> {
	fn encode_query(&self) -> QueryParams;
}

impl<F: FilterField> EncodeQuery<F> for QueryOptions<F> {
	fn encode_query(&self) -> QueryParams {
		encode_query(self)
	}
}

impl<F: FilterField> EncodeQuery<F> for AggregationQueryOptions<F> {
	fn encode_query(&self) -> QueryParams {
		encode_aggregation_query(self)
	}
}

/// Name of the parameter carrying a predicate on `field`
pub fn filter_param_name(field: &str, operator: Option<FilterOperator>) -> String {
	match operator {
		Some(operator) => format!("filter_{}_{}", field, operator),
		None => format!("filter_{}", field),
	}
}

/// Encodes a plain query
pub fn encode_query<F: FilterField>(options: &QueryOptions<F>) -> QueryParams {
	let mut params = QueryParams::new();
	encode_filters(&options.filters, &mut params);
	if let Some(pagination) = &options.pagination {
		encode_pagination(pagination, &mut params);
	}
	if let Some(order_by) = &options.order_by {
		encode_order_by(order_by, &mut params);
	}
	params
}

/// Encodes an aggregation query
pub fn encode_aggregation_query<F: FilterField>(options: &AggregationQueryOptions<F>) -> QueryParams {
	let mut params = encode_query(&options.query);
	params.set(
		GROUP_BY_PARAM,
		options.group_by.iter().map(|field| field.as_str()),
	);
	params.set(AGGREGATE_PARAM, options.aggregation.iter().map(String::as_str));
	params
}

/// Appends one parameter per predicate; predicates never overwrite each other
fn encode_filters<F: FilterField>(filters: &Filters<F>, params: &mut QueryParams) {
	for (field, field_filter) in filters.iter() {
		for filter in field_filter.as_slice() {
			params.append(
				filter_param_name(field.as_str(), filter.operator()),
				filter.wire_value(),
			);
		}
	}
}

fn encode_pagination(pagination: &Pagination, params: &mut QueryParams) {
	if let Some(page) = pagination.page {
		params.set(PAGE_PARAM, [page.to_string()]);
	}
	if let Some(limit) = pagination.limit {
		params.set(LIMIT_PARAM, [limit.to_string()]);
	}
}

fn encode_order_by<F: FilterField>(order_by: &OrderBy<F>, params: &mut QueryParams) {
	params.set(
		SORT_BY_PARAM,
		order_by.fields.iter().map(|field| field.as_str()),
	);
	if let Some(direction) = order_by.direction {
		params.set(SORT_ORDER_PARAM, [direction.as_str()]);
	}
}
