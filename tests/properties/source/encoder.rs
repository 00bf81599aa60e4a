use crate::properties::strategies::{event_field_strategy, query_options_strategy};

use insight_blueprint::{
	models::{AggregationQueryOptions, FilterField},
	services::source::{
		encode_aggregation_query, encode_query,
		encoder::{
			filter_param_name, AGGREGATE_PARAM, GROUP_BY_PARAM, LIMIT_PARAM, PAGE_PARAM,
			SORT_BY_PARAM, SORT_ORDER_PARAM,
		},
	},
};
use proptest::{prelude::*, test_runner::Config};

proptest! {
	#![proptest_config(Config {
		failure_persistence: None,
		..Config::default()
	})]

	#[test]
	fn test_encoding_is_deterministic(options in query_options_strategy()) {
		prop_assert_eq!(encode_query(&options), encode_query(&options));
	}

	#[test]
	fn test_every_predicate_is_encoded(options in query_options_strategy()) {
		let params = encode_query(&options);

		let mut expected: Vec<(String, Vec<String>)> = Vec::new();
		let mut predicates = 0;
		for (field, field_filter) in options.filters.iter() {
			for filter in field_filter.as_slice() {
				predicates += 1;
				let name = filter_param_name(field.as_str(), filter.operator());
				match expected.iter_mut().find(|(n, _)| *n == name) {
					Some((_, values)) => values.push(filter.wire_value()),
					None => expected.push((name, vec![filter.wire_value()])),
				}
			}
		}

		for (name, values) in &expected {
			prop_assert_eq!(params.get_all(name), values.as_slice());
		}
		let encoded_predicates = params
			.iter()
			.filter(|(name, _)| name.starts_with("filter_"))
			.count();
		prop_assert_eq!(encoded_predicates, predicates);
	}

	#[test]
	fn test_absent_facets_are_omitted(options in query_options_strategy()) {
		let params = encode_query(&options);
		let pagination = options.pagination.unwrap_or_default();

		prop_assert_eq!(params.contains(PAGE_PARAM), pagination.page.is_some());
		prop_assert_eq!(params.contains(LIMIT_PARAM), pagination.limit.is_some());
		prop_assert_eq!(params.contains(SORT_BY_PARAM), options.order_by.is_some());
		prop_assert_eq!(
			params.contains(SORT_ORDER_PARAM),
			options.order_by.as_ref().and_then(|o| o.direction).is_some()
		);
		prop_assert!(!params.contains(GROUP_BY_PARAM));
		prop_assert!(!params.contains(AGGREGATE_PARAM));
	}

	#[test]
	fn test_sort_key_keeps_field_order(options in query_options_strategy()) {
		let params = encode_query(&options);
		let fields: Vec<String> = options
			.order_by
			.iter()
			.flat_map(|order_by| order_by.fields.iter().map(|f| f.as_str().to_string()))
			.collect();

		prop_assert_eq!(params.get_all(SORT_BY_PARAM), fields.as_slice());
	}

	#[test]
	fn test_aggregation_extends_plain_encoding(
		options in query_options_strategy(),
		group_by in prop::collection::vec(event_field_strategy(), 0..3),
		aggregation in prop::collection::vec("(count|sum|avg)\\([a-z_]{0,8}\\)", 1..4),
	) {
		let plain: Vec<(String, String)> = encode_query(&options)
			.iter()
			.map(|(n, v)| (n.to_string(), v.to_string()))
			.collect();
		let aggregated_options = AggregationQueryOptions::new(aggregation.clone())
			.query(options)
			.group_by(group_by.clone());
		let aggregated: Vec<(String, String)> = encode_aggregation_query(&aggregated_options)
			.iter()
			.map(|(n, v)| (n.to_string(), v.to_string()))
			.collect();

		prop_assert_eq!(&aggregated[..plain.len()], plain.as_slice());

		let mut tail: Vec<(String, String)> = group_by
			.iter()
			.map(|f| (GROUP_BY_PARAM.to_string(), f.as_str().to_string()))
			.collect();
		tail.extend(aggregation.into_iter().map(|a| (AGGREGATE_PARAM.to_string(), a)));
		prop_assert_eq!(&aggregated[plain.len()..], tail.as_slice());
	}
}
