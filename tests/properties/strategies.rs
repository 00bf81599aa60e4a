use insight_blueprint::models::{
	ComparisonOperator, EventFilterField, FieldFilter, Filter, FilterField, FilterValue, Filters,
	OrderBy, Pagination, QueryOptions, SortDirection,
};
use proptest::{option, prelude::*};

const MAX_FILTERED_FIELDS: usize = 6;
const MAX_PREDICATES: usize = 3;
const MAX_IN_VALUES: usize = 5;

pub fn filter_value_strategy() -> impl Strategy<Value = FilterValue> {
	prop_oneof![
		any::<bool>().prop_map(FilterValue::from),
		any::<u64>().prop_map(FilterValue::from),
		any::<i64>().prop_map(FilterValue::from),
		"0x[a-f0-9]{1,40}".prop_map(FilterValue::from),
	]
}

pub fn comparison_operator_strategy() -> impl Strategy<Value = ComparisonOperator> {
	prop::sample::select(vec![
		ComparisonOperator::Gte,
		ComparisonOperator::Gt,
		ComparisonOperator::Lte,
		ComparisonOperator::Lt,
		ComparisonOperator::Ne,
	])
}

pub fn filter_strategy() -> impl Strategy<Value = Filter> {
	prop_oneof![
		filter_value_strategy().prop_map(Filter::Equals),
		(comparison_operator_strategy(), filter_value_strategy())
			.prop_map(|(operator, value)| Filter::Compare(operator, value)),
		prop::collection::vec(filter_value_strategy(), 1..MAX_IN_VALUES).prop_map(Filter::In),
	]
}

pub fn field_filter_strategy() -> impl Strategy<Value = FieldFilter> {
	prop_oneof![
		filter_strategy().prop_map(FieldFilter::One),
		prop::collection::vec(filter_strategy(), 1..MAX_PREDICATES).prop_map(FieldFilter::All),
	]
}

pub fn event_field_strategy() -> impl Strategy<Value = EventFilterField> {
	prop::sample::select(EventFilterField::ALL)
}

/// Filters on distinct fields
pub fn filters_strategy() -> impl Strategy<Value = Filters<EventFilterField>> {
	prop::sample::subsequence(EventFilterField::ALL, 0..MAX_FILTERED_FIELDS)
		.prop_flat_map(|fields| {
			let len = fields.len();
			(
				Just(fields),
				prop::collection::vec(field_filter_strategy(), len),
			)
		})
		.prop_map(|(fields, filters)| fields.into_iter().zip(filters).collect())
}

pub fn order_by_strategy() -> impl Strategy<Value = OrderBy<EventFilterField>> {
	(
		prop::collection::vec(event_field_strategy(), 1..4),
		option::of(prop::sample::select(vec![SortDirection::Asc, SortDirection::Desc])),
	)
		.prop_map(|(fields, direction)| OrderBy { fields, direction })
}

pub fn query_options_strategy() -> impl Strategy<Value = QueryOptions<EventFilterField>> {
	(
		filters_strategy(),
		option::of(order_by_strategy()),
		option::of((option::of(0u64..1000), option::of(1u64..1000))),
	)
		.prop_map(|(filters, order_by, pagination)| QueryOptions {
			filters,
			order_by,
			pagination: pagination.map(|(page, limit)| Pagination { page, limit }),
		})
}
