//! Parsing utilities
//!
//! This module parses the textual query forms accepted on the command line into
//! typed query options.
//!
//! Filter expressions take one of these forms:
//!
//! - `field=value`: equality
//! - `field:op=value` with `op` one of `gte`, `gt`, `lte`, `lt`, `ne`
//! - `field:in=a,b,c`: membership
//!
//! Values written as canonical integers are sent as numbers, `true` and `false` as booleans and
//! anything else as strings.

use crate::{
	models::{ComparisonOperator, Filter, FilterField, FilterOperator, FilterValue},
	services::source::SourceError,
};

/// Looks up `name` in the field set `F`
pub fn parse_field<F: FilterField>(name: &str) -> Result<F, SourceError> {
	let name = name.trim();
	F::from_name(name).ok_or_else(|| SourceError::unknown_field(F::RESOURCE, name))
}

/// Parses a comma-separated list of fields
pub fn parse_field_list<F: FilterField>(list: &str) -> Result<Vec<F>, SourceError> {
	list.split(',')
		.filter(|name| !name.trim().is_empty())
		.map(parse_field)
		.collect()
}

/// Parses a scalar filter value
pub fn parse_filter_value(raw: &str) -> FilterValue {
	match raw {
		"true" => FilterValue::Bool(true),
		"false" => FilterValue::Bool(false),
		// Only canonical integers become numbers; anything else is sent verbatim
		_ => match (raw.parse::<u64>(), raw.parse::<i64>()) {
			(Ok(value), _) if value.to_string() == raw => FilterValue::from(value),
			(_, Ok(value)) if value.to_string() == raw => FilterValue::from(value),
			_ => FilterValue::String(raw.to_string()),
		},
	}
}

fn parse_operator(raw: &str) -> Result<FilterOperator, SourceError> {
	match raw.trim().to_ascii_lowercase().as_str() {
		"gte" => Ok(FilterOperator::Gte),
		"gt" => Ok(FilterOperator::Gt),
		"lte" => Ok(FilterOperator::Lte),
		"lt" => Ok(FilterOperator::Lt),
		"ne" => Ok(FilterOperator::Ne),
		"in" => Ok(FilterOperator::In),
		other => Err(SourceError::invalid_query(format!(
			"unknown filter operator '{}'",
			other
		))),
	}
}

/// Parses a filter expression into the field it constrains and its predicate
pub fn parse_filter_expression<F: FilterField>(expr: &str) -> Result<(F, Filter), SourceError> {
	let (lhs, value) = expr.split_once('=').ok_or_else(|| {
		SourceError::invalid_query(format!(
			"filter '{}' must have the form field=value or field:op=value",
			expr
		))
	})?;

	let (field, operator) = match lhs.split_once(':') {
		Some((field, operator)) => (field, Some(parse_operator(operator)?)),
		None => (lhs, None),
	};
	let field = parse_field::<F>(field)?;

	if value.is_empty() {
		return Err(SourceError::invalid_query(format!(
			"filter '{}' has no value",
			expr
		)));
	}

	let filter = match operator {
		None => Filter::Equals(parse_filter_value(value)),
		Some(FilterOperator::In) => Filter::In(value.split(',').map(parse_filter_value).collect()),
		Some(operator) => match ComparisonOperator::try_from(operator) {
			Ok(operator) => Filter::Compare(operator, parse_filter_value(value)),
			Err(operator) => {
				return Err(SourceError::invalid_query(format!(
					"operator {} takes a list of values",
					operator
				)))
			}
		},
	};

	Ok((field, filter))
}
