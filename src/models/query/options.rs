//! Query options for plain and aggregated source queries.

use serde::{Deserialize, Deserializer, Serialize};

use crate::models::{FilterField, Filters};

/// Accepts either a single value or a list of values.
fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
	D: Deserializer<'de>,
	T: Deserialize<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum OneOrMany<T> {
		Many(Vec<T>),
		One(T),
	}

	Ok(match OneOrMany::deserialize(deserializer)? {
		OneOrMany::Many(values) => values,
		OneOrMany::One(value) => vec![value],
	})
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
	Asc,
	Desc,
}

impl SortDirection {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Asc => "asc",
			Self::Desc => "desc",
		}
	}
}

impl std::str::FromStr for SortDirection {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"asc" => Ok(Self::Asc),
			"desc" => Ok(Self::Desc),
			other => Err(format!("Invalid sort direction: '{}'", other)),
		}
	}
}

/// Sort key made of one or more fields sharing one direction.
///
/// Fields are evaluated left to right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "F: FilterField"))]
pub struct OrderBy<F> {
	#[serde(rename = "field", deserialize_with = "one_or_many")]
	pub fields: Vec<F>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub direction: Option<SortDirection>,
}

impl<F: FilterField> OrderBy<F> {
	pub fn new(fields: impl IntoIterator<Item = F>) -> Self {
		Self {
			fields: fields.into_iter().collect(),
			direction: None,
		}
	}

	pub fn asc(fields: impl IntoIterator<Item = F>) -> Self {
		Self::new(fields).direction(SortDirection::Asc)
	}

	pub fn desc(fields: impl IntoIterator<Item = F>) -> Self {
		Self::new(fields).direction(SortDirection::Desc)
	}

	pub fn direction(mut self, direction: SortDirection) -> Self {
		self.direction = Some(direction);
		self
	}
}

/// Page selection; absent values are left to the remote service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub page: Option<u64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub limit: Option<u64>,
}

/// Filters, ordering and pagination for a plain query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "F: FilterField"))]
pub struct QueryOptions<F: FilterField> {
	#[serde(default, skip_serializing_if = "Filters::is_empty")]
	pub filters: Filters<F>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub order_by: Option<OrderBy<F>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub pagination: Option<Pagination>,
}

impl<F: FilterField> Default for QueryOptions<F> {
	fn default() -> Self {
		Self {
			filters: Filters::default(),
			order_by: None,
			pagination: None,
		}
	}
}

impl<F: FilterField> QueryOptions<F> {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn filters(mut self, filters: Filters<F>) -> Self {
		self.filters = filters;
		self
	}

	pub fn order_by(mut self, order_by: OrderBy<F>) -> Self {
		self.order_by = Some(order_by);
		self
	}

	pub fn pagination(mut self, pagination: Pagination) -> Self {
		self.pagination = Some(pagination);
		self
	}

	pub fn page(mut self, page: u64) -> Self {
		self.pagination.get_or_insert_with(Pagination::default).page = Some(page);
		self
	}

	pub fn limit(mut self, limit: u64) -> Self {
		self.pagination.get_or_insert_with(Pagination::default).limit = Some(limit);
		self
	}
}

/// A plain query extended with grouping and aggregation expressions.
///
/// Aggregation expressions such as `count()` or `sum(value)` are forwarded to the
/// remote service verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "F: FilterField"))]
pub struct AggregationQueryOptions<F: FilterField> {
	#[serde(flatten)]
	pub query: QueryOptions<F>,
	#[serde(
		default,
		deserialize_with = "one_or_many",
		skip_serializing_if = "Vec::is_empty"
	)]
	pub group_by: Vec<F>,
	#[serde(deserialize_with = "one_or_many")]
	pub aggregation: Vec<String>,
}

impl<F: FilterField> AggregationQueryOptions<F> {
	pub fn new<I, S>(aggregation: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			query: QueryOptions::default(),
			group_by: Vec::new(),
			aggregation: aggregation.into_iter().map(Into::into).collect(),
		}
	}

	pub fn query(mut self, query: QueryOptions<F>) -> Self {
		self.query = query;
		self
	}

	pub fn group_by(mut self, fields: impl IntoIterator<Item = F>) -> Self {
		self.group_by = fields.into_iter().collect();
		self
	}
}
