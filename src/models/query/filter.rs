//! Filter predicates for source queries.
//!
//! A [`Filter`] constrains a single record field. Filters are grouped per field in
//! [`Filters`], which keeps insertion order so that encoding is deterministic.

use serde::{
	de::{self, MapAccess, Visitor},
	ser::SerializeMap,
	Deserialize, Deserializer, Serialize, Serializer,
};
use std::{fmt, marker::PhantomData};

use crate::models::SourceResource;

/// A field a source accepts in filters, sort keys and group keys.
///
/// Implemented by the per-source field enums generated with `filter_fields!`.
/// `chain_id` is never part of a field set since the chain is selected by the
/// call itself.
pub trait FilterField:
	Copy + Eq + fmt::Debug + fmt::Display + Send + Sync + Serialize + for<'de> Deserialize<'de> + 'static
{
	/// The resource this field set belongs to
	const RESOURCE: SourceResource;

	/// Every field in declaration order
	const ALL: &'static [Self];

	/// The wire name of the field
	fn as_str(&self) -> &'static str;

	/// Looks a field up by its wire name
	fn from_name(name: &str) -> Option<Self> {
		Self::ALL.iter().copied().find(|field| field.as_str() == name)
	}
}

/// Declares a field enum and its [`FilterField`] implementation.
macro_rules! filter_fields {
	(
		$(#[$meta:meta])*
		$vis:vis enum $name:ident for $resource:path {
			$($variant:ident => $wire:literal),+ $(,)?
		}
	) => {
		$(#[$meta])*
		#[derive(
			Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize,
		)]
		$vis enum $name {
			$(
				#[serde(rename = $wire)]
				$variant,
			)+
		}

		impl $crate::models::FilterField for $name {
			const RESOURCE: $crate::models::SourceResource = $resource;
			const ALL: &'static [Self] = &[$(Self::$variant),+];

			fn as_str(&self) -> &'static str {
				match self {
					$(Self::$variant => $wire,)+
				}
			}
		}

		impl ::std::fmt::Display for $name {
			fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
				f.write_str($crate::models::FilterField::as_str(self))
			}
		}
	};
}

pub(crate) use filter_fields;

/// Operators understood by the remote service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperator {
	Gte,
	Gt,
	Lte,
	Lt,
	Ne,
	In,
}

impl FilterOperator {
	/// The suffix appended to the `filter_<field>` parameter name
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Gte => "gte",
			Self::Gt => "gt",
			Self::Lte => "lte",
			Self::Lt => "lt",
			Self::Ne => "ne",
			Self::In => "in",
		}
	}
}

impl fmt::Display for FilterOperator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Single-valued operators, i.e. every operator except `in`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOperator {
	Gte,
	Gt,
	Lte,
	Lt,
	Ne,
}

impl From<ComparisonOperator> for FilterOperator {
	fn from(operator: ComparisonOperator) -> Self {
		match operator {
			ComparisonOperator::Gte => Self::Gte,
			ComparisonOperator::Gt => Self::Gt,
			ComparisonOperator::Lte => Self::Lte,
			ComparisonOperator::Lt => Self::Lt,
			ComparisonOperator::Ne => Self::Ne,
		}
	}
}

impl TryFrom<FilterOperator> for ComparisonOperator {
	type Error = FilterOperator;

	fn try_from(operator: FilterOperator) -> Result<Self, Self::Error> {
		match operator {
			FilterOperator::Gte => Ok(Self::Gte),
			FilterOperator::Gt => Ok(Self::Gt),
			FilterOperator::Lte => Ok(Self::Lte),
			FilterOperator::Lt => Ok(Self::Lt),
			FilterOperator::Ne => Ok(Self::Ne),
			FilterOperator::In => Err(operator),
		}
	}
}

/// A scalar filter value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
	Bool(bool),
	Number(serde_json::Number),
	String(String),
}

impl fmt::Display for FilterValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Bool(value) => write!(f, "{}", value),
			Self::Number(value) => write!(f, "{}", value),
			Self::String(value) => f.write_str(value),
		}
	}
}

impl From<bool> for FilterValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<&str> for FilterValue {
	fn from(value: &str) -> Self {
		Self::String(value.to_string())
	}
}

impl From<String> for FilterValue {
	fn from(value: String) -> Self {
		Self::String(value)
	}
}

macro_rules! impl_from_integer {
	($($ty:ty),+) => {
		$(
			impl From<$ty> for FilterValue {
				fn from(value: $ty) -> Self {
					Self::Number(serde_json::Number::from(value))
				}
			}
		)+
	};
}

impl_from_integer!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

/// Non-finite values have no JSON number form and are kept as their text
impl From<f64> for FilterValue {
	fn from(value: f64) -> Self {
		serde_json::Number::from_f64(value)
			.map(Self::Number)
			.unwrap_or_else(|| Self::String(value.to_string()))
	}
}

/// A predicate on one record field
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
	/// The field equals the value
	Equals(FilterValue),
	/// The field compares to the value with a single-valued operator
	Compare(ComparisonOperator, FilterValue),
	/// The field is one of the values
	In(Vec<FilterValue>),
}

impl Filter {
	pub fn equals(value: impl Into<FilterValue>) -> Self {
		Self::Equals(value.into())
	}

	pub fn gte(value: impl Into<FilterValue>) -> Self {
		Self::Compare(ComparisonOperator::Gte, value.into())
	}

	pub fn gt(value: impl Into<FilterValue>) -> Self {
		Self::Compare(ComparisonOperator::Gt, value.into())
	}

	pub fn lte(value: impl Into<FilterValue>) -> Self {
		Self::Compare(ComparisonOperator::Lte, value.into())
	}

	pub fn lt(value: impl Into<FilterValue>) -> Self {
		Self::Compare(ComparisonOperator::Lt, value.into())
	}

	pub fn ne(value: impl Into<FilterValue>) -> Self {
		Self::Compare(ComparisonOperator::Ne, value.into())
	}

	pub fn one_of<I, V>(values: I) -> Self
	where
		I: IntoIterator<Item = V>,
		V: Into<FilterValue>,
	{
		Self::In(values.into_iter().map(Into::into).collect())
	}

	/// The operator qualifying this filter, if any
	pub fn operator(&self) -> Option<FilterOperator> {
		match self {
			Self::Equals(_) => None,
			Self::Compare(operator, _) => Some((*operator).into()),
			Self::In(_) => Some(FilterOperator::In),
		}
	}

	/// The wire value: the scalar itself, or `in` values joined by commas
	pub fn wire_value(&self) -> String {
		match self {
			Self::Equals(value) | Self::Compare(_, value) => value.to_string(),
			Self::In(values) => values
				.iter()
				.map(ToString::to_string)
				.collect::<Vec<_>>()
				.join(","),
		}
	}
}

impl From<FilterValue> for Filter {
	fn from(value: FilterValue) -> Self {
		Self::Equals(value)
	}
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum OperandRepr {
	Many(Vec<FilterValue>),
	One(FilterValue),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum FilterRepr {
	Scalar(FilterValue),
	Operator {
		operator: FilterOperator,
		value: OperandRepr,
	},
}

impl Serialize for Filter {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let repr = match self {
			Self::Equals(value) => FilterRepr::Scalar(value.clone()),
			Self::Compare(operator, value) => FilterRepr::Operator {
				operator: (*operator).into(),
				value: OperandRepr::One(value.clone()),
			},
			Self::In(values) => FilterRepr::Operator {
				operator: FilterOperator::In,
				value: OperandRepr::Many(values.clone()),
			},
		};
		repr.serialize(serializer)
	}
}

impl<'de> Deserialize<'de> for Filter {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		match FilterRepr::deserialize(deserializer)? {
			FilterRepr::Scalar(value) => Ok(Self::Equals(value)),
			FilterRepr::Operator {
				operator: FilterOperator::In,
				value,
			} => Ok(match value {
				OperandRepr::Many(values) => Self::In(values),
				OperandRepr::One(value) => Self::In(vec![value]),
			}),
			FilterRepr::Operator { operator, value } => {
				let operator = ComparisonOperator::try_from(operator)
					.map_err(|op| {
						<D::Error as de::Error>::custom(format!("unexpected operator {}", op))
					})?;
				match value {
					OperandRepr::One(value) => Ok(Self::Compare(operator, value)),
					OperandRepr::Many(_) => Err(de::Error::custom(format!(
						"operator {} takes a single value",
						FilterOperator::from(operator)
					))),
				}
			}
		}
	}
}

/// One filter or several filters combined with AND, all on the same field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldFilter {
	All(Vec<Filter>),
	One(Filter),
}

impl FieldFilter {
	/// The filters for the field as a slice
	pub fn as_slice(&self) -> &[Filter] {
		match self {
			Self::One(filter) => std::slice::from_ref(filter),
			Self::All(filters) => filters,
		}
	}

	fn push(&mut self, filter: Filter) {
		match self {
			Self::All(filters) => filters.push(filter),
			Self::One(existing) => {
				let first = existing.clone();
				*self = Self::All(vec![first, filter]);
			}
		}
	}
}

impl From<Filter> for FieldFilter {
	fn from(filter: Filter) -> Self {
		Self::One(filter)
	}
}

impl From<Vec<Filter>> for FieldFilter {
	fn from(filters: Vec<Filter>) -> Self {
		Self::All(filters)
	}
}

/// Filters keyed by field, in insertion order
#[derive(Debug, Clone, PartialEq)]
pub struct Filters<F> {
	entries: Vec<(F, FieldFilter)>,
}

impl<F> Default for Filters<F> {
	fn default() -> Self {
		Self {
			entries: Vec::new(),
		}
	}
}

impl<F: FilterField> Filters<F> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the filter for `field`, replacing any filter already set on it
	pub fn with(mut self, field: F, filter: impl Into<FieldFilter>) -> Self {
		self.insert(field, filter);
		self
	}

	/// Adds a predicate to `field`, keeping the predicates already set on it
	pub fn and(mut self, field: F, filter: impl Into<Filter>) -> Self {
		self.push(field, filter);
		self
	}

	/// Sets the filter for `field`, returning the one it replaced
	pub fn insert(&mut self, field: F, filter: impl Into<FieldFilter>) -> Option<FieldFilter> {
		let filter = filter.into();
		match self.entries.iter_mut().find(|(f, _)| *f == field) {
			Some((_, existing)) => Some(std::mem::replace(existing, filter)),
			None => {
				self.entries.push((field, filter));
				None
			}
		}
	}

	/// Appends a predicate to `field`
	pub fn push(&mut self, field: F, filter: impl Into<Filter>) {
		let filter = filter.into();
		match self.entries.iter_mut().find(|(f, _)| *f == field) {
			Some((_, existing)) => existing.push(filter),
			None => self.entries.push((field, FieldFilter::One(filter))),
		}
	}

	pub fn get(&self, field: F) -> Option<&FieldFilter> {
		self.entries
			.iter()
			.find(|(f, _)| *f == field)
			.map(|(_, filter)| filter)
	}

	pub fn iter(&self) -> impl Iterator<Item = (F, &FieldFilter)> {
		self.entries.iter().map(|(field, filter)| (*field, filter))
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl<F: FilterField, T: Into<FieldFilter>> FromIterator<(F, T)> for Filters<F> {
	fn from_iter<I: IntoIterator<Item = (F, T)>>(iter: I) -> Self {
		let mut filters = Self::new();
		for (field, filter) in iter {
			filters.insert(field, filter);
		}
		filters
	}
}

impl<F: FilterField> Serialize for Filters<F> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut map = serializer.serialize_map(Some(self.entries.len()))?;
		for (field, filter) in &self.entries {
			map.serialize_entry(field.as_str(), filter)?;
		}
		map.end()
	}
}

struct FiltersVisitor<F>(PhantomData<F>);

impl<'de, F: FilterField> Visitor<'de> for FiltersVisitor<F> {
	type Value = Filters<F>;

	fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
		write!(formatter, "a map of {} fields to filters", F::RESOURCE)
	}

	fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
		let mut filters = Filters::new();
		while let Some(name) = access.next_key::<String>()? {
			let field = F::from_name(&name).ok_or_else(|| {
				<A::Error as de::Error>::custom(format!(
					"unknown {} field `{}`",
					F::RESOURCE,
					name
				))
			})?;
			let filter: FieldFilter = access.next_value()?;
			filters.insert(field, filter);
		}
		Ok(filters)
	}
}

impl<'de, F: FilterField> Deserialize<'de> for Filters<F> {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		deserializer.deserialize_map(FiltersVisitor(PhantomData))
	}
}
