//! Ordered multi-map of query-string parameters.

use url::form_urlencoded;

/// Query parameters in first-insertion order of their names.
///
/// A name maps to one or more values; on the wire each value becomes its own
/// `name=value` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
	entries: Vec<(String, Vec<String>)>,
}

impl QueryParams {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a value under `name`, after any values it already has
	pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
		let name = name.into();
		let value = value.into();
		match self.entries.iter_mut().find(|(n, _)| *n == name) {
			Some((_, values)) => values.push(value),
			None => self.entries.push((name, vec![value])),
		}
	}

	/// Replaces all values of `name`. An empty `values` removes the name.
	pub fn set<I, V>(&mut self, name: impl Into<String>, values: I)
	where
		I: IntoIterator<Item = V>,
		V: Into<String>,
	{
		let name = name.into();
		let values: Vec<String> = values.into_iter().map(Into::into).collect();
		let position = self.entries.iter().position(|(n, _)| *n == name);
		match (position, values.is_empty()) {
			(Some(index), true) => {
				self.entries.remove(index);
			}
			(Some(index), false) => self.entries[index].1 = values,
			(None, true) => {}
			(None, false) => self.entries.push((name, values)),
		}
	}

	/// The first value of `name`
	pub fn get(&self, name: &str) -> Option<&str> {
		self.get_all(name).first().map(String::as_str)
	}

	/// Every value of `name`, in insertion order
	pub fn get_all(&self, name: &str) -> &[String] {
		self.entries
			.iter()
			.find(|(n, _)| n == name)
			.map(|(_, values)| values.as_slice())
			.unwrap_or(&[])
	}

	pub fn contains(&self, name: &str) -> bool {
		self.entries.iter().any(|(n, _)| n == name)
	}

	/// Parameter names in order
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(|(name, _)| name.as_str())
	}

	/// Every `(name, value)` pair as it goes on the wire
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.entries.iter().flat_map(|(name, values)| {
			values
				.iter()
				.map(move |value| (name.as_str(), value.as_str()))
		})
	}

	/// Number of wire entries
	pub fn len(&self) -> usize {
		self.entries.iter().map(|(_, values)| values.len()).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// The `application/x-www-form-urlencoded` query string
	pub fn to_query_string(&self) -> String {
		form_urlencoded::Serializer::new(String::new())
			.extend_pairs(self.iter())
			.finish()
	}
}
