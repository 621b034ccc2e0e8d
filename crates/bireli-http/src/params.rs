//! Ordered route parameters.
//!
//! Route parameters keep their insertion order because the direct-route
//! fallback interprets the *first* parameter as the controller segment.
//! A plain map would lose that ordering.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ordered mapping of parameter name to value, as bound by the router.
///
/// Values are JSON values rather than strings: the router marks an absent
/// action segment with the integer `1`, and applications may bind numbers
/// directly.
///
/// # Examples
///
/// ```
/// use bireli_http::RouteParams;
/// use serde_json::json;
///
/// let mut params = RouteParams::new();
/// params.insert("blog", json!("show"));
/// params.insert("id", json!("42"));
///
/// assert_eq!(params.first(), Some(("blog", &json!("show"))));
/// assert_eq!(params.get_str("id"), Some("42"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteParams(Vec<(String, Value)>);

impl RouteParams {
	/// Create an empty parameter list
	pub fn new() -> Self {
		Self(Vec::new())
	}

	/// Bind a parameter, replacing any existing value for the same name
	/// while keeping its original position
	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
		let name = name.into();
		let value = value.into();
		if let Some(slot) = self.0.iter_mut().find(|(k, _)| *k == name) {
			slot.1 = value;
		} else {
			self.0.push((name, value));
		}
	}

	/// Look up a parameter by name
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.0.iter().find(|(k, _)| k == name).map(|(_, v)| v)
	}

	/// Look up a parameter by name as a string slice
	///
	/// Returns `None` when the parameter is absent or not a JSON string.
	pub fn get_str(&self, name: &str) -> Option<&str> {
		self.get(name).and_then(Value::as_str)
	}

	/// The first bound parameter, in insertion order
	pub fn first(&self) -> Option<(&str, &Value)> {
		self.0.first().map(|(k, v)| (k.as_str(), v))
	}

	/// A copy of this list with the named parameter removed
	pub fn without(&self, name: &str) -> Self {
		Self(self.0.iter().filter(|(k, _)| k != name).cloned().collect())
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterate over parameters in insertion order
	pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.0.iter().map(|(k, v)| (k.as_str(), v))
	}
}

impl From<Vec<(String, Value)>> for RouteParams {
	fn from(entries: Vec<(String, Value)>) -> Self {
		let mut params = Self::new();
		for (name, value) in entries {
			params.insert(name, value);
		}
		params
	}
}

impl FromIterator<(String, Value)> for RouteParams {
	fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
		let mut params = Self::new();
		for (name, value) in iter {
			params.insert(name, value);
		}
		params
	}
}

impl IntoIterator for RouteParams {
	type Item = (String, Value);
	type IntoIter = std::vec::IntoIter<(String, Value)>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_insert_preserves_order() {
		let mut params = RouteParams::new();
		params.insert("blog", json!("show"));
		params.insert("id", json!("42"));
		params.insert("page", json!(3));

		let names: Vec<&str> = params.iter().map(|(k, _)| k).collect();
		assert_eq!(names, vec!["blog", "id", "page"]);
	}

	#[test]
	fn test_insert_replaces_in_place() {
		let mut params = RouteParams::new();
		params.insert("blog", json!(1));
		params.insert("id", json!("42"));
		params.insert("blog", json!("show"));

		assert_eq!(params.len(), 2);
		assert_eq!(params.first(), Some(("blog", &json!("show"))));
	}

	#[test]
	fn test_without_keeps_remaining_order() {
		let mut params = RouteParams::new();
		params.insert("blog", json!("show"));
		params.insert("id", json!("42"));
		params.insert("page", json!("2"));

		let rest = params.without("blog");
		let names: Vec<&str> = rest.iter().map(|(k, _)| k).collect();
		assert_eq!(names, vec!["id", "page"]);
		assert_eq!(params.len(), 3);
	}

	#[test]
	fn test_get_str_rejects_non_strings() {
		let mut params = RouteParams::new();
		params.insert("page", json!(3));

		assert_eq!(params.get_str("page"), None);
		assert_eq!(params.get("page"), Some(&json!(3)));
	}
}
