//! Matched route representation.

use bireli_http::RouteParams;

/// A matched routing rule plus its bound parameters.
///
/// Produced by the router (or synthesized by the direct-route fallback,
/// where `name` and `pattern` are advisory only) and read-only during
/// dispatch.
#[derive(Debug, Clone, Default)]
pub struct Route {
	pub name: Option<String>,
	pub pattern: String,
	controller: String,
	action: String,
	params: RouteParams,
}

impl Route {
	/// Create a route targeting a controller/action pair
	///
	/// # Examples
	///
	/// ```
	/// use bireli_urls::Route;
	///
	/// let route = Route::new("blog", "show").with_name("blog-detail");
	/// assert_eq!(route.controller(), "blog");
	/// assert_eq!(route.action(), "show");
	/// assert!(route.is_dispatchable());
	/// ```
	pub fn new(controller: impl Into<String>, action: impl Into<String>) -> Self {
		Self {
			name: None,
			pattern: String::new(),
			controller: controller.into(),
			action: action.into(),
			params: RouteParams::new(),
		}
	}

	/// Synthesize a route outside any configured rule, as the direct-route
	/// fallback does
	pub fn direct(
		controller: impl Into<String>,
		action: impl Into<String>,
		params: RouteParams,
	) -> Self {
		Self {
			name: None,
			pattern: String::new(),
			controller: controller.into(),
			action: action.into(),
			params,
		}
	}

	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
		self.pattern = pattern.into();
		self
	}

	pub fn with_params(mut self, params: RouteParams) -> Self {
		self.params = params;
		self
	}

	/// Controller identifier this route targets
	pub fn controller(&self) -> &str {
		&self.controller
	}

	/// Action identifier this route targets
	pub fn action(&self) -> &str {
		&self.action
	}

	/// Parameters bound by the match
	pub fn params(&self) -> &RouteParams {
		&self.params
	}

	/// A route is dispatchable only with non-empty controller and action
	/// identifiers
	pub fn is_dispatchable(&self) -> bool {
		!self.controller.is_empty() && !self.action.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_dispatchable_requires_both_identifiers() {
		assert!(Route::new("blog", "index").is_dispatchable());
		assert!(!Route::new("", "index").is_dispatchable());
		assert!(!Route::new("blog", "").is_dispatchable());
	}

	#[test]
	fn test_direct_route_carries_params() {
		let mut params = RouteParams::new();
		params.insert("id", json!("42"));

		let route = Route::direct("blog", "show", params);
		assert!(route.name.is_none());
		assert_eq!(route.params().get_str("id"), Some("42"));
	}
}
