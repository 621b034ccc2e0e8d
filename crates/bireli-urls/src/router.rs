//! Route rules and the default router.

use crate::pattern::{PathPattern, PatternError};
use crate::route::Route;
use bireli_http::{Request, RouteParams};
use serde_json::Value;
use thiserror::Error;

/// Router trait - matches a request to a configured route
pub trait Router: Send + Sync {
	/// Match a request against the configured rules.
	///
	/// Returns `None` when no rule matches; callers may then fall back to
	/// convention-based resolution (see the dispatch core's direct-route
	/// fallback).
	fn resolve(&self, request: &Request) -> Option<Route>;
}

/// Reverse-lookup failures
#[derive(Debug, Error, PartialEq)]
pub enum ReverseError {
	#[error("no route named '{0}'")]
	UnknownName(String),

	#[error("route '{route}' needs parameter '{param}'")]
	MissingParam { route: String, param: String },
}

/// A named routing rule binding a URL pattern to a controller/action pair
pub struct UrlRule {
	name: Option<String>,
	pattern: PathPattern,
	controller: String,
	action: String,
	defaults: RouteParams,
}

impl UrlRule {
	/// Create a rule from a pattern string
	///
	/// # Examples
	///
	/// ```
	/// use bireli_urls::UrlRule;
	///
	/// let rule = UrlRule::new("/blog/{id}/", "blog", "show")
	///     .unwrap()
	///     .with_name("blog-detail");
	/// ```
	pub fn new(
		pattern: impl Into<String>,
		controller: impl Into<String>,
		action: impl Into<String>,
	) -> Result<Self, PatternError> {
		Ok(Self {
			name: None,
			pattern: PathPattern::parse(pattern)?,
			controller: controller.into(),
			action: action.into(),
			defaults: RouteParams::new(),
		})
	}

	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	/// Bind a default parameter, overridden by captured path segments of
	/// the same name
	pub fn with_default(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
		self.defaults.insert(name, value);
		self
	}
}

/// Default router implementation: first matching rule wins
#[derive(Default)]
pub struct DefaultRouter {
	rules: Vec<UrlRule>,
}

impl DefaultRouter {
	/// Create a router with no rules
	pub fn new() -> Self {
		Self::default()
	}

	/// Append a rule; rules are tried in insertion order
	pub fn add_rule(&mut self, rule: UrlRule) {
		self.rules.push(rule);
	}

	pub fn rule_count(&self) -> usize {
		self.rules.len()
	}

	/// Reverse a route name back to a concrete path
	///
	/// # Examples
	///
	/// ```
	/// use bireli_urls::{DefaultRouter, UrlRule};
	/// use bireli_http::RouteParams;
	/// use serde_json::json;
	///
	/// let mut router = DefaultRouter::new();
	/// router.add_rule(
	///     UrlRule::new("/blog/{id}/", "blog", "show").unwrap().with_name("blog-detail"),
	/// );
	///
	/// let mut params = RouteParams::new();
	/// params.insert("id", json!("42"));
	/// assert_eq!(router.reverse("blog-detail", &params).unwrap(), "/blog/42/");
	/// ```
	pub fn reverse(&self, name: &str, params: &RouteParams) -> Result<String, ReverseError> {
		let rule = self
			.rules
			.iter()
			.find(|r| r.name.as_deref() == Some(name))
			.ok_or_else(|| ReverseError::UnknownName(name.to_string()))?;

		rule.pattern.fill(params).ok_or_else(|| {
			// Report the first unfillable parameter for the diagnostic
			let missing = rule
				.pattern
				.source()
				.split('/')
				.filter_map(|s| s.strip_prefix('{').and_then(|s| s.strip_suffix('}')))
				.find(|p| params.get(p).is_none())
				.unwrap_or("?")
				.to_string();
			ReverseError::MissingParam {
				route: name.to_string(),
				param: missing,
			}
		})
	}

	/// Parse raw positional path segments into ordered route parameters.
	///
	/// This is the shape the direct-route fallback consumes for
	/// convention-based URLs: the first segment names the controller, the
	/// second (when present) the action, and the remainder form key/value
	/// pairs. With no action segment the controller key is bound to the
	/// integer `1`, the marker for "no explicit action given". A trailing
	/// key without a value is bound to null.
	///
	/// # Examples
	///
	/// ```
	/// use bireli_urls::DefaultRouter;
	/// use serde_json::json;
	///
	/// let params = DefaultRouter::segment_params("/blog/show/id/42");
	/// assert_eq!(params.first(), Some(("blog", &json!("show"))));
	/// assert_eq!(params.get("id"), Some(&json!("42")));
	///
	/// let params = DefaultRouter::segment_params("/blog");
	/// assert_eq!(params.get("blog"), Some(&json!(1)));
	/// ```
	pub fn segment_params(path: &str) -> RouteParams {
		let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
		let mut params = RouteParams::new();

		let Some(controller) = segments.first() else {
			return params;
		};
		match segments.get(1) {
			Some(action) => params.insert(*controller, *action),
			None => params.insert(*controller, 1),
		}

		for pair in segments[2.min(segments.len())..].chunks(2) {
			match pair {
				[key, value] => params.insert(*key, *value),
				[key] => params.insert(*key, Value::Null),
				_ => {}
			}
		}

		params
	}
}

impl Router for DefaultRouter {
	fn resolve(&self, request: &Request) -> Option<Route> {
		let path = request.path();
		for rule in &self.rules {
			if let Some(captured) = rule.pattern.match_path(path) {
				let mut params = rule.defaults.clone();
				for (name, value) in captured {
					params.insert(name, value);
				}
				let mut route = Route::new(rule.controller.clone(), rule.action.clone())
					.with_pattern(rule.pattern.source())
					.with_params(params);
				route.name = rule.name.clone();
				return Some(route);
			}
		}
		None
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use hyper::Method;
	use rstest::rstest;
	use serde_json::json;

	fn request_for(path: &str) -> Request {
		Request::builder()
			.method(Method::GET)
			.uri(path)
			.build()
			.unwrap()
	}

	fn blog_router() -> DefaultRouter {
		let mut router = DefaultRouter::new();
		router.add_rule(
			UrlRule::new("/blog/", "blog", "index")
				.unwrap()
				.with_name("blog-index"),
		);
		router.add_rule(
			UrlRule::new("/blog/{id}/", "blog", "show")
				.unwrap()
				.with_name("blog-detail")
				.with_default("format", json!("html")),
		);
		router
	}

	#[test]
	fn test_resolve_first_match_wins() {
		let router = blog_router();

		let route = router.resolve(&request_for("/blog/")).unwrap();
		assert_eq!(route.action(), "index");

		let route = router.resolve(&request_for("/blog/42/")).unwrap();
		assert_eq!(route.action(), "show");
		assert_eq!(route.params().get_str("id"), Some("42"));
	}

	#[test]
	fn test_resolve_merges_defaults_under_captures() {
		let mut router = DefaultRouter::new();
		router.add_rule(
			UrlRule::new("/blog/{format}/", "blog", "index")
				.unwrap()
				.with_default("format", json!("html")),
		);

		let route = router.resolve(&request_for("/blog/json/")).unwrap();
		assert_eq!(route.params().get_str("format"), Some("json"));
	}

	#[test]
	fn test_resolve_unmatched_path() {
		let router = blog_router();
		assert!(router.resolve(&request_for("/admin/")).is_none());
	}

	#[test]
	fn test_reverse_unknown_name() {
		let router = blog_router();
		assert_eq!(
			router.reverse("nope", &RouteParams::new()),
			Err(ReverseError::UnknownName("nope".to_string()))
		);
	}

	#[test]
	fn test_reverse_missing_param() {
		let router = blog_router();
		assert_eq!(
			router.reverse("blog-detail", &RouteParams::new()),
			Err(ReverseError::MissingParam {
				route: "blog-detail".to_string(),
				param: "id".to_string(),
			})
		);
	}

	#[rstest]
	#[case("/", vec![])]
	#[case("/blog", vec![("blog", json!(1))])]
	#[case("/blog/show", vec![("blog", json!("show"))])]
	#[case("/blog/show/id/42", vec![("blog", json!("show")), ("id", json!("42"))])]
	#[case("/blog/show/id", vec![("blog", json!("show")), ("id", Value::Null)])]
	fn test_segment_params(#[case] path: &str, #[case] expected: Vec<(&str, Value)>) {
		let params = DefaultRouter::segment_params(path);

		let actual: Vec<(&str, &Value)> = params.iter().collect();
		let expected: Vec<(&str, &Value)> =
			expected.iter().map(|(k, v)| (*k, v)).collect();
		assert_eq!(actual, expected);
	}
}
