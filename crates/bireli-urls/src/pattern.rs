//! Segment-based URL patterns.

use bireli_http::RouteParams;
use thiserror::Error;

/// Pattern parse failures
#[derive(Debug, Error, PartialEq)]
pub enum PatternError {
	#[error("empty parameter name in pattern '{0}'")]
	EmptyParam(String),

	#[error("unbalanced braces in pattern segment '{0}'")]
	UnbalancedBraces(String),
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
	Literal(String),
	Param(String),
}

/// A parsed URL pattern such as `/blog/{id}/`.
///
/// Patterns match segment-wise; `{name}` segments capture the
/// corresponding path segment as a route parameter. Trailing slashes are
/// not significant.
///
/// # Examples
///
/// ```
/// use bireli_urls::PathPattern;
///
/// let pattern = PathPattern::parse("/blog/{id}/").unwrap();
/// let params = pattern.match_path("/blog/42").unwrap();
/// assert_eq!(params.get_str("id"), Some("42"));
/// assert!(pattern.match_path("/blog/").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct PathPattern {
	source: String,
	segments: Vec<Segment>,
}

impl PathPattern {
	/// Parse a pattern string
	pub fn parse(source: impl Into<String>) -> Result<Self, PatternError> {
		let source = source.into();
		let mut segments = Vec::new();

		for raw in source.split('/').filter(|s| !s.is_empty()) {
			if let Some(name) = raw.strip_prefix('{') {
				let Some(name) = name.strip_suffix('}') else {
					return Err(PatternError::UnbalancedBraces(raw.to_string()));
				};
				if name.is_empty() {
					return Err(PatternError::EmptyParam(source.clone()));
				}
				segments.push(Segment::Param(name.to_string()));
			} else if raw.contains('{') || raw.contains('}') {
				return Err(PatternError::UnbalancedBraces(raw.to_string()));
			} else {
				segments.push(Segment::Literal(raw.to_string()));
			}
		}

		Ok(Self { source, segments })
	}

	/// The pattern string this was parsed from
	pub fn source(&self) -> &str {
		&self.source
	}

	/// Match a request path, capturing parameters in pattern order
	pub fn match_path(&self, path: &str) -> Option<RouteParams> {
		let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
		if parts.len() != self.segments.len() {
			return None;
		}

		let mut params = RouteParams::new();
		for (segment, part) in self.segments.iter().zip(&parts) {
			match segment {
				Segment::Literal(lit) => {
					if lit != part {
						return None;
					}
				}
				Segment::Param(name) => {
					params.insert(name.clone(), *part);
				}
			}
		}
		Some(params)
	}

	/// Rebuild a concrete path by substituting the named parameters
	///
	/// Returns `None` if a parameter the pattern needs is missing.
	pub fn fill(&self, params: &RouteParams) -> Option<String> {
		let mut path = String::new();
		for segment in &self.segments {
			path.push('/');
			match segment {
				Segment::Literal(lit) => path.push_str(lit),
				Segment::Param(name) => {
					let value = params.get(name)?;
					match value.as_str() {
						Some(s) => path.push_str(s),
						None => path.push_str(&value.to_string()),
					}
				}
			}
		}
		if path.is_empty() {
			path.push('/');
		} else if self.source.ends_with('/') {
			path.push('/');
		}
		Some(path)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("/blog/", "/blog", true)]
	#[case("/blog/", "/blog/", true)]
	#[case("/blog/", "/news/", false)]
	#[case("/blog/", "/blog/42", false)]
	fn test_literal_matching(#[case] pattern: &str, #[case] path: &str, #[case] matches: bool) {
		let pattern = PathPattern::parse(pattern).unwrap();
		assert_eq!(pattern.match_path(path).is_some(), matches);
	}

	#[test]
	fn test_captures_in_pattern_order() {
		let pattern = PathPattern::parse("/blog/{year}/{slug}/").unwrap();
		let params = pattern.match_path("/blog/2024/dispatch-loops/").unwrap();

		let names: Vec<&str> = params.iter().map(|(k, _)| k).collect();
		assert_eq!(names, vec!["year", "slug"]);
		assert_eq!(params.get_str("slug"), Some("dispatch-loops"));
	}

	#[test]
	fn test_fill_round_trips() {
		let pattern = PathPattern::parse("/blog/{id}/").unwrap();
		let params = pattern.match_path("/blog/42/").unwrap();

		assert_eq!(pattern.fill(&params), Some("/blog/42/".to_string()));
	}

	#[test]
	fn test_fill_missing_param() {
		let pattern = PathPattern::parse("/blog/{id}/").unwrap();

		assert_eq!(pattern.fill(&RouteParams::new()), None);
	}

	#[rstest]
	#[case("/blog/{}/")]
	#[case("/blog/{id/")]
	#[case("/blog/id}/")]
	fn test_rejects_malformed_patterns(#[case] source: &str) {
		assert!(PathPattern::parse(source).is_err());
	}
}
