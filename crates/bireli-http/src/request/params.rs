use super::Request;
use hyper::Uri;
use percent_encoding::percent_decode_str;
use std::collections::HashMap;

impl Request {
	/// Parse query parameters from URI
	pub(super) fn parse_query_params(uri: &Uri) -> HashMap<String, String> {
		uri.query()
			.map(|q| {
				q.split('&')
					.filter_map(|pair| {
						// Split on first '=' only so '=' survives inside values
						let mut parts = pair.splitn(2, '=');
						Some((
							parts.next()?.to_string(),
							parts.next().unwrap_or("").to_string(),
						))
					})
					.collect()
			})
			.unwrap_or_default()
	}

	/// Get the request path
	pub fn path(&self) -> &str {
		self.uri.path()
	}

	/// Get URL-decoded query parameters
	///
	/// # Examples
	///
	/// ```
	/// use bireli_http::Request;
	/// use hyper::Method;
	///
	/// let request = Request::builder()
	///     .method(Method::GET)
	///     .uri("/search?q=front%20controller")
	///     .build()
	///     .unwrap();
	///
	/// let decoded = request.decoded_query_params();
	/// assert_eq!(decoded.get("q"), Some(&"front controller".to_string()));
	/// ```
	pub fn decoded_query_params(&self) -> HashMap<String, String> {
		self.query_params
			.iter()
			.map(|(k, v)| {
				let key = percent_decode_str(k).decode_utf8_lossy().to_string();
				let value = percent_decode_str(v).decode_utf8_lossy().to_string();
				(key, value)
			})
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_parse_query_params_preserves_equals_in_value() {
		let uri: hyper::Uri = "/test?token=abc==".parse().unwrap();

		let params = Request::parse_query_params(&uri);

		assert_eq!(params.get("token"), Some(&"abc==".to_string()));
	}

	#[rstest]
	fn test_parse_query_params_key_without_value() {
		let uri: hyper::Uri = "/test?draft=".parse().unwrap();

		let params = Request::parse_query_params(&uri);

		assert_eq!(params.get("draft"), Some(&"".to_string()));
	}

	#[rstest]
	fn test_parse_query_params_no_query_string() {
		let uri: hyper::Uri = "/test".parse().unwrap();

		let params = Request::parse_query_params(&uri);

		assert!(params.is_empty());
	}
}
