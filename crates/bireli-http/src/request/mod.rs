//! HTTP request representation.

mod params;

use crate::extensions::Extensions;
use crate::params::RouteParams;
use crate::{Error, Result};
use bytes::Bytes;
use hyper::{HeaderMap, Method, Uri, Version};
use std::collections::HashMap;

/// An HTTP request, already terminated from the wire by the serving layer
pub struct Request {
	pub method: Method,
	pub uri: Uri,
	pub version: Version,
	pub headers: HeaderMap,
	pub body: Bytes,
	/// Query string parameters, parsed from the URI
	pub query_params: HashMap<String, String>,
	/// Ordered parameters bound by the router (or by positional-segment
	/// parsing when no named route matched)
	pub route_params: RouteParams,
	/// Arbitrary per-request data attached by middleware or handlers
	pub extensions: Extensions,
}

impl Request {
	/// Create a request from its parts
	///
	/// # Examples
	///
	/// ```
	/// use bireli_http::Request;
	/// use hyper::{HeaderMap, Method, Uri, Version};
	/// use bytes::Bytes;
	///
	/// let request = Request::new(
	///     Method::GET,
	///     Uri::from_static("/blog/42?draft=1"),
	///     Version::HTTP_11,
	///     HeaderMap::new(),
	///     Bytes::new(),
	/// );
	/// assert_eq!(request.path(), "/blog/42");
	/// assert_eq!(request.query_params.get("draft"), Some(&"1".to_string()));
	/// ```
	pub fn new(
		method: Method,
		uri: Uri,
		version: Version,
		headers: HeaderMap,
		body: Bytes,
	) -> Self {
		let query_params = Self::parse_query_params(&uri);
		Self {
			method,
			uri,
			version,
			headers,
			body,
			query_params,
			route_params: RouteParams::new(),
			extensions: Extensions::new(),
		}
	}

	/// Start building a request
	///
	/// # Examples
	///
	/// ```
	/// use bireli_http::Request;
	/// use hyper::Method;
	///
	/// let request = Request::builder()
	///     .method(Method::GET)
	///     .uri("/blog/")
	///     .build()
	///     .unwrap();
	/// assert_eq!(request.path(), "/blog/");
	/// ```
	pub fn builder() -> RequestBuilder {
		RequestBuilder::default()
	}

	/// Ordered route parameters bound to this request
	pub fn route_params(&self) -> &RouteParams {
		&self.route_params
	}

	/// Bind a route parameter (called by routers during resolution)
	pub fn set_route_param(&mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) {
		self.route_params.insert(name, value);
	}
}

/// Builder for [`Request`]
#[derive(Default)]
pub struct RequestBuilder {
	method: Option<Method>,
	uri: Option<String>,
	version: Option<Version>,
	headers: HeaderMap,
	body: Bytes,
}

impl RequestBuilder {
	pub fn method(mut self, method: Method) -> Self {
		self.method = Some(method);
		self
	}

	pub fn uri(mut self, uri: impl Into<String>) -> Self {
		self.uri = Some(uri.into());
		self
	}

	pub fn version(mut self, version: Version) -> Self {
		self.version = Some(version);
		self
	}

	pub fn headers(mut self, headers: HeaderMap) -> Self {
		self.headers = headers;
		self
	}

	pub fn body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		self
	}

	/// Finalize the request; fails on a missing or unparseable URI
	pub fn build(self) -> Result<Request> {
		let uri: Uri = self
			.uri
			.ok_or_else(|| Error::InvalidRequest("missing uri".to_string()))?
			.parse()
			.map_err(|e| Error::InvalidRequest(format!("invalid uri: {e}")))?;

		Ok(Request::new(
			self.method.unwrap_or(Method::GET),
			uri,
			self.version.unwrap_or(Version::HTTP_11),
			self.headers,
			self.body,
		))
	}
}
