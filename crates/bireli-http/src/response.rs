//! HTTP response accumulator.
//!
//! Exactly one `Response` exists per top-level dispatch; every hook and
//! action in a forwarding chain appends into the same instance.

use bytes::{Bytes, BytesMut};
use hyper::{HeaderMap, StatusCode};
use serde::Serialize;

/// HTTP response under construction
pub struct Response {
	pub status: StatusCode,
	pub headers: HeaderMap,
	pub body: Bytes,
}

impl Response {
	/// Create a response with the given status code
	///
	/// # Examples
	///
	/// ```
	/// use bireli_http::Response;
	/// use hyper::StatusCode;
	///
	/// let response = Response::new(StatusCode::ACCEPTED);
	/// assert_eq!(response.status, StatusCode::ACCEPTED);
	/// assert!(response.body.is_empty());
	/// ```
	pub fn new(status: StatusCode) -> Self {
		Self {
			status,
			headers: HeaderMap::new(),
			body: Bytes::new(),
		}
	}

	/// HTTP 200 OK
	pub fn ok() -> Self {
		Self::new(StatusCode::OK)
	}

	/// HTTP 204 No Content
	pub fn no_content() -> Self {
		Self::new(StatusCode::NO_CONTENT)
	}

	/// HTTP 400 Bad Request
	pub fn bad_request() -> Self {
		Self::new(StatusCode::BAD_REQUEST)
	}

	/// HTTP 403 Forbidden
	pub fn forbidden() -> Self {
		Self::new(StatusCode::FORBIDDEN)
	}

	/// HTTP 404 Not Found
	pub fn not_found() -> Self {
		Self::new(StatusCode::NOT_FOUND)
	}

	/// HTTP 500 Internal Server Error
	pub fn internal_server_error() -> Self {
		Self::new(StatusCode::INTERNAL_SERVER_ERROR)
	}

	/// HTTP 302 Found (temporary redirect)
	///
	/// # Examples
	///
	/// ```
	/// use bireli_http::Response;
	/// use hyper::StatusCode;
	///
	/// let response = Response::temporary_redirect("/login/");
	/// assert_eq!(response.status, StatusCode::FOUND);
	/// assert_eq!(
	///     response.headers.get("location").unwrap().to_str().unwrap(),
	///     "/login/"
	/// );
	/// ```
	pub fn temporary_redirect(location: impl AsRef<str>) -> Self {
		Self::new(StatusCode::FOUND).with_location(location.as_ref())
	}

	/// HTTP 301 Moved Permanently
	pub fn permanent_redirect(location: impl AsRef<str>) -> Self {
		Self::new(StatusCode::MOVED_PERMANENTLY).with_location(location.as_ref())
	}

	/// Replace the response body
	pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		self
	}

	/// Replace the response body in place
	pub fn set_body(&mut self, body: impl Into<Bytes>) {
		self.body = body.into();
	}

	/// Append a chunk to the response body
	///
	/// This is the accumulation primitive used across forwarding chains:
	/// each dispatched action may contribute a fragment of the final body.
	///
	/// # Examples
	///
	/// ```
	/// use bireli_http::Response;
	///
	/// let mut response = Response::ok();
	/// response.append_body("<header/>");
	/// response.append_body("<article/>");
	/// assert_eq!(&response.body[..], b"<header/><article/>");
	/// ```
	pub fn append_body(&mut self, chunk: impl AsRef<[u8]>) {
		let chunk = chunk.as_ref();
		if self.body.is_empty() {
			self.body = Bytes::copy_from_slice(chunk);
			return;
		}
		let mut buf = BytesMut::with_capacity(self.body.len() + chunk.len());
		buf.extend_from_slice(&self.body);
		buf.extend_from_slice(chunk);
		self.body = buf.freeze();
	}

	/// Set the status code in place
	pub fn set_status(&mut self, status: StatusCode) {
		self.status = status;
	}

	/// Add a custom header
	pub fn with_header(mut self, name: &str, value: &str) -> Self {
		if let Ok(header_name) = hyper::header::HeaderName::from_bytes(name.as_bytes())
			&& let Ok(header_value) = hyper::header::HeaderValue::from_str(value)
		{
			self.headers.insert(header_name, header_value);
		}
		self
	}

	/// Add a Location header (typically for redirects)
	pub fn with_location(mut self, location: &str) -> Self {
		if let Ok(value) = hyper::header::HeaderValue::from_str(location) {
			self.headers.insert(hyper::header::LOCATION, value);
		}
		self
	}

	/// Serialize `data` as the JSON body and set the Content-Type header
	///
	/// # Examples
	///
	/// ```
	/// use bireli_http::Response;
	/// use serde_json::json;
	///
	/// let response = Response::ok().with_json(&json!({"status": "ok"})).unwrap();
	/// assert_eq!(
	///     response.headers.get("content-type").unwrap().to_str().unwrap(),
	///     "application/json"
	/// );
	/// ```
	pub fn with_json<T: Serialize>(mut self, data: &T) -> crate::Result<Self> {
		let json =
			serde_json::to_vec(data).map_err(|e| crate::Error::Serialization(e.to_string()))?;
		self.body = Bytes::from(json);
		self.headers.insert(
			hyper::header::CONTENT_TYPE,
			hyper::header::HeaderValue::from_static("application/json"),
		);
		Ok(self)
	}
}

impl From<crate::Error> for Response {
	fn from(error: crate::Error) -> Self {
		let status =
			StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
		let body = serde_json::json!({ "error": error.to_string() });

		Response::new(status)
			.with_json(&body)
			.unwrap_or_else(|_| Response::internal_server_error())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_append_body_accumulates() {
		let mut response = Response::ok();
		response.append_body("one");
		response.append_body(" two");
		response.append_body(" three");

		assert_eq!(&response.body[..], b"one two three");
	}

	#[test]
	fn test_append_into_preset_body() {
		let mut response = Response::ok().with_body("head");
		response.append_body(":tail");

		assert_eq!(&response.body[..], b"head:tail");
	}

	#[test]
	fn test_error_maps_to_status() {
		let response: Response = crate::Error::NotFound("no such page".to_string()).into();

		assert_eq!(response.status, StatusCode::NOT_FOUND);
	}
}
