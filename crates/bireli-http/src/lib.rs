//! # Bireli HTTP
//!
//! HTTP value objects for the Bireli framework: the [`Request`] handed to
//! the dispatch core, the single mutable [`Response`] accumulator threaded
//! through a dispatch, ordered [`RouteParams`], and the type-safe
//! [`Extensions`] store used for opaque per-request context.
//!
//! These are in-process carriers only; connection handling lives in the
//! serving layer, and routing/dispatch semantics live in `bireli-urls` and
//! `bireli-dispatch`.

pub mod extensions;
pub mod params;
pub mod request;
pub mod response;

pub use extensions::Extensions;
pub use params::RouteParams;
pub use request::{Request, RequestBuilder};
pub use response::Response;

use thiserror::Error;

/// Errors raised by the HTTP value layer and by application handler code.
#[derive(Debug, Error)]
pub enum Error {
	/// Serialization or deserialization failure
	#[error("Serialization error: {0}")]
	Serialization(String),

	/// Malformed request component (URI, header, body)
	#[error("Invalid request: {0}")]
	InvalidRequest(String),

	/// Requested resource does not exist
	#[error("Not found: {0}")]
	NotFound(String),

	/// Any other application-level failure
	#[error("Internal error: {0}")]
	Internal(String),
}

impl Error {
	/// HTTP status code this error maps to when rendered as a response
	pub fn status_code(&self) -> u16 {
		match self {
			Error::Serialization(_) => 500,
			Error::InvalidRequest(_) => 400,
			Error::NotFound(_) => 404,
			Error::Internal(_) => 500,
		}
	}
}

pub type Result<T> = std::result::Result<T, Error>;
