//! # Bireli Cache
//!
//! Process-local cache abstraction used by the dispatch core, primarily to
//! memoize controller backing-file existence checks under high request
//! volume. Backends are injected as trait objects so tests can substitute
//! an in-memory stub and assert call behavior.

mod entry;
pub mod in_memory;

pub use in_memory::InMemoryCache;

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Cache backend failures
#[derive(Debug, Error)]
pub enum Error {
	#[error("Serialization error: {0}")]
	Serialization(String),

	#[error("Cache backend error: {0}")]
	Backend(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// A process- or host-local cache with TTL-based expiry.
///
/// Values are JSON values so the trait stays object-safe; callers apply
/// their own defaults on a miss. Concurrent writers of the same key follow
/// last-writer-wins semantics; readers may observe a stale value within
/// the TTL window.
#[async_trait]
pub trait Cache: Send + Sync {
	/// Fetch a value, or `None` on a miss or expired entry
	async fn fetch_local(&self, key: &str) -> Result<Option<Value>>;

	/// Store a value; `None` TTL means the backend default (or no expiry)
	async fn store_local(&self, key: &str, value: Value, ttl: Option<Duration>) -> Result<()>;

	/// Remove a key
	async fn delete(&self, key: &str) -> Result<()>;

	/// Whether a live (non-expired) entry exists for the key
	async fn has_key(&self, key: &str) -> Result<bool>;
}
