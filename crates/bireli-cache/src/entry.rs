//! Internal cache entry structure

use serde_json::Value;
use std::time::{Duration, SystemTime};

/// Cache entry with expiration
#[derive(Debug, Clone)]
pub(crate) struct CacheEntry {
	pub(crate) value: Value,
	pub(crate) expires_at: Option<SystemTime>,
}

impl CacheEntry {
	pub(crate) fn new(value: Value, ttl: Option<Duration>) -> Self {
		let expires_at = ttl.map(|d| SystemTime::now() + d);
		Self { value, expires_at }
	}

	pub(crate) fn is_expired(&self) -> bool {
		if let Some(expires_at) = self.expires_at {
			SystemTime::now() > expires_at
		} else {
			false
		}
	}
}
