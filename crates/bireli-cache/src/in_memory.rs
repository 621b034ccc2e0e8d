//! In-memory cache implementation

use crate::entry::CacheEntry;
use crate::{Cache, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

/// In-memory cache backend
///
/// Hit/miss counters make it easy for tests to assert how often the real
/// backing work behind a cached lookup was avoided.
#[derive(Clone, Default)]
pub struct InMemoryCache {
	store: Arc<RwLock<HashMap<String, CacheEntry>>>,
	default_ttl: Option<Duration>,
	hits: Arc<AtomicU64>,
	misses: Arc<AtomicU64>,
}

impl InMemoryCache {
	/// Create a new in-memory cache with no default TTL
	///
	/// # Examples
	///
	/// ```
	/// use bireli_cache::{Cache, InMemoryCache};
	/// use serde_json::json;
	///
	/// # tokio_test::block_on(async {
	/// let cache = InMemoryCache::new();
	/// cache.store_local("flag", json!(1), None).await.unwrap();
	/// assert_eq!(cache.fetch_local("flag").await.unwrap(), Some(json!(1)));
	/// # });
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	/// Set a default TTL applied when `store_local` is called without one
	pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
		self.default_ttl = Some(ttl);
		self
	}

	/// Number of fetches answered from a live entry
	pub fn hits(&self) -> u64 {
		self.hits.load(Ordering::Relaxed)
	}

	/// Number of fetches that found no live entry
	pub fn misses(&self) -> u64 {
		self.misses.load(Ordering::Relaxed)
	}

	/// Drop expired entries
	pub async fn cleanup_expired(&self) {
		let mut store = self.store.write().await;
		store.retain(|_, entry| !entry.is_expired());
	}

	/// Number of stored entries, including expired ones not yet cleaned up
	pub async fn entry_count(&self) -> usize {
		self.store.read().await.len()
	}
}

#[async_trait]
impl Cache for InMemoryCache {
	async fn fetch_local(&self, key: &str) -> Result<Option<Value>> {
		let store = self.store.read().await;

		if let Some(entry) = store.get(key) {
			if entry.is_expired() {
				self.misses.fetch_add(1, Ordering::Relaxed);
				return Ok(None);
			}
			self.hits.fetch_add(1, Ordering::Relaxed);
			Ok(Some(entry.value.clone()))
		} else {
			self.misses.fetch_add(1, Ordering::Relaxed);
			Ok(None)
		}
	}

	async fn store_local(&self, key: &str, value: Value, ttl: Option<Duration>) -> Result<()> {
		let ttl = ttl.or(self.default_ttl);
		let entry = CacheEntry::new(value, ttl);

		let mut store = self.store.write().await;
		store.insert(key.to_string(), entry);
		Ok(())
	}

	async fn delete(&self, key: &str) -> Result<()> {
		let mut store = self.store.write().await;
		store.remove(key);
		Ok(())
	}

	async fn has_key(&self, key: &str) -> Result<bool> {
		let store = self.store.read().await;
		Ok(store.get(key).is_some_and(|entry| !entry.is_expired()))
	}
}
