//! Single-entry TTL cache shared by the lookup services.
//!
//! Each service owns one [`LookupCache`] holding at most one snapshot of its
//! domain. The check-then-fetch sequence in [`LookupCache::get_or_fetch`] is
//! not atomic: callers racing on an empty or stale entry each go to the
//! backend, and the last one to finish wins the entry. The lock is only held
//! for the read or the replacement, never across the network call.

use crate::clients::LookupSource;
use crate::clock::Clock;
use crate::domain::LookupDomain;
use crate::error::LookupError;
use crate::models::lookup::LookupRow;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, warn};

struct CacheEntry<T> {
    data: Arc<Vec<T>>,
    fetched_at_millis: i64,
}

pub struct LookupCache<T> {
    domain: LookupDomain,
    ttl_millis: i64,
    clock: Arc<dyn Clock>,
    entry: RwLock<Option<CacheEntry<T>>>,
}

impl<T> LookupCache<T> {
    #[must_use]
    pub fn new(domain: LookupDomain, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            domain,
            ttl_millis: i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX),
            clock,
            entry: RwLock::new(None),
        }
    }

    #[must_use]
    pub const fn domain(&self) -> LookupDomain {
        self.domain
    }

    /// Returns the snapshot if its age is strictly below the TTL.
    pub async fn get_fresh(&self) -> Option<Arc<Vec<T>>> {
        let now = self.clock.now_millis();
        let guard = self.entry.read().await;
        guard
            .as_ref()
            .filter(|entry| now.saturating_sub(entry.fetched_at_millis) < self.ttl_millis)
            .map(|entry| Arc::clone(&entry.data))
    }

    /// Replaces the entry with `data` stamped at the current time.
    pub async fn store(&self, data: Vec<T>) -> Arc<Vec<T>> {
        let data = Arc::new(data);
        let entry = CacheEntry {
            data: Arc::clone(&data),
            fetched_at_millis: self.clock.now_millis(),
        };
        *self.entry.write().await = Some(entry);
        data
    }

    pub async fn clear(&self) {
        *self.entry.write().await = None;
        debug!(domain = %self.domain, "Lookup cache cleared");
    }

    /// True when an entry exists, fresh or not.
    pub async fn is_populated(&self) -> bool {
        self.entry.read().await.is_some()
    }

    /// Serves the fresh snapshot, or fetches, transforms and stores a new one.
    ///
    /// A failed fetch or transform leaves the previous entry untouched.
    pub async fn get_or_fetch<F>(
        &self,
        source: &dyn LookupSource,
        transform: F,
    ) -> Result<Arc<Vec<T>>, LookupError>
    where
        F: FnOnce(&[LookupRow]) -> Result<Vec<T>, LookupError>,
    {
        let domain = self.domain.label();

        if let Some(data) = self.get_fresh().await {
            metrics::counter!("lookup_cache_hits_total", "domain" => domain).increment(1);
            debug!(domain, count = data.len(), "Lookup cache hit");
            return Ok(data);
        }

        metrics::counter!("lookup_cache_misses_total", "domain" => domain).increment(1);
        debug!(domain, "Lookup cache miss, fetching");

        let rows = source.fetch_rows(self.domain).await.inspect_err(|e| {
            warn!(domain, error = %e, "Lookup fetch failed");
        })?;
        let items = transform(&rows)?;

        Ok(self.store(items).await)
    }
}
