//! Caching layer over the trip store.
//!
//! Search fans out to a full catalog listing on every request; caching
//! the listing and trip-by-id reads keeps the boundary cheap for
//! repeated queries. TTL bounds staleness against out-of-scope catalog
//! updates.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::catalog::{StoreError, TripFilter, TripStore};
use crate::domain::{Trip, TripId};

/// Configuration for the trip cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries per cache.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 1000,
        }
    }
}

/// Trip store with caching.
///
/// Wraps any [`TripStore`] and caches trip-by-id reads and filtered
/// listings. View recording is written through and invalidates the
/// affected entries so engagement counters stay visible.
pub struct CachedTripStore<S> {
    inner: S,
    trips: MokaCache<TripId, Arc<Trip>>,
    listings: MokaCache<TripFilter, Arc<Vec<Arc<Trip>>>>,
}

impl<S: TripStore> CachedTripStore<S> {
    /// Create a new cached store.
    pub fn new(inner: S, config: &CacheConfig) -> Self {
        let trips = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();
        let listings = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            inner,
            trips,
            listings,
        }
    }

    /// Access the wrapped store for operations that bypass the cache.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Number of cached trip entries (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.trips.entry_count()
    }

    /// Drop all cached entries.
    pub fn invalidate_all(&self) {
        self.trips.invalidate_all();
        self.listings.invalidate_all();
    }
}

impl<S: TripStore> TripStore for CachedTripStore<S> {
    async fn get(&self, id: &TripId) -> Result<Option<Arc<Trip>>, StoreError> {
        if let Some(trip) = self.trips.get(id).await {
            return Ok(Some(trip));
        }

        let fetched = self.inner.get(id).await?;
        if let Some(trip) = &fetched {
            self.trips.insert(id.clone(), trip.clone()).await;
        }
        Ok(fetched)
    }

    async fn find(&self, filter: &TripFilter) -> Result<Vec<Arc<Trip>>, StoreError> {
        if let Some(listing) = self.listings.get(filter).await {
            return Ok(listing.as_ref().clone());
        }

        let trips = self.inner.find(filter).await?;
        self.listings
            .insert(filter.clone(), Arc::new(trips.clone()))
            .await;
        Ok(trips)
    }

    async fn record_view(&self, id: &TripId) -> Result<(), StoreError> {
        self.inner.record_view(id).await?;
        // The counters changed underneath the cached copies.
        self.trips.invalidate(id).await;
        self.listings.invalidate_all();
        Ok(())
    }
}
