//! Read-only trip store boundary.
//!
//! The search engine treats trip records as owned by an out-of-scope
//! catalog-management process; this module defines the awaited boundary
//! it reads through, plus an in-memory implementation.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::{Trip, TripId};

/// Errors from the trip store boundary.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// The store could not serve the request
    #[error("trip store unavailable: {0}")]
    Unavailable(String),
}

/// Store-level filter pushed down with a listing request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TripFilter {
    /// Keep only trips run by one of these operators.
    pub operators: Option<Vec<String>>,
    /// Keep only trips offering at least one of these classes.
    pub classes: Option<Vec<String>>,
}

impl TripFilter {
    /// Whether a trip passes the filter.
    pub fn matches(&self, trip: &Trip) -> bool {
        if let Some(operators) = &self.operators {
            if !operators.iter().any(|o| o == &trip.operator) {
                return false;
            }
        }
        if let Some(classes) = &self.classes {
            if !classes.iter().any(|c| trip.has_class(c)) {
                return false;
            }
        }
        true
    }
}

/// Read access to trip records.
///
/// This abstraction lets the search engine be tested with fixture data
/// and lets a caching layer wrap the real store. Calls are awaited: the
/// store is a potentially-blocking boundary whose latency policy is its
/// own concern.
#[allow(async_fn_in_trait)]
pub trait TripStore: Send + Sync {
    /// Fetch a single trip by id.
    async fn get(&self, id: &TripId) -> Result<Option<Arc<Trip>>, StoreError>;

    /// List trips passing the filter, in stable id order.
    async fn find(&self, filter: &TripFilter) -> Result<Vec<Arc<Trip>>, StoreError>;

    /// Record that a trip was viewed (feeds the engagement counters).
    async fn record_view(&self, id: &TripId) -> Result<(), StoreError>;
}

impl<S: TripStore> TripStore for Arc<S> {
    async fn get(&self, id: &TripId) -> Result<Option<Arc<Trip>>, StoreError> {
        (**self).get(id).await
    }

    async fn find(&self, filter: &TripFilter) -> Result<Vec<Arc<Trip>>, StoreError> {
        (**self).find(filter).await
    }

    async fn record_view(&self, id: &TripId) -> Result<(), StoreError> {
        (**self).record_view(id).await
    }
}

/// In-memory trip store.
#[derive(Debug, Default)]
pub struct InMemoryTripStore {
    trips: RwLock<HashMap<TripId, Arc<Trip>>>,
}

impl InMemoryTripStore {
    /// Build a store from trip records.
    pub fn new(trips: Vec<Trip>) -> Self {
        let map = trips
            .into_iter()
            .map(|t| (t.id.clone(), Arc::new(t)))
            .collect();
        Self {
            trips: RwLock::new(map),
        }
    }

    /// Number of trips in the store.
    pub async fn len(&self) -> usize {
        self.trips.read().await.len()
    }

    /// Whether the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.trips.read().await.is_empty()
    }
}

impl TripStore for InMemoryTripStore {
    async fn get(&self, id: &TripId) -> Result<Option<Arc<Trip>>, StoreError> {
        Ok(self.trips.read().await.get(id).cloned())
    }

    async fn find(&self, filter: &TripFilter) -> Result<Vec<Arc<Trip>>, StoreError> {
        let guard = self.trips.read().await;
        let mut trips: Vec<Arc<Trip>> = guard
            .values()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();
        // Stable order so identical queries return identical pages.
        trips.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
        Ok(trips)
    }

    async fn record_view(&self, id: &TripId) -> Result<(), StoreError> {
        let mut guard = self.trips.write().await;
        if let Some(trip) = guard.get_mut(id) {
            Arc::make_mut(trip).view_count += 1;
        }
        Ok(())
    }
}
