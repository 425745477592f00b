//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::{CacheConfig, CachedTripStore};
use crate::catalog::{InMemoryTripStore, StopCatalog};
use crate::fares::{FareConfig, FareQuoter};
use crate::search::{SearchConfig, SearchService};

/// The concrete trip store the application serves from.
pub type AppTripStore = CachedTripStore<InMemoryTripStore>;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Stop lookup by id or public code
    pub stops: Arc<StopCatalog>,

    /// Cached trip store
    pub store: Arc<AppTripStore>,

    /// Trip search engine
    pub search: Arc<SearchService<Arc<AppTripStore>>>,

    /// Fare quoting
    pub quoter: Arc<FareQuoter>,

    /// Search configuration
    pub config: Arc<SearchConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(stops: StopCatalog, trips: InMemoryTripStore, search_config: SearchConfig) -> Self {
        let stops = Arc::new(stops);
        let store = Arc::new(CachedTripStore::new(trips, &CacheConfig::default()));
        let config = Arc::new(search_config.clone());
        let search = Arc::new(SearchService::new(
            stops.clone(),
            store.clone(),
            search_config,
        ));

        Self {
            stops,
            store,
            search,
            quoter: Arc::new(FareQuoter::new(FareConfig::default())),
            config,
        }
    }
}
