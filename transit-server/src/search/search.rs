//! Trip search over the catalog.
//!
//! Resolves the requested stops, pulls candidate trips from the store,
//! matches origin/destination within each trip's stop list and returns
//! a ranked, paginated set of segments.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::catalog::{StopCatalog, StoreError, TripFilter, TripStore};
use crate::domain::{MatchedSegment, StopId};

use super::config::SearchConfig;
use super::rank::{SortMode, paginate, rank};

/// A trip search request, after HTTP-layer parsing.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Origin stop, by id or public code.
    pub origin: String,
    /// Destination stop, by id or public code.
    pub destination: String,
    /// Travel date; `None` skips calendar filtering.
    pub date: Option<NaiveDate>,
    /// Restrict to these operators, if non-empty.
    pub operators: Vec<String>,
    /// Restrict to trips offering these classes, if non-empty.
    pub classes: Vec<String>,
    /// Result ordering.
    pub sort: SortMode,
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub limit: u32,
}

/// Errors from running a search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The origin did not resolve to a known stop
    #[error("unknown origin stop: {0}")]
    UnknownOrigin(String),

    /// The destination did not resolve to a known stop
    #[error("unknown destination stop: {0}")]
    UnknownDestination(String),

    /// The trip store failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// One page of search results.
#[derive(Debug)]
pub struct SearchPage {
    pub segments: Vec<MatchedSegment>,
    pub total: usize,
    pub page: u32,
    pub limit: u32,
    pub has_more: bool,
}

/// The search engine: a stop catalog, a trip store and tuning knobs.
pub struct SearchService<S> {
    stops: Arc<StopCatalog>,
    store: S,
    config: SearchConfig,
}

impl<S: TripStore> SearchService<S> {
    pub fn new(stops: Arc<StopCatalog>, store: S, config: SearchConfig) -> Self {
        Self {
            stops,
            store,
            config,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Run a search and return one page of ranked segments.
    ///
    /// Stop resolution happens before any store query, so an unknown
    /// stop fails fast. A search that matches nothing is not an error:
    /// it returns an empty page with `total` zero.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchPage, SearchError> {
        let origin = self.resolve_origin(&request.origin)?;
        let destination = self.resolve_destination(&request.destination)?;

        let filter = TripFilter {
            operators: non_empty(&request.operators),
            classes: non_empty(&request.classes),
        };
        let candidates = self.store.find(&filter).await?;

        let mut segments: Vec<MatchedSegment> = candidates
            .iter()
            .filter(|trip| trip.calendar.operates_on(request.date))
            .filter_map(|trip| MatchedSegment::find(trip, &origin, &destination))
            .collect();

        tracing::debug!(
            origin = %origin,
            destination = %destination,
            candidates = candidates.len(),
            matched = segments.len(),
            "search matched segments"
        );

        rank(&mut segments, request.sort);
        let paged = paginate(segments, request.page, request.limit, &self.config);

        Ok(SearchPage {
            segments: paged.items,
            total: paged.total,
            page: paged.page,
            limit: paged.limit,
            has_more: paged.has_more,
        })
    }

    fn resolve_origin(&self, raw: &str) -> Result<StopId, SearchError> {
        self.stops
            .resolve(raw)
            .map(|stop| stop.id.clone())
            .ok_or_else(|| SearchError::UnknownOrigin(raw.to_string()))
    }

    fn resolve_destination(&self, raw: &str) -> Result<StopId, SearchError> {
        self.stops
            .resolve(raw)
            .map(|stop| stop.id.clone())
            .ok_or_else(|| SearchError::UnknownDestination(raw.to_string()))
    }
}

fn non_empty(values: &[String]) -> Option<Vec<String>> {
    if values.is_empty() {
        None
    } else {
        Some(values.to_vec())
    }
}
