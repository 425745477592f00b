//! Stop catalog lookup.

use std::collections::HashMap;

use crate::domain::{Stop, StopId};

/// In-memory stop catalog.
///
/// Resolves a stop reference, which callers may give as either an
/// internal id or a public code, to the canonical stop record.
#[derive(Debug, Default)]
pub struct StopCatalog {
    by_id: HashMap<StopId, Stop>,
    by_code: HashMap<String, StopId>,
}

impl StopCatalog {
    /// Build a catalog from stop records.
    ///
    /// If two stops share a public code, the later one wins the code
    /// mapping; ids are expected to be unique upstream.
    pub fn new(stops: Vec<Stop>) -> Self {
        let mut by_id = HashMap::with_capacity(stops.len());
        let mut by_code = HashMap::with_capacity(stops.len());

        for stop in stops {
            by_code.insert(stop.code.as_str().to_string(), stop.id.clone());
            by_id.insert(stop.id.clone(), stop);
        }

        Self { by_id, by_code }
    }

    /// Resolve a reference (internal id or public code) to a stop.
    pub fn resolve(&self, reference: &str) -> Option<&Stop> {
        if let Some(stop) = self.by_id.get(&StopId::from(reference)) {
            return Some(stop);
        }
        self.by_code
            .get(reference)
            .and_then(|id| self.by_id.get(id))
    }

    /// Look up a stop by its internal id.
    pub fn get(&self, id: &StopId) -> Option<&Stop> {
        self.by_id.get(id)
    }

    /// Coordinates of a stop as (longitude, latitude), if known.
    pub fn position(&self, id: &StopId) -> Option<(f64, f64)> {
        self.by_id.get(id).map(Stop::position)
    }

    /// Number of stops in the catalog.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
