//! Trip directory queries: suggestions, operator summaries, trending.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::Trip;

/// Summary of one operator across the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorSummary {
    pub name: String,
    pub trip_count: usize,
    /// Lowest band minimum observed across the operator's trips.
    pub min_fare: Option<f64>,
    /// Highest band maximum observed across the operator's trips.
    pub max_fare: Option<f64>,
}

/// Trips whose number, name or operator contains `query`,
/// case-insensitively, up to `limit` results in catalog order.
pub fn suggest<'a>(trips: &'a [Arc<Trip>], query: &str, limit: usize) -> Vec<&'a Arc<Trip>> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    trips
        .iter()
        .filter(|trip| {
            trip.number.to_lowercase().contains(&needle)
                || trip.name.to_lowercase().contains(&needle)
                || trip.operator.to_lowercase().contains(&needle)
        })
        .take(limit)
        .collect()
}

/// Per-operator trip counts and fare ranges, sorted by operator name.
pub fn operators(trips: &[Arc<Trip>]) -> Vec<OperatorSummary> {
    let mut by_name: BTreeMap<&str, OperatorSummary> = BTreeMap::new();

    for trip in trips {
        let entry = by_name
            .entry(trip.operator.as_str())
            .or_insert_with(|| OperatorSummary {
                name: trip.operator.clone(),
                trip_count: 0,
                min_fare: None,
                max_fare: None,
            });
        entry.trip_count += 1;

        for band in &trip.fare_bands {
            entry.min_fare = Some(entry.min_fare.map_or(band.min, |f| f.min(band.min)));
            entry.max_fare = Some(entry.max_fare.map_or(band.max, |f| f.max(band.max)));
        }
    }

    by_name.into_values().collect()
}

/// The most popular trips, optionally restricted to a tag.
///
/// Ordered by popularity descending, ties broken by view count
/// descending.
pub fn trending<'a>(
    trips: &'a [Arc<Trip>],
    tag: Option<&str>,
    limit: usize,
) -> Vec<&'a Arc<Trip>> {
    let mut matched: Vec<&Arc<Trip>> = trips
        .iter()
        .filter(|trip| tag.is_none_or(|t| trip.tags.iter().any(|candidate| candidate == t)))
        .collect();

    matched.sort_by(|a, b| {
        b.popularity
            .cmp(&a.popularity)
            .then_with(|| b.view_count.cmp(&a.view_count))
    });
    matched.truncate(limit);
    matched
}
