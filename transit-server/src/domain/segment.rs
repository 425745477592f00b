//! Matched journey segments.
//!
//! A `MatchedSegment` is the portion of a trip between a requested origin
//! and destination, annotated with derived timing and fare metrics. It is
//! built per search request and discarded once the response is assembled.
//! Uses `Arc<Trip>` for cheap cloning while ranking.

use std::sync::Arc;

use chrono::NaiveDateTime;

use super::{StopId, Trip, TripStop};

/// Index of an entry within a trip's ordered stop list.
///
/// Used instead of `StopId` to disambiguate loop routes that serve the
/// same stop more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopIndex(pub usize);

impl std::fmt::Display for StopIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A trip segment from a matched origin to a matched destination.
///
/// Times and indices are validated at construction, so the accessors
/// never fail.
///
/// # Invariants
///
/// - `dest_idx > origin_idx` (forward travel only)
/// - both indices are valid for the trip's stop list
/// - `arrival >= departure` (non-negative duration)
#[derive(Debug, Clone)]
pub struct MatchedSegment {
    trip: Arc<Trip>,
    origin_idx: StopIndex,
    dest_idx: StopIndex,
    departure: NaiveDateTime,
    arrival: NaiveDateTime,
    duration_mins: i64,
    cheapest_fare: Option<(f64, String)>,
}

impl MatchedSegment {
    /// Match a trip against an origin/destination pair.
    ///
    /// Scans the ordered stop list once, taking the *first* occurrence
    /// of each stop id. The trip matches only if both occur and the
    /// origin comes strictly before the destination; a trip is never
    /// matched in reverse. Loop routes that revisit a stop resolve to
    /// the first occurrence only.
    ///
    /// Segments whose derived duration would be negative are treated as
    /// malformed data and excluded (`None`).
    pub fn find(trip: &Arc<Trip>, origin: &StopId, destination: &StopId) -> Option<Self> {
        let stops = trip.stops();

        let origin_idx = stops.iter().position(|s| &s.stop == origin)?;
        let dest_idx = stops.iter().position(|s| &s.stop == destination)?;

        if origin_idx >= dest_idx {
            return None;
        }

        let departure = stops[origin_idx].departure;
        let arrival = stops[dest_idx].arrival;

        let duration_mins = arrival.signed_duration_since(departure).num_minutes();
        if duration_mins < 0 {
            return None;
        }

        let cheapest_fare = trip
            .cheapest_band()
            .map(|band| (band.min, trip.fare_bands[0].currency.clone()));

        Some(Self {
            trip: Arc::clone(trip),
            origin_idx: StopIndex(origin_idx),
            dest_idx: StopIndex(dest_idx),
            departure,
            arrival,
            duration_mins,
            cheapest_fare,
        })
    }

    /// Returns the matched trip.
    pub fn trip(&self) -> &Arc<Trip> {
        &self.trip
    }

    /// Returns the origin index into the trip's stop list.
    pub fn origin_idx(&self) -> StopIndex {
        self.origin_idx
    }

    /// Returns the destination index into the trip's stop list.
    pub fn dest_idx(&self) -> StopIndex {
        self.dest_idx
    }

    /// Returns the origin stop entry.
    pub fn origin_stop(&self) -> &TripStop {
        // Safe: validated at construction
        &self.trip.stops()[self.origin_idx.0]
    }

    /// Returns the destination stop entry.
    pub fn destination_stop(&self) -> &TripStop {
        // Safe: validated at construction
        &self.trip.stops()[self.dest_idx.0]
    }

    /// Departure time from the origin stop.
    pub fn departure(&self) -> NaiveDateTime {
        self.departure
    }

    /// Arrival time at the destination stop.
    pub fn arrival(&self) -> NaiveDateTime {
        self.arrival
    }

    /// Duration in whole minutes; never negative.
    pub fn duration_mins(&self) -> i64 {
        self.duration_mins
    }

    /// Cheapest fare as (amount, currency), if the trip has fare bands.
    ///
    /// The amount is the minimum `min` across all bands; the currency is
    /// read from the first band. Mixed currencies across bands are
    /// unsupported and not checked.
    pub fn cheapest_fare(&self) -> Option<(f64, &str)> {
        self.cheapest_fare
            .as_ref()
            .map(|(amount, currency)| (*amount, currency.as_str()))
    }

    /// Cheapest fare amount, or infinity when the trip has no bands.
    /// Keeps the price comparator total.
    pub fn fare_or_inf(&self) -> f64 {
        self.cheapest_fare
            .as_ref()
            .map_or(f64::INFINITY, |(amount, _)| *amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FareBand, ServiceCalendar, TripId};
    use chrono::{NaiveDate, NaiveDateTime};

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn stop(seq: u32, id: &str, arr: &str, dep: &str) -> TripStop {
        TripStop {
            seq,
            stop: StopId::from(id),
            arrival: dt(arr),
            departure: dt(dep),
            platform: None,
        }
    }

    fn make_trip(stops: Vec<TripStop>, bands: Vec<FareBand>) -> Arc<Trip> {
        let calendar = ServiceCalendar::daily(
            NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
        )
        .unwrap();

        Arc::new(
            Trip::new(
                TripId::from("t1"),
                "101".into(),
                "Test Trip".into(),
                "Test".into(),
                vec!["STD".into()],
                calendar,
                stops,
                bands,
            )
            .unwrap(),
        )
    }

    fn band(class: &str, currency: &str, min: f64, max: f64) -> FareBand {
        FareBand {
            class_code: class.into(),
            currency: currency.into(),
            min,
            max,
        }
    }

    fn three_stop_trip() -> Arc<Trip> {
        make_trip(
            vec![
                stop(0, "s1", "2025-09-20 08:00", "2025-09-20 08:00"),
                stop(1, "s2", "2025-09-20 08:35", "2025-09-20 08:40"),
                stop(2, "s3", "2025-09-20 09:00", "2025-09-20 09:00"),
            ],
            vec![band("STD", "INR", 60.0, 90.0), band("AC", "INR", 90.0, 140.0)],
        )
    }

    #[test]
    fn forward_match_with_metrics() {
        let trip = three_stop_trip();
        let seg = MatchedSegment::find(&trip, &StopId::from("s1"), &StopId::from("s3")).unwrap();

        assert_eq!(seg.origin_idx(), StopIndex(0));
        assert_eq!(seg.dest_idx(), StopIndex(2));
        assert_eq!(seg.departure(), dt("2025-09-20 08:00"));
        assert_eq!(seg.arrival(), dt("2025-09-20 09:00"));
        assert_eq!(seg.duration_mins(), 60);
        assert_eq!(seg.cheapest_fare(), Some((60.0, "INR")));
    }

    #[test]
    fn departure_uses_departure_time_not_arrival() {
        let trip = three_stop_trip();
        let seg = MatchedSegment::find(&trip, &StopId::from("s2"), &StopId::from("s3")).unwrap();

        // Boarding at s2 departs 08:40, not the 08:35 arrival.
        assert_eq!(seg.departure(), dt("2025-09-20 08:40"));
        assert_eq!(seg.duration_mins(), 20);
    }

    #[test]
    fn reverse_direction_unmatched() {
        let trip = three_stop_trip();
        assert!(MatchedSegment::find(&trip, &StopId::from("s3"), &StopId::from("s1")).is_none());
    }

    #[test]
    fn same_stop_unmatched() {
        let trip = three_stop_trip();
        assert!(MatchedSegment::find(&trip, &StopId::from("s2"), &StopId::from("s2")).is_none());
    }

    #[test]
    fn missing_stop_unmatched() {
        let trip = three_stop_trip();
        assert!(MatchedSegment::find(&trip, &StopId::from("s1"), &StopId::from("s9")).is_none());
        assert!(MatchedSegment::find(&trip, &StopId::from("s9"), &StopId::from("s3")).is_none());
    }

    #[test]
    fn loop_route_first_occurrence() {
        // s1 -> s2 -> s1 -> s3: the loop revisits s1.
        let trip = make_trip(
            vec![
                stop(0, "s1", "2025-09-20 08:00", "2025-09-20 08:00"),
                stop(1, "s2", "2025-09-20 08:20", "2025-09-20 08:25"),
                stop(2, "s1", "2025-09-20 08:45", "2025-09-20 08:50"),
                stop(3, "s3", "2025-09-20 09:10", "2025-09-20 09:10"),
            ],
            vec![],
        );

        // Origin resolves to the first s1 (index 0), not the revisit.
        let seg = MatchedSegment::find(&trip, &StopId::from("s1"), &StopId::from("s3")).unwrap();
        assert_eq!(seg.origin_idx(), StopIndex(0));
        assert_eq!(seg.departure(), dt("2025-09-20 08:00"));

        // s2 -> s1 matches via the second s1 occurrence? No: the first
        // occurrence of s1 (index 0) precedes s2, so no forward match.
        assert!(MatchedSegment::find(&trip, &StopId::from("s2"), &StopId::from("s1")).is_none());
    }

    #[test]
    fn negative_duration_excluded() {
        // Malformed data: destination "arrives" before the origin departs.
        // Per-stop arrival <= departure still holds, so construction passes.
        let trip = make_trip(
            vec![
                stop(0, "s1", "2025-09-20 09:00", "2025-09-20 09:00"),
                stop(1, "s2", "2025-09-20 08:00", "2025-09-20 08:05"),
            ],
            vec![],
        );

        assert!(MatchedSegment::find(&trip, &StopId::from("s1"), &StopId::from("s2")).is_none());
    }

    #[test]
    fn zero_duration_kept() {
        let trip = make_trip(
            vec![
                stop(0, "s1", "2025-09-20 08:00", "2025-09-20 08:00"),
                stop(1, "s2", "2025-09-20 08:00", "2025-09-20 08:00"),
            ],
            vec![],
        );

        let seg = MatchedSegment::find(&trip, &StopId::from("s1"), &StopId::from("s2")).unwrap();
        assert_eq!(seg.duration_mins(), 0);
    }

    #[test]
    fn no_bands_means_no_fare() {
        let trip = make_trip(
            vec![
                stop(0, "s1", "2025-09-20 08:00", "2025-09-20 08:00"),
                stop(1, "s2", "2025-09-20 09:00", "2025-09-20 09:00"),
            ],
            vec![],
        );

        let seg = MatchedSegment::find(&trip, &StopId::from("s1"), &StopId::from("s2")).unwrap();
        assert_eq!(seg.cheapest_fare(), None);
        assert_eq!(seg.fare_or_inf(), f64::INFINITY);
    }

    #[test]
    fn currency_read_from_first_band() {
        // Mixed currencies are unsupported upstream; this documents the
        // actual behavior: amount from the cheapest band, currency from
        // the first band.
        let trip = make_trip(
            vec![
                stop(0, "s1", "2025-09-20 08:00", "2025-09-20 08:00"),
                stop(1, "s2", "2025-09-20 09:00", "2025-09-20 09:00"),
            ],
            vec![band("AC", "EUR", 90.0, 140.0), band("STD", "INR", 60.0, 90.0)],
        );

        let seg = MatchedSegment::find(&trip, &StopId::from("s1"), &StopId::from("s2")).unwrap();
        assert_eq!(seg.cheapest_fare(), Some((60.0, "EUR")));
    }
}
