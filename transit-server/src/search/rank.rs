//! Ranking and pagination of matched segments.

use serde::Deserialize;

use crate::domain::MatchedSegment;

use super::config::SearchConfig;

/// Sort criterion for search results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Departure time, ascending (the default).
    #[default]
    Departure,
    /// Duration in minutes ascending, ties by departure ascending.
    Duration,
    /// Cheapest fare ascending, ties by departure ascending.
    Price,
    /// Trip popularity descending, ties by view count descending.
    Popularity,
}

/// Sort segments in place by the requested criterion.
///
/// The sort is stable, so inputs that compare equal keep their incoming
/// (store) order and identical queries produce identical pages.
pub fn rank(segments: &mut [MatchedSegment], mode: SortMode) {
    match mode {
        SortMode::Departure => {
            segments.sort_by_key(|s| s.departure());
        }
        SortMode::Duration => {
            segments.sort_by_key(|s| (s.duration_mins(), s.departure()));
        }
        SortMode::Price => {
            segments.sort_by(|a, b| {
                a.fare_or_inf()
                    .total_cmp(&b.fare_or_inf())
                    .then_with(|| a.departure().cmp(&b.departure()))
            });
        }
        SortMode::Popularity => {
            segments.sort_by(|a, b| {
                b.trip()
                    .popularity
                    .cmp(&a.trip().popularity)
                    .then_with(|| b.trip().view_count.cmp(&a.trip().view_count))
            });
        }
    }
}

/// One page of ranked segments.
#[derive(Debug)]
pub struct PagedSegments {
    /// The segments on this page.
    pub items: Vec<MatchedSegment>,
    /// Count of all matched segments before pagination.
    pub total: usize,
    /// The (clamped) page number actually served.
    pub page: u32,
    /// The (clamped) page size actually served.
    pub limit: u32,
    /// Whether further pages exist.
    pub has_more: bool,
}

/// Slice one page out of the ranked segments.
///
/// `page` is clamped to `[1, max_page]` and `limit` to `[1, max_limit]`;
/// `total` counts everything before slicing.
pub fn paginate(
    segments: Vec<MatchedSegment>,
    page: u32,
    limit: u32,
    config: &SearchConfig,
) -> PagedSegments {
    let page = page.clamp(1, config.max_page);
    let limit = limit.clamp(1, config.max_limit);

    let total = segments.len();
    let skip = (page as usize - 1) * limit as usize;

    let items: Vec<MatchedSegment> = segments
        .into_iter()
        .skip(skip)
        .take(limit as usize)
        .collect();

    let has_more = skip + items.len() < total;

    PagedSegments {
        items,
        total,
        page,
        limit,
        has_more,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FareBand, ServiceCalendar, StopId, Trip, TripId, TripStop};
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use std::sync::Arc;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    /// A two-stop segment departing at `dep` with the given duration,
    /// fare and popularity.
    fn segment(
        id: &str,
        dep: &str,
        duration_mins: i64,
        fare: Option<f64>,
        popularity: u64,
        views: u64,
    ) -> MatchedSegment {
        let departure = dt(dep);
        let arrival = departure + Duration::minutes(duration_mins);

        let calendar = ServiceCalendar::daily(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        )
        .unwrap();

        let bands = fare
            .map(|min| {
                vec![FareBand {
                    class_code: "STD".into(),
                    currency: "INR".into(),
                    min,
                    max: min + 30.0,
                }]
            })
            .unwrap_or_default();

        let mut trip = Trip::new(
            TripId::from(id),
            id.to_string(),
            format!("Trip {id}"),
            "Op".into(),
            vec![],
            calendar,
            vec![
                TripStop {
                    seq: 0,
                    stop: StopId::from("a"),
                    arrival: departure,
                    departure,
                    platform: None,
                },
                TripStop {
                    seq: 1,
                    stop: StopId::from("b"),
                    arrival,
                    departure: arrival,
                    platform: None,
                },
            ],
            bands,
        )
        .unwrap();
        trip.popularity = popularity;
        trip.view_count = views;

        MatchedSegment::find(&Arc::new(trip), &StopId::from("a"), &StopId::from("b")).unwrap()
    }

    #[test]
    fn rank_by_departure_default() {
        let mut segments = vec![
            segment("b", "2025-09-20 10:00", 60, None, 0, 0),
            segment("a", "2025-09-20 08:00", 60, None, 0, 0),
        ];
        rank(&mut segments, SortMode::Departure);

        assert_eq!(segments[0].trip().id.as_str(), "a");
        assert_eq!(segments[1].trip().id.as_str(), "b");
    }

    #[test]
    fn rank_by_duration_ties_on_departure() {
        let mut segments = vec![
            segment("late", "2025-09-20 10:00", 45, None, 0, 0),
            segment("slow", "2025-09-20 07:00", 90, None, 0, 0),
            segment("early", "2025-09-20 08:00", 45, None, 0, 0),
        ];
        rank(&mut segments, SortMode::Duration);

        let ids: Vec<&str> = segments.iter().map(|s| s.trip().id.as_str()).collect();
        assert_eq!(ids, vec!["early", "late", "slow"]);
    }

    #[test]
    fn rank_by_price_ties_on_departure() {
        let mut segments = vec![
            segment("c", "2025-09-20 10:00", 60, Some(50.0), 0, 0),
            segment("b", "2025-09-20 08:00", 60, Some(50.0), 0, 0),
            segment("a", "2025-09-20 12:00", 60, Some(30.0), 0, 0),
        ];
        rank(&mut segments, SortMode::Price);

        let ids: Vec<&str> = segments.iter().map(|s| s.trip().id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn rank_by_price_fareless_trips_sort_last() {
        let mut segments = vec![
            segment("free", "2025-09-20 06:00", 60, None, 0, 0),
            segment("paid", "2025-09-20 10:00", 60, Some(80.0), 0, 0),
        ];
        rank(&mut segments, SortMode::Price);

        assert_eq!(segments[0].trip().id.as_str(), "paid");
        assert_eq!(segments[1].trip().id.as_str(), "free");
    }

    #[test]
    fn rank_by_popularity_descending_ties_on_views() {
        let mut segments = vec![
            segment("a", "2025-09-20 08:00", 60, None, 10, 5),
            segment("b", "2025-09-20 09:00", 60, None, 90, 1),
            segment("c", "2025-09-20 10:00", 60, None, 10, 50),
        ];
        rank(&mut segments, SortMode::Popularity);

        let ids: Vec<&str> = segments.iter().map(|s| s.trip().id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn paginate_slices_and_counts() {
        let segments: Vec<MatchedSegment> = (0..5)
            .map(|i| {
                segment(
                    &format!("t{i}"),
                    &format!("2025-09-20 0{i}:00"),
                    60,
                    None,
                    0,
                    0,
                )
            })
            .collect();

        let page = paginate(segments, 2, 2, &SearchConfig::default());

        assert_eq!(page.total, 5);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].trip().id.as_str(), "t2");
        assert!(page.has_more);
    }

    #[test]
    fn paginate_last_page_has_no_more() {
        let segments: Vec<MatchedSegment> = (0..5)
            .map(|i| {
                segment(
                    &format!("t{i}"),
                    &format!("2025-09-20 0{i}:00"),
                    60,
                    None,
                    0,
                    0,
                )
            })
            .collect();

        let page = paginate(segments, 3, 2, &SearchConfig::default());

        assert_eq!(page.items.len(), 1);
        assert!(!page.has_more);
    }

    #[test]
    fn paginate_beyond_end_is_empty() {
        let segments = vec![segment("a", "2025-09-20 08:00", 60, None, 0, 0)];
        let page = paginate(segments, 50, 10, &SearchConfig::default());

        assert!(page.items.is_empty());
        assert_eq!(page.total, 1);
        assert!(!page.has_more);
    }

    #[test]
    fn paginate_clamps_page_and_limit() {
        let segments = vec![segment("a", "2025-09-20 08:00", 60, None, 0, 0)];
        let config = SearchConfig::default();

        let page = paginate(segments.clone(), 0, 0, &config);
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 1);

        let page = paginate(segments, 9999, 9999, &config);
        assert_eq!(page.page, config.max_page);
        assert_eq!(page.limit, config.max_limit);
    }
}
