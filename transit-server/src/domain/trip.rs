//! Trip records.
//!
//! A `Trip` is one scheduled service instance: an ordered stop sequence,
//! a weekly service calendar, and a set of fare bands. Trips are created
//! by an out-of-scope catalog-management process and are read-only here,
//! so all invariants are checked once at construction.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{DomainError, ServiceCalendar, StopId};

/// Identifier of a trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripId(String);

impl TripId {
    /// Create a trip id from a raw string.
    pub fn new(id: impl Into<String>) -> Self {
        TripId(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TripId {
    fn from(value: &str) -> Self {
        TripId(value.to_string())
    }
}

/// One entry of a trip's ordered stop list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripStop {
    /// Position in the stop sequence; strictly ascending within a trip.
    pub seq: u32,
    /// Reference to the stop served.
    pub stop: StopId,
    /// Scheduled arrival at this stop.
    pub arrival: NaiveDateTime,
    /// Scheduled departure from this stop.
    pub departure: NaiveDateTime,
    /// Platform or bay, if assigned.
    pub platform: Option<String>,
}

/// A price range for a travel class on a trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FareBand {
    /// Travel class code (e.g. "STD", "AC").
    pub class_code: String,
    /// ISO currency code.
    pub currency: String,
    /// Lowest price in the band.
    pub min: f64,
    /// Highest price in the band.
    pub max: f64,
}

/// A scheduled trip.
///
/// # Invariants
///
/// - at least two stops;
/// - stop sequence indices strictly ascending;
/// - each stop's arrival ≤ its departure;
/// - calendar validity start ≤ end (enforced by [`ServiceCalendar`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    /// Trip id
    pub id: TripId,
    /// Public trip number (e.g. "12951")
    pub number: String,
    /// Display name
    pub name: String,
    /// Operating company
    pub operator: String,
    /// Travel classes offered
    pub classes: Vec<String>,
    /// Amenity codes (wifi, catering, ...)
    pub amenities: Vec<String>,
    /// When the trip operates
    pub calendar: ServiceCalendar,
    /// Ordered stop list
    stops: Vec<TripStop>,
    /// Fare bands per class
    pub fare_bands: Vec<FareBand>,
    /// Precomputed route polyline as (lon, lat) positions, if stored
    pub geometry: Option<Vec<(f64, f64)>>,
    /// Region tags for trending scoping
    pub tags: Vec<String>,
    /// Engagement: popularity score
    pub popularity: u64,
    /// Engagement: view count
    pub view_count: u64,
    /// Opaque attachment; never inspected by search logic
    pub metadata: Option<serde_json::Value>,
}

impl Trip {
    /// Construct a trip, validating the stop-list invariants.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the stop list has fewer than two entries, if the
    /// sequence indices are not strictly ascending, or if any stop's
    /// arrival is after its departure.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: TripId,
        number: String,
        name: String,
        operator: String,
        classes: Vec<String>,
        calendar: ServiceCalendar,
        stops: Vec<TripStop>,
        fare_bands: Vec<FareBand>,
    ) -> Result<Self, DomainError> {
        if stops.len() < 2 {
            return Err(DomainError::InvalidStopList(
                "a trip must have at least two stops",
            ));
        }

        for pair in stops.windows(2) {
            if pair[1].seq <= pair[0].seq {
                return Err(DomainError::InvalidStopList(
                    "sequence indices must be strictly ascending",
                ));
            }
        }

        for stop in &stops {
            if stop.arrival > stop.departure {
                return Err(DomainError::InvalidStopList(
                    "stop arrival must not be after its departure",
                ));
            }
        }

        Ok(Self {
            id,
            number,
            name,
            operator,
            classes,
            amenities: Vec::new(),
            calendar,
            stops,
            fare_bands,
            geometry: None,
            tags: Vec::new(),
            popularity: 0,
            view_count: 0,
            metadata: None,
        })
    }

    /// Returns the ordered stop list.
    pub fn stops(&self) -> &[TripStop] {
        &self.stops
    }

    /// Whether this trip offers the given travel class.
    ///
    /// A class counts as offered if it appears in the class list or has
    /// a fare band.
    pub fn has_class(&self, class_code: &str) -> bool {
        self.classes.iter().any(|c| c == class_code)
            || self.fare_bands.iter().any(|b| b.class_code == class_code)
    }

    /// The fare band with the lowest `min`, if any bands exist.
    pub fn cheapest_band(&self) -> Option<&FareBand> {
        self.fare_bands
            .iter()
            .min_by(|a, b| a.min.total_cmp(&b.min))
    }

    /// Whether this trip is available: operating on `date` (if given)
    /// and offering `class_code` (if given).
    pub fn is_available(&self, date: Option<NaiveDate>, class_code: Option<&str>) -> bool {
        self.calendar.operates_on(date) && class_code.is_none_or(|c| self.has_class(c))
    }
}
