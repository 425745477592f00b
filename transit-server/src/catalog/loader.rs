//! Catalog dataset loading.
//!
//! Converts a JSON dataset file into validated domain records. Invalid
//! records fail the load with context rather than being skipped, so a
//! bad import is caught at startup instead of surfacing as missing
//! search results.

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

use crate::domain::{
    DomainError, FareBand, InvalidStopCode, ServiceCalendar, Stop, StopCode, StopId, Trip, TripId,
    TripStop,
};

use super::{InMemoryTripStore, StopCatalog};

/// Errors from loading a catalog dataset.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Could not read the dataset file
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    /// Dataset is not valid JSON
    #[error("failed to parse dataset: {0}")]
    Json(#[from] serde_json::Error),

    /// A stop record has an invalid public code
    #[error("stop {id}: {source}")]
    InvalidStop {
        id: String,
        #[source]
        source: InvalidStopCode,
    },

    /// A trip record violates a domain invariant
    #[error("trip {id}: {source}")]
    InvalidTrip {
        id: String,
        #[source]
        source: DomainError,
    },
}

/// Raw stop record as it appears in the dataset file.
#[derive(Debug, Deserialize)]
pub struct StopRecord {
    pub id: String,
    pub name: String,
    pub code: String,
    pub longitude: f64,
    pub latitude: f64,
    #[serde(default)]
    pub locality: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

/// Raw calendar record.
#[derive(Debug, Deserialize)]
pub struct CalendarRecord {
    /// Monday-first weekday flags.
    pub weekdays: [bool; 7],
    pub valid_from: NaiveDate,
    pub valid_until: NaiveDate,
}

/// Raw stop-time record.
#[derive(Debug, Deserialize)]
pub struct StopTimeRecord {
    pub seq: u32,
    pub stop: String,
    pub arrival: NaiveDateTime,
    pub departure: NaiveDateTime,
    #[serde(default)]
    pub platform: Option<String>,
}

/// Raw fare band record.
#[derive(Debug, Deserialize)]
pub struct FareBandRecord {
    pub class_code: String,
    pub currency: String,
    pub min: f64,
    pub max: f64,
}

/// Raw trip record.
#[derive(Debug, Deserialize)]
pub struct TripRecord {
    pub id: String,
    pub number: String,
    pub name: String,
    pub operator: String,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub calendar: CalendarRecord,
    pub stops: Vec<StopTimeRecord>,
    #[serde(default)]
    pub fare_bands: Vec<FareBandRecord>,
    #[serde(default)]
    pub geometry: Option<Vec<(f64, f64)>>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub popularity: u64,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

/// Top-level dataset file shape.
#[derive(Debug, Deserialize)]
pub struct Dataset {
    pub stops: Vec<StopRecord>,
    pub trips: Vec<TripRecord>,
}

/// Load a dataset file into a stop catalog and trip store.
pub fn load_dataset(path: &Path) -> Result<(StopCatalog, InMemoryTripStore), LoadError> {
    let raw = std::fs::read_to_string(path)?;
    let dataset: Dataset = serde_json::from_str(&raw)?;
    build_catalog(dataset)
}

/// Convert raw records into validated domain types.
pub fn build_catalog(dataset: Dataset) -> Result<(StopCatalog, InMemoryTripStore), LoadError> {
    let stops = dataset
        .stops
        .into_iter()
        .map(convert_stop)
        .collect::<Result<Vec<_>, _>>()?;

    let trips = dataset
        .trips
        .into_iter()
        .map(convert_trip)
        .collect::<Result<Vec<_>, _>>()?;

    Ok((StopCatalog::new(stops), InMemoryTripStore::new(trips)))
}

fn convert_stop(record: StopRecord) -> Result<Stop, LoadError> {
    let code = StopCode::parse(&record.code).map_err(|source| LoadError::InvalidStop {
        id: record.id.clone(),
        source,
    })?;

    Ok(Stop {
        id: StopId::new(record.id),
        name: record.name,
        code,
        longitude: record.longitude,
        latitude: record.latitude,
        locality: record.locality,
        timezone: record.timezone,
        metadata: record.metadata,
    })
}

fn convert_trip(record: TripRecord) -> Result<Trip, LoadError> {
    let invalid = |source| LoadError::InvalidTrip {
        id: record.id.clone(),
        source,
    };

    let calendar = ServiceCalendar::new(
        record.calendar.weekdays,
        record.calendar.valid_from,
        record.calendar.valid_until,
    )
    .map_err(invalid)?;

    let stops = record
        .stops
        .into_iter()
        .map(|s| TripStop {
            seq: s.seq,
            stop: StopId::new(s.stop),
            arrival: s.arrival,
            departure: s.departure,
            platform: s.platform,
        })
        .collect();

    let fare_bands = record
        .fare_bands
        .into_iter()
        .map(|b| FareBand {
            class_code: b.class_code,
            currency: b.currency,
            min: b.min,
            max: b.max,
        })
        .collect();

    let mut trip = Trip::new(
        TripId::new(record.id.clone()),
        record.number,
        record.name,
        record.operator,
        record.classes,
        calendar,
        stops,
        fare_bands,
    )
    .map_err(|source| LoadError::InvalidTrip {
        id: record.id,
        source,
    })?;

    trip.amenities = record.amenities;
    trip.geometry = record.geometry;
    trip.tags = record.tags;
    trip.popularity = record.popularity;
    trip.view_count = record.view_count;
    trip.metadata = record.metadata;

    Ok(trip)
}
