//! Data transfer objects for the web API.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::directory::OperatorSummary;
use crate::domain::{MatchedSegment, Trip};
use crate::fares::FareQuote;
use crate::search::{SearchConfig, SearchRequest, SortMode};
use crate::seatmap::SeatMap;

/// Query parameters for trip search.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub origin: String,
    pub destination: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Comma-separated operator names.
    #[serde(default)]
    pub operators: Option<String>,
    /// Comma-separated class codes.
    #[serde(default)]
    pub classes: Option<String>,
    #[serde(default)]
    pub sort: Option<SortMode>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

impl SearchQuery {
    /// Convert to an engine request, filling defaults from `config`.
    pub fn into_request(self, config: &SearchConfig) -> SearchRequest {
        SearchRequest {
            origin: self.origin,
            destination: self.destination,
            date: self.date,
            operators: split_csv(self.operators.as_deref()),
            classes: split_csv(self.classes.as_deref()),
            sort: self.sort.unwrap_or_default(),
            page: self.page.unwrap_or(1),
            limit: self.limit.unwrap_or(config.default_limit),
        }
    }
}

fn split_csv(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// A fare amount with its currency.
#[derive(Debug, Serialize)]
pub struct FareDto {
    pub amount: f64,
    pub currency: String,
}

/// A boarding or alighting point within a search result.
#[derive(Debug, Serialize)]
pub struct StopRefDto {
    pub stop_id: String,
    pub platform: Option<String>,
}

/// One search result: a trip segment with derived metrics.
#[derive(Debug, Serialize)]
pub struct TripSummaryDto {
    pub trip_id: String,
    pub number: String,
    pub name: String,
    pub operator: String,
    pub origin: StopRefDto,
    pub destination: StopRefDto,
    pub departure: NaiveDateTime,
    pub arrival: NaiveDateTime,
    pub duration_mins: i64,
    pub cheapest_fare: Option<FareDto>,
}

impl TripSummaryDto {
    pub fn from_segment(segment: &MatchedSegment) -> Self {
        let trip = segment.trip();
        let origin = segment.origin_stop();
        let destination = segment.destination_stop();

        Self {
            trip_id: trip.id.as_str().to_string(),
            number: trip.number.clone(),
            name: trip.name.clone(),
            operator: trip.operator.clone(),
            origin: StopRefDto {
                stop_id: origin.stop.as_str().to_string(),
                platform: origin.platform.clone(),
            },
            destination: StopRefDto {
                stop_id: destination.stop.as_str().to_string(),
                platform: destination.platform.clone(),
            },
            departure: segment.departure(),
            arrival: segment.arrival(),
            duration_mins: segment.duration_mins(),
            cheapest_fare: segment.cheapest_fare().map(|(amount, currency)| FareDto {
                amount,
                currency: currency.to_string(),
            }),
        }
    }
}

/// Response for trip search.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub trips: Vec<TripSummaryDto>,
    pub total: usize,
    pub page: u32,
    pub limit: u32,
    pub has_more: bool,
}

/// A scheduled call within a trip's full stop list.
#[derive(Debug, Serialize)]
pub struct TripStopDto {
    pub seq: u32,
    pub stop_id: String,
    pub arrival: NaiveDateTime,
    pub departure: NaiveDateTime,
    pub platform: Option<String>,
}

/// A fare band on a trip.
#[derive(Debug, Serialize)]
pub struct FareBandDto {
    pub class_code: String,
    pub currency: String,
    pub min: f64,
    pub max: f64,
}

/// Full detail for one trip.
#[derive(Debug, Serialize)]
pub struct TripDetailDto {
    pub trip_id: String,
    pub number: String,
    pub name: String,
    pub operator: String,
    pub classes: Vec<String>,
    pub amenities: Vec<String>,
    pub tags: Vec<String>,
    pub popularity: u64,
    pub view_count: u64,
    pub stops: Vec<TripStopDto>,
    pub fare_bands: Vec<FareBandDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl TripDetailDto {
    pub fn from_trip(trip: &Trip) -> Self {
        Self {
            trip_id: trip.id.as_str().to_string(),
            number: trip.number.clone(),
            name: trip.name.clone(),
            operator: trip.operator.clone(),
            classes: trip.classes.clone(),
            amenities: trip.amenities.clone(),
            tags: trip.tags.clone(),
            popularity: trip.popularity,
            view_count: trip.view_count,
            stops: trip
                .stops()
                .iter()
                .map(|s| TripStopDto {
                    seq: s.seq,
                    stop_id: s.stop.as_str().to_string(),
                    arrival: s.arrival,
                    departure: s.departure,
                    platform: s.platform.clone(),
                })
                .collect(),
            fare_bands: trip
                .fare_bands
                .iter()
                .map(|b| FareBandDto {
                    class_code: b.class_code.clone(),
                    currency: b.currency.clone(),
                    min: b.min,
                    max: b.max,
                })
                .collect(),
            metadata: trip.metadata.clone(),
        }
    }
}

/// Query parameters for trip suggestions.
#[derive(Debug, Deserialize)]
pub struct SuggestQuery {
    pub q: String,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// One suggested trip.
#[derive(Debug, Serialize)]
pub struct SuggestItemDto {
    pub trip_id: String,
    pub number: String,
    pub name: String,
    pub operator: String,
}

impl SuggestItemDto {
    pub fn from_trip(trip: &Trip) -> Self {
        Self {
            trip_id: trip.id.as_str().to_string(),
            number: trip.number.clone(),
            name: trip.name.clone(),
            operator: trip.operator.clone(),
        }
    }
}

/// Response for trip suggestions.
#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    pub trips: Vec<SuggestItemDto>,
}

/// Response for operator listing.
#[derive(Debug, Serialize)]
pub struct OperatorsResponse {
    pub operators: Vec<OperatorDto>,
}

/// Summary of one operator.
#[derive(Debug, Serialize)]
pub struct OperatorDto {
    pub name: String,
    pub trip_count: usize,
    pub min_fare: Option<f64>,
    pub max_fare: Option<f64>,
}

impl OperatorDto {
    pub fn from_summary(summary: OperatorSummary) -> Self {
        Self {
            name: summary.name,
            trip_count: summary.trip_count,
            min_fare: summary.min_fare,
            max_fare: summary.max_fare,
        }
    }
}

/// Query parameters for trending trips.
#[derive(Debug, Deserialize)]
pub struct TrendingQuery {
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// One trending trip.
#[derive(Debug, Serialize)]
pub struct TrendingItemDto {
    pub trip_id: String,
    pub number: String,
    pub name: String,
    pub operator: String,
    pub popularity: u64,
    pub view_count: u64,
    pub tags: Vec<String>,
}

impl TrendingItemDto {
    pub fn from_trip(trip: &Trip) -> Self {
        Self {
            trip_id: trip.id.as_str().to_string(),
            number: trip.number.clone(),
            name: trip.name.clone(),
            operator: trip.operator.clone(),
            popularity: trip.popularity,
            view_count: trip.view_count,
            tags: trip.tags.clone(),
        }
    }
}

/// Response for trending trips.
#[derive(Debug, Serialize)]
pub struct TrendingResponse {
    pub trips: Vec<TrendingItemDto>,
}

/// Query parameters for fare quoting.
#[derive(Debug, Deserialize)]
pub struct QuoteQuery {
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub passengers: Option<u32>,
    #[serde(default)]
    pub currency: Option<String>,
}

/// A priced quote with its hold expiry.
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub trip_id: String,
    pub class_code: String,
    pub passengers: u32,
    pub unit_amount: f64,
    pub total_amount: f64,
    pub currency: String,
    pub hold_expires_at: DateTime<Utc>,
}

impl QuoteResponse {
    pub fn from_quote(quote: FareQuote) -> Self {
        Self {
            trip_id: quote.trip_id,
            class_code: quote.class_code,
            passengers: quote.passengers,
            unit_amount: quote.unit_amount,
            total_amount: quote.total_amount,
            currency: quote.currency,
            hold_expires_at: quote.hold_expires_at,
        }
    }
}

/// Query parameters for seat maps.
#[derive(Debug, Deserialize)]
pub struct SeatMapQuery {
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub rows: Option<u32>,
}

/// Response for seat maps.
#[derive(Debug, Serialize)]
pub struct SeatMapResponse {
    pub trip_id: String,
    #[serde(flatten)]
    pub seat_map: SeatMap,
}

/// Query parameters for availability checks.
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub class: Option<String>,
}

/// Response for availability checks.
#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub trip_id: String,
    pub date: Option<NaiveDate>,
    pub class_code: Option<String>,
    pub available: bool,
}

/// Query parameters for live status.
#[derive(Debug, Deserialize)]
pub struct LiveStatusQuery {
    #[serde(default)]
    pub operator: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Response for live status. No telemetry feed is wired up, so the
/// status is always `"unknown"`.
#[derive(Debug, Serialize)]
pub struct LiveStatusResponse {
    pub operator: Option<String>,
    pub number: Option<String>,
    pub date: Option<NaiveDate>,
    pub status: &'static str,
}

impl LiveStatusResponse {
    pub fn unknown(query: LiveStatusQuery) -> Self {
        Self {
            operator: query.operator,
            number: query.number,
            date: query.date,
            status: "unknown",
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
