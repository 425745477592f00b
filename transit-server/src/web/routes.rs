//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use crate::catalog::{StoreError, TripFilter, TripStore};
use crate::directory;
use crate::domain::{Trip, TripId};
use crate::geometry::route_feature_collection;
use crate::search::SearchError;
use crate::seatmap;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/trips/search", get(search_trips))
        .route("/api/trips/suggest", get(suggest_trips))
        .route("/api/trips/trending", get(trending_trips))
        .route("/api/operators", get(list_operators))
        .route("/api/live-status", get(live_status))
        .route("/api/trips/:id", get(trip_detail))
        .route("/api/trips/:id/geometry", get(trip_geometry))
        .route("/api/trips/:id/quote", get(trip_quote))
        .route("/api/trips/:id/seatmap", get(trip_seatmap))
        .route("/api/trips/:id/availability", get(trip_availability))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Search trips between two stops.
async fn search_trips(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, AppError> {
    let request = query.into_request(&state.config);
    let page = state.search.search(&request).await?;

    Ok(Json(SearchResponse {
        trips: page.segments.iter().map(TripSummaryDto::from_segment).collect(),
        total: page.total,
        page: page.page,
        limit: page.limit,
        has_more: page.has_more,
    }))
}

/// Suggest trips by number, name or operator.
async fn suggest_trips(
    State(state): State<AppState>,
    Query(query): Query<SuggestQuery>,
) -> Result<Json<SuggestResponse>, AppError> {
    let trips = state.store.find(&TripFilter::default()).await?;
    let limit = query
        .limit
        .unwrap_or(state.config.suggest_limit)
        .min(state.config.suggest_limit);

    let matches = directory::suggest(&trips, &query.q, limit);

    Ok(Json(SuggestResponse {
        trips: matches
            .into_iter()
            .map(|t| SuggestItemDto::from_trip(t))
            .collect(),
    }))
}

/// List the most popular trips, optionally restricted to a tag.
async fn trending_trips(
    State(state): State<AppState>,
    Query(query): Query<TrendingQuery>,
) -> Result<Json<TrendingResponse>, AppError> {
    let trips = state.store.find(&TripFilter::default()).await?;
    let limit = query
        .limit
        .unwrap_or(state.config.trending_limit)
        .min(state.config.trending_limit);

    let ranked = directory::trending(&trips, query.tag.as_deref(), limit);

    Ok(Json(TrendingResponse {
        trips: ranked
            .into_iter()
            .map(|t| TrendingItemDto::from_trip(t))
            .collect(),
    }))
}

/// List operators with trip counts and fare ranges.
async fn list_operators(
    State(state): State<AppState>,
) -> Result<Json<OperatorsResponse>, AppError> {
    let trips = state.store.find(&TripFilter::default()).await?;

    Ok(Json(OperatorsResponse {
        operators: directory::operators(&trips)
            .into_iter()
            .map(OperatorDto::from_summary)
            .collect(),
    }))
}

/// Live running status. No feed is connected.
async fn live_status(Query(query): Query<LiveStatusQuery>) -> Json<LiveStatusResponse> {
    Json(LiveStatusResponse::unknown(query))
}

/// Full detail for one trip. Counts as a view.
async fn trip_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TripDetailDto>, AppError> {
    let trip_id = TripId::new(id.clone());
    state.store.record_view(&trip_id).await?;
    let trip = load_trip(&state, &id).await?;

    Ok(Json(TripDetailDto::from_trip(&trip)))
}

/// Route geometry for one trip, as GeoJSON.
async fn trip_geometry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<geojson::FeatureCollection>, AppError> {
    let trip = load_trip(&state, &id).await?;
    Ok(Json(route_feature_collection(&trip, &state.stops)))
}

/// Quote a fare for one trip.
async fn trip_quote(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<QuoteQuery>,
) -> Result<Json<QuoteResponse>, AppError> {
    let trip = load_trip(&state, &id).await?;

    let quote = state
        .quoter
        .quote(
            &trip,
            query.class.as_deref(),
            query.passengers.unwrap_or(1),
            query.currency.as_deref(),
        )
        .ok_or_else(|| AppError::NotFound {
            message: format!("no fare available for trip: {id}"),
        })?;

    Ok(Json(QuoteResponse::from_quote(quote)))
}

/// Placeholder seat map for one trip.
async fn trip_seatmap(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<SeatMapQuery>,
) -> Result<Json<SeatMapResponse>, AppError> {
    let trip = load_trip(&state, &id).await?;

    let class = query
        .class
        .or_else(|| trip.classes.first().cloned())
        .or_else(|| trip.cheapest_band().map(|b| b.class_code.clone()))
        .unwrap_or_else(|| "STD".to_string());

    let seat_map = match query.rows {
        Some(rows) => seatmap::seat_map(&class, rows),
        None => seatmap::default_seat_map(&class),
    };

    Ok(Json(SeatMapResponse {
        trip_id: id,
        seat_map,
    }))
}

/// Whether a trip runs on a date, optionally in a class.
async fn trip_availability(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let trip = load_trip(&state, &id).await?;

    Ok(Json(AvailabilityResponse {
        available: trip.is_available(query.date, query.class.as_deref()),
        trip_id: id,
        date: query.date,
        class_code: query.class,
    }))
}

async fn load_trip(state: &AppState, id: &str) -> Result<Arc<Trip>, AppError> {
    state
        .store
        .get(&TripId::from(id))
        .await?
        .ok_or_else(|| AppError::NotFound {
            message: format!("unknown trip: {id}"),
        })
}

/// Application errors that map to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::UnknownOrigin(_) | SearchError::UnknownDestination(_) => {
                AppError::BadRequest {
                    message: e.to_string(),
                }
            }
            SearchError::Store(_) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        tracing::error!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
