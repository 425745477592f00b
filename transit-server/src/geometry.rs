//! Route geometry assembly.
//!
//! Builds a GeoJSON feature for a trip's path. A stored polyline wins;
//! otherwise the line is reconstructed from the stop coordinates in
//! sequence order; if neither yields a drawable line the feature is
//! returned without geometry rather than failing the request.

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};

use crate::catalog::StopCatalog;
use crate::domain::Trip;

/// Assemble the route of `trip` as a single-feature collection.
pub fn route_feature_collection(trip: &Trip, stops: &StopCatalog) -> FeatureCollection {
    let line = polyline_positions(trip).or_else(|| stop_positions(trip, stops));

    let geometry = line.map(|positions| {
        Geometry::new(Value::LineString(
            positions.into_iter().map(|(lon, lat)| vec![lon, lat]).collect(),
        ))
    });

    let mut properties = JsonObject::new();
    properties.insert("trip_id".into(), trip.id.as_str().into());
    properties.insert("number".into(), trip.number.clone().into());
    properties.insert("operator".into(), trip.operator.clone().into());

    FeatureCollection {
        bbox: None,
        features: vec![Feature {
            bbox: None,
            geometry,
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }],
        foreign_members: None,
    }
}

/// The stored polyline, with out-of-range coordinates dropped.
/// Usable only if at least two positions survive.
fn polyline_positions(trip: &Trip) -> Option<Vec<(f64, f64)>> {
    let stored = trip.geometry.as_ref()?;
    let positions: Vec<(f64, f64)> = stored
        .iter()
        .copied()
        .filter(|&(lon, lat)| in_range(lon, lat))
        .collect();

    (positions.len() >= 2).then_some(positions)
}

/// Fallback: the trip's stop coordinates in sequence order, skipping
/// stops the catalog cannot resolve.
fn stop_positions(trip: &Trip, stops: &StopCatalog) -> Option<Vec<(f64, f64)>> {
    let positions: Vec<(f64, f64)> = trip
        .stops()
        .iter()
        .filter_map(|ts| stops.position(&ts.stop))
        .filter(|&(lon, lat)| in_range(lon, lat))
        .collect();

    (positions.len() >= 2).then_some(positions)
}

fn in_range(lon: f64, lat: f64) -> bool {
    (-180.0..=180.0).contains(&lon) && (-90.0..=90.0).contains(&lat)
}
