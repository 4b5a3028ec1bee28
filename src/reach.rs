//! Click-to-result orchestration.
//!
//! Snaps the clicked point to the road network, requests isochrones with the
//! profile's range scaling, and gathers healthcare facilities around the
//! point. Everything here is request-scoped and stateless.

use std::fmt;

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::error::UpstreamError;
use crate::geo::{BoundingBox, Coordinate};
use crate::profile::{RiderPreset, RiderProfile, TimeRange};
use crate::traits::{Facility, FacilityProvider, RoutingProvider};

/// Facility name used when the source has no `name` tag.
pub const UNNAMED: &str = "Unnamed";

/// Facility category used when the source has no `amenity` tag.
pub const DEFAULT_AMENITY: &str = "healthcare";

/// Why a snap attempt fell back to the raw coordinate.
#[derive(Debug)]
pub enum FallbackReason {
    Unreachable(UpstreamError),
    NoRoutablePoint,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::Unreachable(err) => write!(f, "snap request failed: {err}"),
            FallbackReason::NoRoutablePoint => f.write_str("no routable point near location"),
        }
    }
}

/// Result of snapping a point to the road network.
#[derive(Debug)]
pub enum SnapOutcome {
    Snapped(Coordinate),
    Fallback(Coordinate, FallbackReason),
}

impl SnapOutcome {
    /// The coordinate to route from, snapped or not.
    pub fn coordinate(&self) -> Coordinate {
        match self {
            SnapOutcome::Snapped(point) | SnapOutcome::Fallback(point, _) => *point,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, SnapOutcome::Fallback(..))
    }
}

/// Snaps `location` for `profile`. Never fails: any provider problem yields
/// [`SnapOutcome::Fallback`] carrying the untouched input.
pub fn snap_to_road<P>(provider: &P, location: Coordinate, profile: RiderProfile) -> SnapOutcome
where
    P: RoutingProvider + ?Sized,
{
    match provider.snap(location, profile) {
        Ok(Some(snapped)) => SnapOutcome::Snapped(snapped),
        Ok(None) => SnapOutcome::Fallback(location, FallbackReason::NoRoutablePoint),
        Err(err) => SnapOutcome::Fallback(location, FallbackReason::Unreachable(err)),
    }
}

/// Isochrones for one rider profile.
///
/// The range is scaled for the profile once, up front; snapping only moves
/// the origin and never short-circuits the request.
pub fn fetch_isochrones<P>(
    provider: &P,
    location: Coordinate,
    profile: RiderProfile,
    range: TimeRange,
) -> Result<FeatureCollection, UpstreamError>
where
    P: RoutingProvider + ?Sized,
{
    let range_secs = range.scaled_for(profile);

    let outcome = snap_to_road(provider, location, profile);
    match &outcome {
        SnapOutcome::Snapped(snapped) => info!(
            from_lat = location.latitude(),
            from_lon = location.longitude(),
            to_lat = snapped.latitude(),
            to_lon = snapped.longitude(),
            profile = %profile,
            "snapped origin to road network"
        ),
        SnapOutcome::Fallback(_, reason) => warn!(
            lat = location.latitude(),
            lon = location.longitude(),
            profile = %profile,
            reason = %reason,
            "snap failed, using original coordinates"
        ),
    }

    provider.isochrones(outcome.coordinate(), profile, range_secs)
}

/// Healthcare facilities in the search box around `location`.
///
/// An empty result is a valid, empty collection.
pub fn fetch_facilities<P>(provider: &P, location: Coordinate) -> Result<FeatureCollection, UpstreamError>
where
    P: FacilityProvider + ?Sized,
{
    let bbox = BoundingBox::around(location);
    info!(
        lat = location.latitude(),
        lon = location.longitude(),
        "fetching facilities"
    );

    let facilities = provider.facilities_within(&bbox)?;
    info!(count = facilities.len(), "found facilities");

    Ok(feature_collection(
        facilities.iter().map(facility_feature).collect(),
    ))
}

/// Isochrones for several presets at once, tagged with `profile` and `label`.
///
/// Presets are fetched in parallel and merged in preset order. A failing
/// preset is logged and left out; only when all of them fail is the first
/// error returned.
pub fn fetch_ride_options<P>(
    provider: &P,
    location: Coordinate,
    presets: &[RiderPreset],
    range: TimeRange,
) -> Result<FeatureCollection, UpstreamError>
where
    P: RoutingProvider + ?Sized,
{
    let results: Vec<(RiderPreset, Result<FeatureCollection, UpstreamError>)> = presets
        .par_iter()
        .map(|preset| {
            (
                *preset,
                fetch_isochrones(provider, location, preset.profile, range),
            )
        })
        .collect();

    let mut features = Vec::new();
    let mut first_error = None;
    let mut succeeded = 0;

    for (preset, result) in results {
        match result {
            Ok(collection) => {
                succeeded += 1;
                features.extend(collection.features.into_iter().map(|mut feature| {
                    feature.set_property("profile", preset.profile.as_str());
                    feature.set_property("label", preset.label);
                    feature
                }));
            }
            Err(err) => {
                warn!(profile = %preset.profile, error = %err, "isochrone fetch failed");
                first_error.get_or_insert(err);
            }
        }
    }

    match first_error {
        Some(err) if succeeded == 0 => Err(err),
        _ => Ok(feature_collection(features)),
    }
}

/// GeoJSON point feature with `name` and `amenity` properties.
pub fn facility_feature(facility: &Facility) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert(
        "name".to_string(),
        JsonValue::from(facility.name.as_deref().unwrap_or(UNNAMED)),
    );
    properties.insert(
        "amenity".to_string(),
        JsonValue::from(facility.amenity.as_deref().unwrap_or(DEFAULT_AMENITY)),
    );

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(
            facility.location.to_lon_lat().to_vec(),
        ))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

pub fn feature_collection(features: Vec<Feature>) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}
