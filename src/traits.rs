//! Provider seams for the reachability core.
//!
//! The orchestration in [`crate::reach`] only talks to these traits. The HTTP
//! adapters in [`crate::ors`] and [`crate::overpass`] implement them, and tests
//! substitute in-memory providers.

use geojson::FeatureCollection;

use crate::error::UpstreamError;
use crate::geo::{BoundingBox, Coordinate};
use crate::profile::RiderProfile;

/// Road snapping and isochrone computation.
pub trait RoutingProvider: Send + Sync {
    /// Nearest routable point for `location`, in a single attempt.
    ///
    /// `Ok(None)` means the provider answered but found nothing routable
    /// nearby (common for cycling profiles in remote areas).
    fn snap(
        &self,
        location: Coordinate,
        profile: RiderProfile,
    ) -> Result<Option<Coordinate>, UpstreamError>;

    /// Reachability polygons for one origin and one time budget.
    fn isochrones(
        &self,
        location: Coordinate,
        profile: RiderProfile,
        range_secs: f64,
    ) -> Result<FeatureCollection, UpstreamError>;
}

/// Point-of-interest lookup for healthcare facilities.
pub trait FacilityProvider: Send + Sync {
    /// Doctors, clinics and hospitals intersecting `bbox`.
    fn facilities_within(&self, bbox: &BoundingBox) -> Result<Vec<Facility>, UpstreamError>;
}

/// A single healthcare facility as reported by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct Facility {
    pub location: Coordinate,
    pub name: Option<String>,
    pub amenity: Option<String>,
}
