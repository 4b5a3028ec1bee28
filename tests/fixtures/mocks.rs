//! In-memory providers.

use std::sync::Mutex;

use cycle_reach::error::UpstreamError;
use cycle_reach::geo::{BoundingBox, Coordinate};
use cycle_reach::profile::RiderProfile;
use cycle_reach::traits::{Facility, FacilityProvider, RoutingProvider};
use geojson::FeatureCollection;

use super::responses::ors_isochrone_response;

/// What the mock does when asked to snap.
#[derive(Debug, Clone, Copy)]
pub enum SnapBehaviour {
    Snap(Coordinate),
    NothingNearby,
    Fail,
}

/// One recorded isochrone request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsochroneCall {
    pub location: Coordinate,
    pub profile: RiderProfile,
    pub range_secs: f64,
}

pub struct MockRouting {
    snap: SnapBehaviour,
    failing_profiles: Vec<RiderProfile>,
    pub snap_calls: Mutex<Vec<(Coordinate, RiderProfile)>>,
    pub isochrone_calls: Mutex<Vec<IsochroneCall>>,
}

impl MockRouting {
    pub fn new(snap: SnapBehaviour) -> Self {
        Self {
            snap,
            failing_profiles: Vec::new(),
            snap_calls: Mutex::new(Vec::new()),
            isochrone_calls: Mutex::new(Vec::new()),
        }
    }

    /// Isochrone requests for `profile` fail with a 503.
    pub fn failing_for(mut self, profile: RiderProfile) -> Self {
        self.failing_profiles.push(profile);
        self
    }

    pub fn isochrone_calls(&self) -> Vec<IsochroneCall> {
        self.isochrone_calls.lock().unwrap().clone()
    }
}

pub fn unavailable(service: &'static str) -> UpstreamError {
    UpstreamError::Status {
        service,
        status: 503,
        body: "Service Unavailable".to_string(),
    }
}

impl RoutingProvider for MockRouting {
    fn snap(
        &self,
        location: Coordinate,
        profile: RiderProfile,
    ) -> Result<Option<Coordinate>, UpstreamError> {
        self.snap_calls.lock().unwrap().push((location, profile));
        match self.snap {
            SnapBehaviour::Snap(point) => Ok(Some(point)),
            SnapBehaviour::NothingNearby => Ok(None),
            SnapBehaviour::Fail => Err(unavailable("mock-snap")),
        }
    }

    fn isochrones(
        &self,
        location: Coordinate,
        profile: RiderProfile,
        range_secs: f64,
    ) -> Result<FeatureCollection, UpstreamError> {
        self.isochrone_calls.lock().unwrap().push(IsochroneCall {
            location,
            profile,
            range_secs,
        });

        if self.failing_profiles.contains(&profile) {
            return Err(unavailable("mock-isochrones"));
        }

        let body = ors_isochrone_response(location.longitude(), location.latitude(), range_secs);
        Ok(serde_json::from_value(body).unwrap())
    }
}

pub struct MockFacilities {
    facilities: Vec<Facility>,
    fail: bool,
    pub requested: Mutex<Vec<BoundingBox>>,
}

impl MockFacilities {
    pub fn with(facilities: Vec<Facility>) -> Self {
        Self {
            facilities,
            fail: false,
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn empty() -> Self {
        Self::with(Vec::new())
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::empty()
        }
    }
}

impl FacilityProvider for MockFacilities {
    fn facilities_within(&self, bbox: &BoundingBox) -> Result<Vec<Facility>, UpstreamError> {
        self.requested.lock().unwrap().push(*bbox);
        if self.fail {
            return Err(unavailable("mock-facilities"));
        }
        Ok(self
            .facilities
            .iter()
            .filter(|facility| bbox.contains(facility.location))
            .cloned()
            .collect())
    }
}

pub fn facility(location: Coordinate, name: Option<&str>, amenity: Option<&str>) -> Facility {
    Facility {
        location,
        name: name.map(str::to_string),
        amenity: amenity.map(str::to_string),
    }
}
