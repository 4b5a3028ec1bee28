//! Points around Sherborne, the default map centre.

use cycle_reach::geo::Coordinate;

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lon: f64) -> Self {
        Self { name, lat, lon }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lon).expect("fixture coordinates are valid")
    }
}

pub const SHERBORNE: Location = Location::new("Sherborne", 50.9495, -2.5177);

/// Sherborne moved onto the nearest road.
pub const SHERBORNE_ON_ROAD: Location = Location::new("Cheap Street", 50.9501, -2.5169);

pub const YEOVIL_HOSPITAL: Location = Location::new("Yeovil District Hospital", 50.9446, -2.6340);

pub const YEATMAN_HOSPITAL: Location = Location::new("Yeatman Hospital", 50.9489, -2.5123);

pub const DORCHESTER_CLINIC: Location = Location::new("Dorchester Clinic", 50.7154, -2.4367);
