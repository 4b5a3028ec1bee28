//! Geographic value types.
//!
//! Coordinates are stored latitude-first. Providers and GeoJSON use
//! longitude-first pairs; conversion happens only at those boundaries via
//! [`Coordinate::to_lon_lat`] and [`Coordinate::from_lon_lat`].

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Half-height of the facility search box in degrees (~50 km).
pub const FACILITY_LAT_DELTA: f64 = 0.45;

/// Half-width of the facility search box in degrees at the equator.
/// Divided by cos(latitude) so the physical width stays roughly constant.
pub const FACILITY_LON_DELTA: f64 = 0.7;

/// A validated latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

impl Coordinate {
    /// Builds a coordinate, rejecting non-finite or out-of-range values.
    pub fn new(lat: f64, lon: f64) -> Result<Self, ValidationError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(ValidationError::OutOfRange {
                param: "lat",
                value: lat,
            });
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(ValidationError::OutOfRange {
                param: "lon",
                value: lon,
            });
        }
        Ok(Self { lat, lon })
    }

    pub fn latitude(&self) -> f64 {
        self.lat
    }

    pub fn longitude(&self) -> f64 {
        self.lon
    }

    /// Provider/GeoJSON ordering: `[lon, lat]`.
    pub fn to_lon_lat(self) -> [f64; 2] {
        [self.lon, self.lat]
    }

    /// Parses a provider `[lon, lat, ...]` position. Extra elements
    /// (elevation) are ignored.
    pub fn from_lon_lat(position: &[f64]) -> Result<Self, ValidationError> {
        match position {
            [lon, lat, ..] => Self::new(*lat, *lon),
            _ => Err(ValidationError::Missing("location")),
        }
    }
}

#[derive(Deserialize)]
struct RawCoordinate {
    lat: f64,
    lon: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = ValidationError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Self::new(raw.lat, raw.lon)
    }
}

/// Axis-aligned lat/lon rectangle used to scope the facility query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl BoundingBox {
    /// The facility search box around `center`.
    ///
    /// Fixed degree deltas, not a geodesic buffer. Latitudes are clamped to
    /// the poles; the longitude extent is undefined there since cos(latitude)
    /// approaches zero.
    pub fn around(center: Coordinate) -> Self {
        let lat_delta = FACILITY_LAT_DELTA;
        let lon_delta = longitude_half_extent(center.latitude());

        Self {
            lat_min: (center.latitude() - lat_delta).max(-90.0),
            lat_max: (center.latitude() + lat_delta).min(90.0),
            lon_min: center.longitude() - lon_delta,
            lon_max: center.longitude() + lon_delta,
        }
    }

    pub fn contains(&self, point: Coordinate) -> bool {
        (self.lat_min..=self.lat_max).contains(&point.latitude())
            && (self.lon_min..=self.lon_max).contains(&point.longitude())
    }
}

/// East-west half-extent in degrees for a box centred at `latitude`.
pub fn longitude_half_extent(latitude: f64) -> f64 {
    FACILITY_LON_DELTA / latitude.to_radians().cos()
}
