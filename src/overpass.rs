//! Overpass API adapter for healthcare facilities.

use std::collections::HashMap;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::UpstreamError;
use crate::geo::{BoundingBox, Coordinate};
use crate::traits::{Facility, FacilityProvider};

const SERVICE: &str = "overpass";

/// `amenity` tag values requested from Overpass.
pub const HEALTHCARE_AMENITIES: [&str; 3] = ["doctors", "clinic", "hospital"];

#[derive(Debug, Clone)]
pub struct OverpassConfig {
    pub url: String,
    /// Server-side budget written into the query as `[timeout:N]`.
    pub query_timeout_secs: u64,
    /// Client-side HTTP timeout; should leave slack over the query budget.
    pub http_timeout_secs: u64,
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            url: "https://overpass-api.de/api/interpreter".to_string(),
            query_timeout_secs: 25,
            http_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OverpassClient {
    config: OverpassConfig,
    client: reqwest::blocking::Client,
}

impl OverpassClient {
    pub fn new(config: OverpassConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

impl FacilityProvider for OverpassClient {
    fn facilities_within(&self, bbox: &BoundingBox) -> Result<Vec<Facility>, UpstreamError> {
        let query = build_query(bbox, self.config.query_timeout_secs);
        debug!(query = %query, "querying overpass");

        let response = self.client.post(&self.config.url).body(query).send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(UpstreamError::Status {
                service: SERVICE,
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text()?;
        let body: OverpassResponse =
            serde_json::from_str(&text).map_err(|err| UpstreamError::Decode {
                service: SERVICE,
                message: err.to_string(),
            })?;

        if let Some(remark) = &body.remark {
            warn!(remark = %remark, "overpass reported a problem with the query");
        }

        Ok(body.elements.into_iter().filter_map(into_facility).collect())
    }
}

/// Overpass QL for the healthcare amenities inside `bbox`.
///
/// Bounding boxes are written south, west, north, east.
pub fn build_query(bbox: &BoundingBox, timeout_secs: u64) -> String {
    let area = format!(
        "({},{},{},{})",
        bbox.lat_min, bbox.lon_min, bbox.lat_max, bbox.lon_max
    );

    let mut query = format!("[out:json][timeout:{timeout_secs}];\n(\n");
    for amenity in HEALTHCARE_AMENITIES {
        query.push_str(&format!("  node[\"amenity\"=\"{amenity}\"]{area};\n"));
    }
    query.push_str(");\nout center;\n");
    query
}

fn into_facility(element: OverpassElement) -> Option<Facility> {
    let (lat, lon) = match (element.lat, element.lon, element.center) {
        (Some(lat), Some(lon), _) => (lat, lon),
        (_, _, Some(center)) => (center.lat, center.lon),
        _ => return None,
    };
    let location = Coordinate::new(lat, lon).ok()?;

    let mut tags = element.tags;
    Some(Facility {
        location,
        name: tags.remove("name"),
        amenity: tags.remove("amenity"),
    })
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
    remark: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    lat: Option<f64>,
    lon: Option<f64>,
    center: Option<OverpassCenter>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct OverpassCenter {
    lat: f64,
    lon: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sherborne_box() -> BoundingBox {
        BoundingBox {
            lat_min: 50.5,
            lat_max: 51.4,
            lon_min: -3.6,
            lon_max: -1.4,
        }
    }

    #[test]
    fn query_covers_all_amenities_in_swne_order() {
        let query = build_query(&sherborne_box(), 25);

        assert!(query.starts_with("[out:json][timeout:25];"));
        for amenity in HEALTHCARE_AMENITIES {
            let clause = format!("node[\"amenity\"=\"{amenity}\"](50.5,-3.6,51.4,-1.4);");
            assert!(query.contains(&clause), "missing clause {clause}");
        }
        assert!(query.trim_end().ends_with("out center;"));
    }

    #[test]
    fn elements_use_center_when_position_missing() {
        let body: OverpassResponse = serde_json::from_value(serde_json::json!({
            "elements": [
                {"type": "node", "id": 1, "lat": 50.95, "lon": -2.51,
                 "tags": {"amenity": "doctors", "name": "Apples Medical Centre"}},
                {"type": "way", "id": 2, "center": {"lat": 50.94, "lon": -2.52},
                 "tags": {"amenity": "hospital"}},
                {"type": "relation", "id": 3}
            ]
        }))
        .unwrap();

        let facilities: Vec<Facility> = body.elements.into_iter().filter_map(into_facility).collect();
        assert_eq!(facilities.len(), 2);
        assert_eq!(facilities[0].name.as_deref(), Some("Apples Medical Centre"));
        assert_eq!(facilities[1].location.latitude(), 50.94);
        assert_eq!(facilities[1].name, None);
        assert_eq!(facilities[1].amenity.as_deref(), Some("hospital"));
    }

    #[test]
    fn missing_elements_decode_as_empty() {
        let body: OverpassResponse = serde_json::from_str(r#"{"version": 0.6}"#).unwrap();
        assert!(body.elements.is_empty());
        assert!(body.remark.is_none());
    }
}
