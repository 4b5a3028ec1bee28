//! Provider response bodies.

use serde_json::{Value, json};

/// openrouteservice snap answer for a single location.
pub fn ors_snap_response(lon: f64, lat: f64) -> Value {
    json!({
        "locations": [
            {"location": [lon, lat], "name": "Cheap Street", "snapped_distance": 42.17}
        ],
        "metadata": {"service": "snap"}
    })
}

/// openrouteservice snap answer when nothing routable is nearby.
pub fn ors_snap_null_response() -> Value {
    json!({
        "locations": [null],
        "metadata": {"service": "snap"}
    })
}

/// openrouteservice isochrone answer with one polygon around the origin.
pub fn ors_isochrone_response(lon: f64, lat: f64, range_secs: f64) -> Value {
    json!({
        "type": "FeatureCollection",
        "bbox": [lon - 0.3, lat - 0.2, lon + 0.3, lat + 0.2],
        "features": [{
            "type": "Feature",
            "properties": {"group_index": 0, "value": range_secs, "center": [lon, lat]},
            "geometry": {
                "type": "Polygon",
                "coordinates": [[
                    [lon - 0.3, lat],
                    [lon, lat + 0.2],
                    [lon + 0.3, lat],
                    [lon, lat - 0.2],
                    [lon - 0.3, lat]
                ]]
            }
        }],
        "metadata": {"service": "isochrones", "query": {"range": [range_secs]}}
    })
}

/// Overpass answer with two tagged nodes and one untagged node.
pub fn overpass_response() -> Value {
    json!({
        "version": 0.6,
        "generator": "Overpass API",
        "elements": [
            {"type": "node", "id": 101, "lat": 50.9446, "lon": -2.6340,
             "tags": {"amenity": "hospital", "name": "Yeovil District Hospital"}},
            {"type": "node", "id": 102, "lat": 50.9489, "lon": -2.5123,
             "tags": {"amenity": "clinic"}},
            {"type": "node", "id": 103, "lat": 50.7154, "lon": -2.4367}
        ]
    })
}

pub fn overpass_empty_response() -> Value {
    json!({
        "version": 0.6,
        "generator": "Overpass API",
        "elements": []
    })
}
