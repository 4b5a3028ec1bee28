//! openrouteservice HTTP adapter for snapping and isochrones.

use std::time::Duration;

use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};

use crate::error::UpstreamError;
use crate::geo::Coordinate;
use crate::profile::RiderProfile;
use crate::traits::RoutingProvider;

const SERVICE: &str = "openrouteservice";

#[derive(Debug, Clone)]
pub struct OrsConfig {
    pub base_url: String,
    /// Sent verbatim as the `Authorization` header. Checked on first use.
    pub api_key: Option<String>,
    pub snap_timeout_secs: u64,
    pub isochrone_timeout_secs: u64,
}

impl Default for OrsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openrouteservice.org".to_string(),
            api_key: None,
            snap_timeout_secs: 10,
            isochrone_timeout_secs: 20,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OrsClient {
    config: OrsConfig,
    client: reqwest::blocking::Client,
}

impl OrsClient {
    pub fn new(config: OrsConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder().build()?;

        Ok(Self { config, client })
    }

    fn post<B: Serialize>(
        &self,
        endpoint: &str,
        profile: RiderProfile,
        body: &B,
        timeout_secs: u64,
    ) -> Result<reqwest::blocking::Response, UpstreamError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(UpstreamError::MissingApiKey)?;

        let url = format!(
            "{}/v2/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint,
            profile.as_str()
        );

        let response = self
            .client
            .post(url)
            .header(reqwest::header::AUTHORIZATION, api_key)
            .timeout(Duration::from_secs(timeout_secs))
            .json(body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(UpstreamError::Status {
                service: SERVICE,
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}

impl RoutingProvider for OrsClient {
    fn snap(
        &self,
        location: Coordinate,
        profile: RiderProfile,
    ) -> Result<Option<Coordinate>, UpstreamError> {
        let request = SnapRequest {
            locations: [location.to_lon_lat()],
        };

        let body: SnapResponse = self
            .post("snap", profile, &request, self.config.snap_timeout_secs)?
            .json()?;

        let position = body
            .locations
            .unwrap_or_default()
            .into_iter()
            .next()
            .flatten()
            .and_then(|entry| entry.location)
            .filter(|position| !position.is_empty());

        match position {
            Some(position) => Coordinate::from_lon_lat(&position)
                .map(Some)
                .map_err(|err| UpstreamError::Decode {
                    service: SERVICE,
                    message: err.to_string(),
                }),
            None => Ok(None),
        }
    }

    fn isochrones(
        &self,
        location: Coordinate,
        profile: RiderProfile,
        range_secs: f64,
    ) -> Result<FeatureCollection, UpstreamError> {
        let request = IsochroneRequest {
            locations: [location.to_lon_lat()],
            range: [range_secs],
        };

        let text = self
            .post(
                "isochrones",
                profile,
                &request,
                self.config.isochrone_timeout_secs,
            )?
            .text()?;

        serde_json::from_str(&text).map_err(|err| UpstreamError::Decode {
            service: SERVICE,
            message: err.to_string(),
        })
    }
}

#[derive(Debug, Serialize)]
struct SnapRequest {
    locations: [[f64; 2]; 1],
}

#[derive(Debug, Deserialize)]
struct SnapResponse {
    locations: Option<Vec<Option<SnappedLocation>>>,
}

#[derive(Debug, Deserialize)]
struct SnappedLocation {
    location: Option<Vec<f64>>,
}

#[derive(Debug, Serialize)]
struct IsochroneRequest {
    locations: [[f64; 2]; 1],
    range: [f64; 1],
}
