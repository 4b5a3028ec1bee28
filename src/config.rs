//! Service configuration from environment variables.
//!
//! Nothing is validated at startup. A missing `ORS_API_KEY` only surfaces
//! when the first isochrone request needs it.

use std::str::FromStr;

use crate::logging::{LogFormat, LoggingConfig};
use crate::ors::OrsConfig;
use crate::overpass::OverpassConfig;

pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub ors: OrsConfig,
    pub overpass: OverpassConfig,
    pub logging: LoggingConfig,
    pub port: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            ors: OrsConfig::default(),
            overpass: OverpassConfig::default(),
            logging: LoggingConfig::default(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Unparseable numbers keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let ors = OrsConfig {
            base_url: lookup("ORS_BASE_URL").unwrap_or(defaults.ors.base_url),
            api_key: lookup("ORS_API_KEY").filter(|key| !key.trim().is_empty()),
            snap_timeout_secs: parsed(&lookup, "ORS_SNAP_TIMEOUT_SECS")
                .unwrap_or(defaults.ors.snap_timeout_secs),
            isochrone_timeout_secs: parsed(&lookup, "ORS_ISOCHRONE_TIMEOUT_SECS")
                .unwrap_or(defaults.ors.isochrone_timeout_secs),
        };

        let overpass = OverpassConfig {
            url: lookup("OVERPASS_URL").unwrap_or(defaults.overpass.url),
            query_timeout_secs: parsed(&lookup, "OVERPASS_QUERY_TIMEOUT_SECS")
                .unwrap_or(defaults.overpass.query_timeout_secs),
            http_timeout_secs: parsed(&lookup, "OVERPASS_HTTP_TIMEOUT_SECS")
                .unwrap_or(defaults.overpass.http_timeout_secs),
        };

        let logging = LoggingConfig {
            format: lookup("LOG_FORMAT")
                .map(|value| LogFormat::parse(&value))
                .unwrap_or(defaults.logging.format),
            level: lookup("RUST_LOG").unwrap_or(defaults.logging.level),
        };

        Self {
            ors,
            overpass,
            logging,
            port: parsed(&lookup, "SERVICE_PORT").unwrap_or(defaults.port),
        }
    }
}

fn parsed<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key).and_then(|value| value.trim().parse().ok())
}
