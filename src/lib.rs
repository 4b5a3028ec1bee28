//! cycle-reach core
//!
//! Cycling reachability polygons and nearby healthcare facilities for a
//! clicked map point, backed by openrouteservice and the Overpass API.

pub mod config;
pub mod error;
pub mod geo;
pub mod http;
pub mod logging;
pub mod ors;
pub mod overpass;
pub mod profile;
pub mod reach;
pub mod traits;
