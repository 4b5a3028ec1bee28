//! Test fixtures for cycle-reach.
//!
//! - Dorset locations around the default map centre
//! - Provider response bodies shaped like openrouteservice and Overpass
//! - In-memory providers that record what the core asked for

#![allow(dead_code)]

pub mod dorset_locations;
pub mod mocks;
pub mod responses;

pub use dorset_locations::*;
pub use mocks::*;
pub use responses::*;
