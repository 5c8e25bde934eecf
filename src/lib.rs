//! SiteClock Core Library
//!
//! Geofence management and geolocation validation for worksite clock-in.
//! This crate provides the Rust implementation for core SiteClock
//! operations: the geofence point registry, map render synchronization,
//! single-shot location acquisition and the inside/outside clock-in
//! decision.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![deny(unsafe_code)]

mod api;
pub mod clockin;
pub mod geo;
pub mod location;
pub mod map;
pub mod worksite;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use api::{SessionError, WorksiteSession, FRAMING_BEARINGS, FRAMING_RADIUS_METERS};
