//! Device geolocation acquisition.
//!
//! Provides single-shot location snapshots under explicit accuracy and
//! timeout constraints:
//! - [`AcquireOptions`] with a fresh-fix default (no cached samples, 10 s
//!   deadline, high accuracy)
//! - [`GeolocationAcquirer`] suspending the caller until the device
//!   [`LocationProvider`] resolves or the deadline elapses
//! - A [`ProgressIndicator`] contract guaranteeing the blocking "acquiring
//!   location" indication is dismissed exactly once per call
//!
//! Acquisition never retries internally; every failure surfaces once as a
//! typed [`LocationError`] and the caller decides whether the user tries
//! again.

pub mod acquirer;
pub mod error;
pub mod types;

pub use acquirer::{GeolocationAcquirer, LocationProvider, ProgressIndicator, SilentIndicator};
pub use error::LocationError;
pub use types::{AcquireOptions, GeolocationReading};
