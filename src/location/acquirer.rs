//! Single-shot geolocation acquisition.
//!
//! Wraps a device [`LocationProvider`] with the subsystem's only owned
//! timeout and the blocking "acquiring location" indication. One attempt per
//! call; retry policy belongs to the caller.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use super::error::{LocationError, Result};
use super::types::{AcquireOptions, GeolocationReading};

/// Device location sensor abstraction.
///
/// Implementations must honor `max_age_ms`: when it is zero, a cached sample
/// is never served. A provider performs at most one resolution per call and
/// reports typed failures; it does not retry.
pub trait LocationProvider: Send + Sync {
    /// Obtains a single location snapshot under the given constraints.
    fn current_position(
        &self,
        options: &AcquireOptions,
    ) -> impl Future<Output = Result<GeolocationReading>> + Send;
}

/// The blocking "acquiring location" indication shown for the duration of a
/// call to [`GeolocationAcquirer::acquire`].
///
/// `dismiss` is invoked exactly once per acquisition, on every exit path.
pub trait ProgressIndicator: Send + Sync {
    /// Shows the indication.
    fn present(&self);
    /// Hides the indication.
    fn dismiss(&self);
}

/// A [`ProgressIndicator`] that shows nothing.
///
/// For headless callers such as background validation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentIndicator;

impl ProgressIndicator for SilentIndicator {
    fn present(&self) {}
    fn dismiss(&self) {}
}

/// Obtains location snapshots from a device provider under explicit
/// accuracy/timeout constraints.
#[derive(Debug)]
pub struct GeolocationAcquirer<P, I> {
    provider: P,
    indicator: I,
}

impl<P, I> GeolocationAcquirer<P, I>
where
    P: LocationProvider,
    I: ProgressIndicator,
{
    /// Creates an acquirer over a provider and a progress indicator.
    pub const fn new(provider: P, indicator: I) -> Self {
        Self {
            provider,
            indicator,
        }
    }

    /// Acquires a single location snapshot.
    ///
    /// Presents the progress indicator before suspending and dismisses it
    /// exactly once when the call completes, whether by reading, provider
    /// failure or timeout.
    ///
    /// # Errors
    ///
    /// - [`LocationError::Timeout`] if the provider does not resolve within
    ///   `options.timeout_ms`
    /// - [`LocationError::PermissionDenied`] if the device lacks location
    ///   authorization
    /// - [`LocationError::PositionUnavailable`] for any other provider
    ///   failure
    pub async fn acquire(&self, options: &AcquireOptions) -> Result<GeolocationReading> {
        self.indicator.present();
        let _dismiss = DismissOnDrop(&self.indicator);

        debug!(
            timeout_ms = options.timeout_ms,
            high_accuracy = options.high_accuracy,
            "acquiring location fix"
        );

        let deadline = Duration::from_millis(options.timeout_ms);
        match tokio::time::timeout(deadline, self.provider.current_position(options)).await {
            Ok(Ok(reading)) => {
                debug!(
                    accuracy_meters = reading.accuracy_meters,
                    "location fix acquired"
                );
                Ok(reading)
            }
            Ok(Err(err)) => {
                warn!(error = %err, "location acquisition failed");
                Err(err)
            }
            Err(_) => {
                warn!(timeout_ms = options.timeout_ms, "location acquisition timed out");
                Err(LocationError::Timeout {
                    timeout_ms: options.timeout_ms,
                })
            }
        }
    }
}

/// Dismisses the indicator when dropped, covering every exit path once.
struct DismissOnDrop<'a, I: ProgressIndicator>(&'a I);

impl<I: ProgressIndicator> Drop for DismissOnDrop<'_, I> {
    fn drop(&mut self) {
        self.0.dismiss();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        CountingIndicator, FailingLocationProvider, StaticLocationProvider,
        UnresponsiveLocationProvider,
    };

    fn reading() -> GeolocationReading {
        GeolocationReading {
            latitude: 40.0,
            longitude: -74.0,
            accuracy_meters: 3.0,
            timestamp_ms: 1_700_000_000_000,
        }
    }

    #[tokio::test]
    async fn acquire_returns_provider_reading() {
        let acquirer =
            GeolocationAcquirer::new(StaticLocationProvider(reading()), SilentIndicator);
        let result = acquirer.acquire(&AcquireOptions::default()).await.unwrap();
        assert_eq!(result, reading());
    }

    #[tokio::test]
    async fn acquire_dismisses_indicator_once_on_success() {
        let indicator = CountingIndicator::new();

        let acquirer =
            GeolocationAcquirer::new(StaticLocationProvider(reading()), indicator.clone());
        acquirer.acquire(&AcquireOptions::default()).await.unwrap();

        assert_eq!(indicator.presented(), 1);
        assert_eq!(indicator.dismissed(), 1);
    }

    #[tokio::test]
    async fn acquire_dismisses_indicator_once_on_provider_failure() {
        let indicator = CountingIndicator::new();

        let acquirer = GeolocationAcquirer::new(
            FailingLocationProvider(LocationError::PermissionDenied),
            indicator.clone(),
        );
        let err = acquirer
            .acquire(&AcquireOptions::default())
            .await
            .unwrap_err();

        assert_eq!(err, LocationError::PermissionDenied);
        assert_eq!(indicator.dismissed(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn acquire_times_out_when_provider_never_responds() {
        let indicator = CountingIndicator::new();

        let acquirer =
            GeolocationAcquirer::new(UnresponsiveLocationProvider, indicator.clone());
        let err = acquirer
            .acquire(&AcquireOptions::default())
            .await
            .unwrap_err();

        assert_eq!(err, LocationError::Timeout { timeout_ms: 10_000 });
        assert_eq!(indicator.dismissed(), 1);
    }

    #[tokio::test]
    async fn acquire_surfaces_position_unavailable() {
        let provider =
            FailingLocationProvider(LocationError::PositionUnavailable("no signal".to_string()));
        let acquirer = GeolocationAcquirer::new(provider, SilentIndicator);
        let err = acquirer
            .acquire(&AcquireOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, LocationError::PositionUnavailable(_)));
    }
}
