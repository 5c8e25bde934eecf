//! Error types for geofence registry operations.

use thiserror::Error;

use crate::geo::GeoError;

/// Error type for registry operations.
///
/// Validation failures are raised before any store call (fail fast, no
/// partial mutation). `CreateFailed` implies the optimistic draft was rolled
/// back; `DeleteFailed` implies the local removal was kept and the next
/// `load` reconciles.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    /// Bad name or radius on draft creation.
    #[error("invalid clock-in point: {0}")]
    Validation(String),

    /// Out-of-range center coordinate.
    #[error(transparent)]
    InvalidCoordinate(#[from] GeoError),

    /// No worksite has been loaded into the registry.
    #[error("no worksite loaded")]
    WorksiteNotLoaded,

    /// A create is already pending for this worksite.
    #[error("another clock-in point is still being created")]
    CreateInProgress,

    /// The store rejected or failed the create; the draft was rolled back.
    #[error("failed to create clock-in point: {0}")]
    CreateFailed(String),

    /// The store failed the delete; the local removal stands.
    #[error("failed to delete clock-in point: {0}")]
    DeleteFailed(String),

    /// The store failed while loading worksite data.
    #[error("failed to load worksite data: {0}")]
    LoadFailed(String),
}

/// Result type alias for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_display() {
        let err = RegistryError::Validation("name too short".to_string());
        assert_eq!(err.to_string(), "invalid clock-in point: name too short");
    }

    #[test]
    fn create_in_progress_error_display() {
        assert_eq!(
            RegistryError::CreateInProgress.to_string(),
            "another clock-in point is still being created"
        );
    }

    #[test]
    fn create_failed_error_display() {
        let err = RegistryError::CreateFailed("duplicate name".to_string());
        assert_eq!(
            err.to_string(),
            "failed to create clock-in point: duplicate name"
        );
    }

    #[test]
    fn invalid_coordinate_converts_from_geo_error() {
        let geo = GeoError::InvalidCoordinate {
            latitude: 91.0,
            longitude: 0.0,
        };
        let err: RegistryError = geo.clone().into();
        assert_eq!(err, RegistryError::InvalidCoordinate(geo));
    }
}
