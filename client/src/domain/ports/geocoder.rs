//! Geocoder port trait

use async_trait::async_trait;

use crate::domain::entities::{Coordinates, PostalCode};
use crate::error::GeocodeError;

/// Port trait for reverse geocoding
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Postal code for the given coordinates, if the place has one
    async fn reverse(&self, coordinates: Coordinates) -> Result<Option<PostalCode>, GeocodeError>;
}
