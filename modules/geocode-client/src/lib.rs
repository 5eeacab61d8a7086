//! Reverse geocoding: coordinates in, a human-readable [`Location`] out.
//!
//! Providers implement [`ReverseGeocoder::lookup`], which may fail. Callers
//! use [`ReverseGeocoder::reverse_geocode`], which never does: any failure
//! is logged and replaced by the provider's placeholder location.

pub mod bigdatacloud;
pub mod error;
pub mod nominatim;

pub use bigdatacloud::BigDataCloud;
pub use error::{GeocodeError, Result};
pub use nominatim::Nominatim;

use async_trait::async_trait;
use storyspot_common::Location;
use tracing::warn;

pub const UNKNOWN_CITY: &str = "Unknown City";
pub const UNKNOWN_COUNTRY: &str = "Unknown Country";

#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    fn provider(&self) -> &str;

    /// Query the upstream service.
    async fn lookup(&self, latitude: f64, longitude: f64) -> Result<Location>;

    /// Placeholder returned when `lookup` fails.
    fn fallback(&self, latitude: f64, longitude: f64) -> Location {
        placeholder(latitude, longitude)
    }

    async fn reverse_geocode(&self, latitude: f64, longitude: f64) -> Location {
        match self.lookup(latitude, longitude).await {
            Ok(location) => location,
            Err(e) => {
                warn!(
                    provider = self.provider(),
                    latitude,
                    longitude,
                    error = %e,
                    "Reverse geocoding failed, using placeholder"
                );
                self.fallback(latitude, longitude)
            }
        }
    }
}

/// `Unknown City` / `Unknown Country` with an address built from the raw
/// coordinates.
pub fn placeholder(latitude: f64, longitude: f64) -> Location {
    let location = Location::new(latitude, longitude)
        .with_city(UNKNOWN_CITY)
        .with_country(UNKNOWN_COUNTRY);
    let address = format!("Location at {}", location.coordinates_label());
    location.with_full_address(address)
}

/// Treat blank strings as absent.
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
