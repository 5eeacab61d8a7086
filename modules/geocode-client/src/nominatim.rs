use async_trait::async_trait;
use serde::Deserialize;
use storyspot_common::Location;
use tracing::debug;

use crate::error::{GeocodeError, Result};
use crate::{present, ReverseGeocoder, UNKNOWN_CITY, UNKNOWN_COUNTRY};

const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
const USER_AGENT: &str = concat!("storyspot/", env!("CARGO_PKG_VERSION"));

/// OpenStreetMap Nominatim reverse lookup at city zoom.
pub struct Nominatim {
    client: reqwest::Client,
    base_url: String,
}

impl Nominatim {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: NOMINATIM_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    display_name: Option<String>,
    address: Option<Address>,
    error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Address {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    state: Option<String>,
    country: Option<String>,
    postcode: Option<String>,
}

impl ReverseResponse {
    fn into_location(self, latitude: f64, longitude: f64) -> Result<Location> {
        if let Some(error) = self.error {
            return Err(GeocodeError::Parse(error));
        }
        let address = self
            .address
            .ok_or_else(|| GeocodeError::Parse("response has no address".into()))?;

        let city = present(address.city)
            .or_else(|| present(address.town))
            .or_else(|| present(address.village))
            .unwrap_or_else(|| UNKNOWN_CITY.to_string());

        let mut location = Location::new(latitude, longitude)
            .with_city(city)
            .with_country(present(address.country).unwrap_or_else(|| UNKNOWN_COUNTRY.to_string()))
            .with_state(present(address.state).unwrap_or_else(|| "Unknown State".to_string()))
            .with_full_address(
                present(self.display_name).unwrap_or_else(|| "Unknown Location".to_string()),
            );
        location.postal_code = present(address.postcode);
        Ok(location)
    }
}

#[async_trait]
impl ReverseGeocoder for Nominatim {
    fn provider(&self) -> &str {
        "nominatim"
    }

    async fn lookup(&self, latitude: f64, longitude: f64) -> Result<Location> {
        let url = format!("{}/reverse", self.base_url);
        debug!(latitude, longitude, "Nominatim reverse request");

        let resp = self
            .client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .query(&[
                ("format", "json".to_string()),
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("zoom", "10".to_string()),
                ("addressdetails", "1".to_string()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(GeocodeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: ReverseResponse = serde_json::from_str(&resp.text().await?)?;
        body.into_location(latitude, longitude)
    }

    fn fallback(&self, latitude: f64, longitude: f64) -> Location {
        crate::placeholder(latitude, longitude)
            .with_state("Unknown State")
            .with_postal_code("")
    }
}
