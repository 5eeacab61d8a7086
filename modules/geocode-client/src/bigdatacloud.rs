use async_trait::async_trait;
use serde::Deserialize;
use storyspot_common::Location;
use tracing::debug;

use crate::error::{GeocodeError, Result};
use crate::{present, ReverseGeocoder, UNKNOWN_CITY, UNKNOWN_COUNTRY};

const BIGDATACLOUD_URL: &str = "https://api.bigdatacloud.net";

/// BigDataCloud's keyless client-side reverse geocoder.
pub struct BigDataCloud {
    client: reqwest::Client,
    base_url: String,
}

impl BigDataCloud {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: BIGDATACLOUD_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReverseResponse {
    locality: Option<String>,
    country_name: Option<String>,
    principal_subdivision: Option<String>,
    postcode: Option<String>,
}

impl ReverseResponse {
    fn into_location(self, latitude: f64, longitude: f64) -> Location {
        let city = present(self.locality).unwrap_or_else(|| UNKNOWN_CITY.to_string());
        let country = present(self.country_name).unwrap_or_else(|| UNKNOWN_COUNTRY.to_string());
        let address = format!("{city}, {country}");

        let mut location = Location::new(latitude, longitude)
            .with_city(city)
            .with_country(country)
            .with_full_address(address);
        location.state = present(self.principal_subdivision);
        location.postal_code = present(self.postcode);
        location
    }
}

#[async_trait]
impl ReverseGeocoder for BigDataCloud {
    fn provider(&self) -> &str {
        "bigdatacloud"
    }

    async fn lookup(&self, latitude: f64, longitude: f64) -> Result<Location> {
        let url = format!("{}/data/reverse-geocode-client", self.base_url);
        debug!(latitude, longitude, "BigDataCloud reverse request");

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("localityLanguage", "en".to_string()),
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
        Ok(body.into_location(latitude, longitude))
    }
}
