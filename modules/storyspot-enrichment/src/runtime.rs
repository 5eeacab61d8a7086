//! Process wiring: configuration, persisted store, credentials and the
//! clients built from them.

use std::sync::Arc;

use ai_client::{Gemini, OpenAi, TextGenerator, Unconfigured};
use anyhow::{Context, Result};
use geocode_client::{BigDataCloud, Nominatim, ReverseGeocoder};
use storyspot_common::{
    Backend, Config, CredentialStore, FileStore, GeocoderKind, KeyValueStore, Service,
};
use tracing::{info, warn};

use crate::enricher::Enricher;
use crate::features::AiFeatures;

pub struct StorySpot {
    config: Config,
    http: reqwest::Client,
    store: Arc<dyn KeyValueStore>,
    credentials: Arc<CredentialStore>,
}

impl StorySpot {
    /// Open the file store named by `config` and seed credentials from it.
    pub fn init(config: Config) -> Result<Self> {
        let store = Arc::new(FileStore::new(config.store_path.clone()));
        Self::with_store(config, store)
    }

    pub fn with_store(config: Config, store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.http_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        let credentials = Arc::new(CredentialStore::new(store.clone()));
        for (service, key) in [
            (Service::Gemini, config.gemini_api_key.as_deref()),
            (Service::OpenAi, config.openai_api_key.as_deref()),
        ] {
            if let Err(e) = credentials.seed(service, key) {
                warn!(%service, error = %e, "Ignoring API key from environment");
            }
        }

        Ok(Self {
            config,
            http,
            store,
            credentials,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn credentials(&self) -> &Arc<CredentialStore> {
        &self.credentials
    }

    pub fn features(&self) -> AiFeatures {
        AiFeatures::load(self.store.as_ref())
    }

    /// The configured backend, or [`Unconfigured`] when its credential is
    /// missing. Built per call so a key set mid-session takes effect.
    pub fn text_generator(&self) -> Arc<dyn TextGenerator> {
        let service = match self.config.backend {
            Backend::Gemini => Service::Gemini,
            Backend::OpenAi => Service::OpenAi,
        };

        let Some(key) = self.credentials.get(service) else {
            info!(%service, "No API key configured, enrichment will use fallbacks");
            return Arc::new(Unconfigured::new(service.name()));
        };

        match self.config.backend {
            Backend::Gemini => Arc::new(
                Gemini::new(key, self.config.gemini_model.as_str())
                    .with_base_url(self.config.gemini_base_url.as_str())
                    .with_http_client(self.http.clone()),
            ),
            Backend::OpenAi => Arc::new(
                OpenAi::new(key, self.config.openai_model.as_str())
                    .with_base_url(self.config.openai_base_url.as_str())
                    .with_http_client(self.http.clone()),
            ),
        }
    }

    pub fn enricher(&self) -> Enricher {
        Enricher::new(self.text_generator())
            .with_excerpt_chars(self.config.excerpt_chars)
            .with_features(self.features())
    }

    pub fn geocoder(&self) -> Box<dyn ReverseGeocoder> {
        match self.config.geocoder {
            GeocoderKind::Nominatim => Box::new(
                Nominatim::new(self.http.clone()).with_base_url(&self.config.nominatim_url),
            ),
            GeocoderKind::BigDataCloud => Box::new(
                BigDataCloud::new(self.http.clone()).with_base_url(&self.config.bigdatacloud_url),
            ),
        }
    }
}
