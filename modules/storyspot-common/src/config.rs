use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::info;

use crate::error::StorySpotError;

/// Which generative-text backend serves every enrichment operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Gemini,
    OpenAi,
}

impl FromStr for Backend {
    type Err = StorySpotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gemini" => Ok(Backend::Gemini),
            "openai" => Ok(Backend::OpenAi),
            other => Err(StorySpotError::Config(format!(
                "STORYSPOT_BACKEND must be gemini or openai, got {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeocoderKind {
    Nominatim,
    BigDataCloud,
}

impl FromStr for GeocoderKind {
    type Err = StorySpotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nominatim" => Ok(GeocoderKind::Nominatim),
            "bigdatacloud" => Ok(GeocoderKind::BigDataCloud),
            other => Err(StorySpotError::Config(format!(
                "GEOCODER must be nominatim or bigdatacloud, got {other}"
            ))),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Text generation
    pub backend: Backend,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,

    // Geocoding
    pub geocoder: GeocoderKind,
    pub nominatim_url: String,
    pub bigdatacloud_url: String,

    // Local state
    pub store_path: PathBuf,

    // Prompt shaping
    pub excerpt_chars: usize,

    /// Caller-side timeout for outbound HTTP. `None` waits indefinitely.
    pub http_timeout: Option<Duration>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, StorySpotError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, StorySpotError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let secret = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let excerpt_chars = var("STORYSPOT_EXCERPT_CHARS", "500")
            .parse()
            .map_err(|_| {
                StorySpotError::Config("STORYSPOT_EXCERPT_CHARS must be a number".into())
            })?;

        let http_timeout = match lookup("STORYSPOT_HTTP_TIMEOUT_SECS") {
            Some(raw) => Some(Duration::from_secs(raw.parse().map_err(|_| {
                StorySpotError::Config("STORYSPOT_HTTP_TIMEOUT_SECS must be a number".into())
            })?)),
            None => None,
        };

        Ok(Self {
            backend: var("STORYSPOT_BACKEND", "gemini").parse()?,
            gemini_api_key: secret("GEMINI_API_KEY"),
            gemini_model: var("GEMINI_MODEL", "gemini-1.5-flash-latest"),
            gemini_base_url: var(
                "GEMINI_BASE_URL",
                "https://generativelanguage.googleapis.com/v1beta",
            ),
            openai_api_key: secret("OPENAI_API_KEY"),
            openai_model: var("OPENAI_MODEL", "gpt-3.5-turbo"),
            openai_base_url: var("OPENAI_BASE_URL", "https://api.openai.com/v1"),
            geocoder: var("GEOCODER", "nominatim").parse()?,
            nominatim_url: var("NOMINATIM_URL", "https://nominatim.openstreetmap.org"),
            bigdatacloud_url: var("BIGDATACLOUD_URL", "https://api.bigdatacloud.net"),
            store_path: PathBuf::from(var("STORYSPOT_STORE", ".storyspot/store.json")),
            excerpt_chars,
            http_timeout,
        })
    }

    /// Log the effective configuration without exposing secrets.
    pub fn log_redacted(&self) {
        info!(
            backend = ?self.backend,
            gemini_model = self.gemini_model.as_str(),
            gemini_key = self.gemini_api_key.is_some(),
            openai_model = self.openai_model.as_str(),
            openai_key = self.openai_api_key.is_some(),
            geocoder = ?self.geocoder,
            store = %self.store_path.display(),
            excerpt_chars = self.excerpt_chars,
            "Configuration loaded"
        );
    }
}
