use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// --- Geo Types ---

/// Map center used when the user has not chosen a point.
pub const DEFAULT_CENTER: (f64, f64) = (20.5937, 78.9629);

/// A point on the map plus whatever place description is known for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_address: Option<String>,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            city: None,
            country: None,
            state: None,
            postal_code: None,
            full_address: None,
        }
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn with_postal_code(mut self, postal_code: impl Into<String>) -> Self {
        self.postal_code = Some(postal_code.into());
        self
    }

    pub fn with_full_address(mut self, address: impl Into<String>) -> Self {
        self.full_address = Some(address.into());
        self
    }

    /// The fixed map center, labelled as India.
    pub fn default_center() -> Self {
        Self::new(DEFAULT_CENTER.0, DEFAULT_CENTER.1)
            .with_country("India")
            .with_full_address("India")
    }

    /// City name, or `default` when unknown or blank.
    pub fn city_or<'a>(&'a self, default: &'a str) -> &'a str {
        non_blank(self.city.as_deref()).unwrap_or(default)
    }

    /// Country name, or `default` when unknown or blank.
    pub fn country_or<'a>(&'a self, default: &'a str) -> &'a str {
        non_blank(self.country.as_deref()).unwrap_or(default)
    }

    /// Coordinates rounded to four decimals, e.g. `"38.7223, -9.1393"`.
    pub fn coordinates_label(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.trim().is_empty())
}

// --- Sentiment ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentResult {
    pub overall_sentiment: Sentiment,
    pub emotional_intensity: Intensity,
    /// At most three labels.
    pub primary_emotions: Vec<String>,
    /// At most three labels.
    pub themes: Vec<String>,
}

/// Up to ten lowercase tags.
pub type TagList = Vec<String>;

/// Up to four recommendation lines.
pub type RecommendationList = Vec<String>;

// --- Location insights ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationInsights {
    pub historical_context: String,
    pub cultural_significance: String,
    pub natural_features: String,
}

// --- Story ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryAi {
    pub sentiment: SentimentResult,
    pub tags: TagList,
    pub recommendations: RecommendationList,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image: String,
    pub location: Location,
    pub location_insights: LocationInsights,
    pub ai: StoryAi,
    pub timestamp: DateTime<Utc>,
}
