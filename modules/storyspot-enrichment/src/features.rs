//! Per-feature AI toggles, persisted under [`FEATURES_KEY`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use storyspot_common::store::{load_json, save_json, FEATURES_KEY};
use storyspot_common::{KeyValueStore, StorySpotError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AiFeatures {
    pub story_prompts: bool,
    pub sentiment_analysis: bool,
    pub story_tagging: bool,
    pub recommendations: bool,
    pub location_insights: bool,
}

impl Default for AiFeatures {
    fn default() -> Self {
        Self {
            story_prompts: true,
            sentiment_analysis: true,
            story_tagging: true,
            recommendations: true,
            location_insights: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    StoryPrompts,
    SentimentAnalysis,
    StoryTagging,
    Recommendations,
    LocationInsights,
}

impl Feature {
    pub const ALL: [Feature; 5] = [
        Feature::StoryPrompts,
        Feature::SentimentAnalysis,
        Feature::StoryTagging,
        Feature::Recommendations,
        Feature::LocationInsights,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::StoryPrompts => "prompts",
            Feature::SentimentAnalysis => "sentiment",
            Feature::StoryTagging => "tags",
            Feature::Recommendations => "recommendations",
            Feature::LocationInsights => "insights",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Feature {
    type Err = StorySpotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "prompts" | "storyprompts" => Ok(Feature::StoryPrompts),
            "sentiment" | "sentimentanalysis" => Ok(Feature::SentimentAnalysis),
            "tags" | "tagging" | "storytagging" => Ok(Feature::StoryTagging),
            "recommendations" => Ok(Feature::Recommendations),
            "insights" | "locationinsights" => Ok(Feature::LocationInsights),
            other => Err(StorySpotError::Validation(format!(
                "unknown feature: {other}"
            ))),
        }
    }
}

impl AiFeatures {
    /// Stored toggles, or all-enabled when nothing valid is stored.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        load_json(store, FEATURES_KEY).unwrap_or_default()
    }

    pub fn save(&self, store: &dyn KeyValueStore) -> Result<(), StorySpotError> {
        save_json(store, FEATURES_KEY, self)
    }

    pub fn is_enabled(&self, feature: Feature) -> bool {
        *self.flag(feature)
    }

    pub fn set(&mut self, feature: Feature, enabled: bool) {
        *self.flag_mut(feature) = enabled;
    }

    pub fn enable(&mut self, feature: Feature) {
        self.set(feature, true);
    }

    pub fn disable(&mut self, feature: Feature) {
        self.set(feature, false);
    }

    fn flag(&self, feature: Feature) -> &bool {
        match feature {
            Feature::StoryPrompts => &self.story_prompts,
            Feature::SentimentAnalysis => &self.sentiment_analysis,
            Feature::StoryTagging => &self.story_tagging,
            Feature::Recommendations => &self.recommendations,
            Feature::LocationInsights => &self.location_insights,
        }
    }

    fn flag_mut(&mut self, feature: Feature) -> &mut bool {
        match feature {
            Feature::StoryPrompts => &mut self.story_prompts,
            Feature::SentimentAnalysis => &mut self.sentiment_analysis,
            Feature::StoryTagging => &mut self.story_tagging,
            Feature::Recommendations => &mut self.recommendations,
            Feature::LocationInsights => &mut self.location_insights,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storyspot_common::MemoryStore;

    #[test]
    fn defaults_to_everything_enabled() {
        let store = MemoryStore::new();
        let features = AiFeatures::load(&store);
        assert!(Feature::ALL.iter().all(|f| features.is_enabled(*f)));
    }

    #[test]
    fn toggles_persist() {
        let store = MemoryStore::new();
        let mut features = AiFeatures::load(&store);
        features.disable(Feature::Recommendations);
        features.save(&store).unwrap();

        let reloaded = AiFeatures::load(&store);
        assert!(!reloaded.is_enabled(Feature::Recommendations));
        assert!(reloaded.is_enabled(Feature::StoryTagging));

        let raw = store.get(FEATURES_KEY).unwrap().unwrap();
        assert!(raw.contains("\"recommendations\":false"));
        assert!(raw.contains("\"sentimentAnalysis\":true"));
    }

    #[test]
    fn partial_or_corrupt_record_is_tolerated() {
        let store = MemoryStore::new();
        store
            .set(FEATURES_KEY, r#"{"storyTagging":false}"#)
            .unwrap();
        let features = AiFeatures::load(&store);
        assert!(!features.story_tagging);
        assert!(features.location_insights);

        store.set(FEATURES_KEY, "nope").unwrap();
        assert_eq!(AiFeatures::load(&store), AiFeatures::default());
    }

    #[test]
    fn feature_names_parse() {
        assert_eq!("tags".parse::<Feature>().unwrap(), Feature::StoryTagging);
        assert_eq!("Insights".parse::<Feature>().unwrap(), Feature::LocationInsights);
        assert!("weather".parse::<Feature>().is_err());
    }
}
