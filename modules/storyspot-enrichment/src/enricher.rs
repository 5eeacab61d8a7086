//! Story enrichment: prompt generation and story analysis.
//!
//! Every operation is fail-open. A backend error, a missing credential or a
//! blank response is logged and replaced by the matching canned result from
//! [`crate::fallback`]. Callers never see an error.

use std::sync::Arc;

use ai_client::util::{excerpt, truncate_to_char_boundary};
use ai_client::TextGenerator;
use storyspot_common::{Location, RecommendationList, SentimentResult, TagList};
use tracing::{debug, warn};

use crate::features::{AiFeatures, Feature};
use crate::{fallback, parsers, prompts};

/// Default number of story characters forwarded in analysis prompts.
pub const DEFAULT_EXCERPT_CHARS: usize = 500;

#[derive(Clone)]
pub struct Enricher {
    generator: Arc<dyn TextGenerator>,
    excerpt_chars: usize,
    features: AiFeatures,
}

impl Enricher {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            excerpt_chars: DEFAULT_EXCERPT_CHARS,
            features: AiFeatures::default(),
        }
    }

    pub fn with_excerpt_chars(mut self, excerpt_chars: usize) -> Self {
        self.excerpt_chars = excerpt_chars;
        self
    }

    /// Disabled features skip the backend and yield their fallback.
    pub fn with_features(mut self, features: AiFeatures) -> Self {
        self.features = features;
        self
    }

    pub fn provider(&self) -> &str {
        self.generator.provider()
    }

    /// One attempt against the backend, trimmed. `None` when the feature is
    /// off, on error, or on blank output.
    pub(crate) async fn call(
        &self,
        feature: Feature,
        operation: &'static str,
        prompt: &str,
    ) -> Option<String> {
        if !self.features.is_enabled(feature) {
            debug!(operation, %feature, "Feature disabled, using fallback");
            return None;
        }

        match self.generator.generate(prompt).await {
            Ok(text) if !text.trim().is_empty() => {
                debug!(
                    operation,
                    provider = self.generator.provider(),
                    preview = truncate_to_char_boundary(&text, 120),
                    "Generated text"
                );
                Some(text.trim().to_string())
            }
            Ok(_) => {
                warn!(
                    operation,
                    provider = self.generator.provider(),
                    "Backend returned empty text, using fallback"
                );
                None
            }
            Err(e) => {
                warn!(
                    operation,
                    provider = self.generator.provider(),
                    error = %e,
                    "Generation failed, using fallback"
                );
                None
            }
        }
    }

    fn excerpt<'a>(&self, story_text: &'a str) -> &'a str {
        excerpt(story_text, self.excerpt_chars)
    }

    /// A creative writing prompt anchored to `location`. The generated text
    /// is returned as-is apart from surrounding whitespace.
    pub async fn generate_story_prompt(&self, location: &Location) -> String {
        let prompt = prompts::story_prompt(location);
        match self.call(Feature::StoryPrompts, "story_prompt", &prompt).await {
            Some(text) => text,
            None => fallback::story_prompt(location),
        }
    }

    pub async fn analyze_sentiment(&self, story_text: &str) -> SentimentResult {
        let prompt = prompts::sentiment(self.excerpt(story_text));
        match self.call(Feature::SentimentAnalysis, "sentiment", &prompt).await {
            Some(text) => parsers::parse_sentiment(&text),
            None => fallback::sentiment(),
        }
    }

    pub async fn generate_story_tags(&self, story_text: &str, location: &Location) -> TagList {
        let prompt = prompts::story_tags(self.excerpt(story_text), location);
        match self.call(Feature::StoryTagging, "story_tags", &prompt).await {
            Some(text) => parsers::parse_tags(&text),
            None => fallback::story_tags(),
        }
    }

    pub async fn recommend_similar_stories(
        &self,
        story_text: &str,
        location: &Location,
    ) -> RecommendationList {
        let prompt = prompts::recommendations(self.excerpt(story_text), location);
        match self.call(Feature::Recommendations, "recommendations", &prompt).await {
            Some(text) => parsers::parse_recommendations(&text),
            None => fallback::recommendations(),
        }
    }
}
