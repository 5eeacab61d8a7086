//! Story assembly: a user draft plus its location, enriched into a [`Story`].

use chrono::Utc;
use serde::{Deserialize, Serialize};
use storyspot_common::{Location, Story, StoryAi, StorySpotError};
use tracing::info;
use uuid::Uuid;

use crate::enricher::Enricher;

pub const DEFAULT_IMAGE: &str = "default-story-image.jpg";

const MISSING_FIELDS: &str = "Please provide both a title and description for your story.";

/// What the user typed into the story form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoryDraft {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl StoryDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn validate(&self) -> Result<(), StorySpotError> {
        if self.title.trim().is_empty() || self.description.trim().is_empty() {
            return Err(StorySpotError::Validation(MISSING_FIELDS.to_string()));
        }
        Ok(())
    }
}

impl Enricher {
    /// Validate `draft` and run every enrichment it needs concurrently.
    /// Only validation can fail; enrichment always completes.
    pub async fn compose_story(
        &self,
        draft: StoryDraft,
        location: Location,
    ) -> Result<Story, StorySpotError> {
        draft.validate()?;

        let (sentiment, tags, recommendations, location_insights) = futures::join!(
            self.analyze_sentiment(&draft.description),
            self.generate_story_tags(&draft.description, &location),
            self.recommend_similar_stories(&draft.description, &location),
            self.generate_location_insights(&location),
        );

        let story = Story {
            id: Uuid::new_v4(),
            title: draft.title,
            description: draft.description,
            image: draft
                .image
                .filter(|image| !image.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
            location,
            location_insights,
            ai: StoryAi {
                sentiment,
                tags,
                recommendations,
            },
            timestamp: Utc::now(),
        };

        info!(story_id = %story.id, tags = story.ai.tags.len(), "Story composed");
        Ok(story)
    }
}

/// Stories created during this session. Nothing here is persisted.
#[derive(Debug, Default)]
pub struct StoryCollection {
    stories: Vec<Story>,
}

impl StoryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, story: Story) {
        self.stories.push(story);
    }

    pub fn get(&self, id: Uuid) -> Option<&Story> {
        self.stories.iter().find(|story| story.id == id)
    }

    /// Newest first.
    pub fn list(&self) -> Vec<&Story> {
        let mut stories: Vec<&Story> = self.stories.iter().collect();
        stories.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        stories
    }

    pub fn len(&self) -> usize {
        self.stories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }
}
