//! Local substitutes for every enrichment result.
//!
//! Used when the text backend fails, has no credential, or the feature is
//! switched off. Template choice is random; everything else is fixed.

use rand::Rng;
use storyspot_common::{
    Intensity, Location, LocationInsights, RecommendationList, Sentiment, SentimentResult,
    TagList,
};

const THIS_PLACE: &str = "this place";

fn pick<const N: usize>(options: [String; N]) -> String {
    let idx = rand::rng().random_range(0..N);
    options.into_iter().nth(idx).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Story prompt
// ---------------------------------------------------------------------------

pub fn story_prompt_options(location: &Location) -> [String; 3] {
    [
        format!(
            "Write a story inspired by the hidden stories of {}",
            location.city_or(THIS_PLACE)
        ),
        format!(
            "Explore an unexpected adventure in {}",
            location.country_or("this location")
        ),
        "Uncover a secret that connects you to this geographical point".to_string(),
    ]
}

pub fn story_prompt(location: &Location) -> String {
    pick(story_prompt_options(location))
}

// ---------------------------------------------------------------------------
// Story analysis
// ---------------------------------------------------------------------------

pub fn sentiment() -> SentimentResult {
    SentimentResult {
        overall_sentiment: Sentiment::Neutral,
        emotional_intensity: Intensity::Low,
        primary_emotions: vec!["curiosity".to_string()],
        themes: vec!["exploration".to_string()],
    }
}

pub fn story_tags() -> TagList {
    ["adventure", "travel", "personal", "location"]
        .into_iter()
        .map(String::from)
        .collect()
}

pub fn recommendations() -> RecommendationList {
    [
        "Stories of unexpected journeys",
        "Personal transformations in unknown places",
        "Hidden local histories",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

// ---------------------------------------------------------------------------
// Location insights
// ---------------------------------------------------------------------------

pub fn historical_context_options(location: &Location) -> [String; 3] {
    let city = location.city_or(THIS_PLACE);
    [
        format!("{city} has a rich and diverse history spanning centuries of cultural development."),
        format!("The region around {city} has been home to various civilizations and communities throughout history."),
        format!("{city}'s past is marked by significant transformations and resilient communities."),
    ]
}

pub fn historical_context(location: &Location) -> String {
    pick(historical_context_options(location))
}

pub fn cultural_insights_options(location: &Location) -> [String; 3] {
    let city = location.city_or(THIS_PLACE);
    [
        format!("{city} is known for its unique blend of traditional and modern cultural practices."),
        format!("The local culture in {city} is characterized by hospitality, artistic expression, and community spirit."),
        format!("Diverse cultural traditions thrive in {city}, creating a vibrant and dynamic social landscape."),
    ]
}

pub fn cultural_insights(location: &Location) -> String {
    pick(cultural_insights_options(location))
}

pub fn natural_features_options(location: &Location) -> [String; 3] {
    let city = location.city_or(THIS_PLACE);
    [
        format!("The area around {city} features a diverse and fascinating natural landscape."),
        format!("{city}'s surrounding environment offers a mix of geographical features that support rich biodiversity."),
        format!("The natural terrain near {city} presents a unique ecological setting with varied landscapes."),
    ]
}

pub fn natural_features(location: &Location) -> String {
    pick(natural_features_options(location))
}

/// Per-field canned insights.
pub fn location_insights(location: &Location) -> LocationInsights {
    LocationInsights {
        historical_context: historical_context(location),
        cultural_significance: cultural_insights(location),
        natural_features: natural_features(location),
    }
}

/// Fixed triple used when the concurrent insight join itself breaks down.
pub fn insights_unavailable() -> LocationInsights {
    LocationInsights {
        historical_context: "Historical information not available.".to_string(),
        cultural_significance: "Cultural details pending research.".to_string(),
        natural_features: "Geographical description unavailable.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lisbon() -> Location {
        Location::new(38.7223, -9.1393)
            .with_city("Lisbon")
            .with_country("Portugal")
    }

    #[test]
    fn story_prompt_is_one_of_the_templates() {
        let loc = lisbon();
        let options = story_prompt_options(&loc);
        for _ in 0..20 {
            assert!(options.contains(&story_prompt(&loc)));
        }
        assert!(options[0].contains("Lisbon"));
        assert!(options[1].contains("Portugal"));
    }

    #[test]
    fn story_prompt_without_names() {
        let options = story_prompt_options(&Location::new(0.0, 0.0));
        assert!(options[0].ends_with("hidden stories of this place"));
        assert!(options[1].ends_with("adventure in this location"));
    }

    #[test]
    fn insights_are_keyed_by_city() {
        let loc = lisbon();
        let insights = location_insights(&loc);
        assert!(historical_context_options(&loc).contains(&insights.historical_context));
        assert!(cultural_insights_options(&loc).contains(&insights.cultural_significance));
        assert!(natural_features_options(&loc).contains(&insights.natural_features));
        assert!(insights.historical_context.contains("Lisbon"));
    }

    #[test]
    fn fixed_fallbacks() {
        let s = sentiment();
        assert_eq!(s.overall_sentiment, Sentiment::Neutral);
        assert_eq!(s.emotional_intensity, Intensity::Low);
        assert_eq!(s.primary_emotions, vec!["curiosity"]);
        assert_eq!(story_tags(), vec!["adventure", "travel", "personal", "location"]);
        assert_eq!(recommendations().len(), 3);
    }
}
