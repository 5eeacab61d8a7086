//! Instruction prompts sent to the text backend.

use storyspot_common::Location;

const UNKNOWN: &str = "Unknown";

pub fn story_prompt(location: &Location) -> String {
    format!(
        "Create a unique, engaging story prompt based on these location details:\n\
         Latitude: {lat},\n\
         Longitude: {lng},\n\
         City: {city},\n\
         Country: {country}\n\n\
         The story should:\n\
         - Be inspired by the location's unique characteristics\n\
         - Include a compelling narrative hook\n\
         - Suggest an emotional journey\n\
         - Provide creative writing guidance",
        lat = location.latitude,
        lng = location.longitude,
        city = location.city_or(UNKNOWN),
        country = location.country_or(UNKNOWN),
    )
}

pub fn sentiment(excerpt: &str) -> String {
    format!(
        "Perform a detailed sentiment and emotional tone analysis of the following text.\n\
         Provide a comprehensive breakdown including:\n\
         - Overall sentiment (Positive/Negative/Neutral)\n\
         - Emotional intensity (Low/Medium/High)\n\
         - Primary emotions detected\n\
         - Potential underlying themes\n\n\
         Text to analyze:\n\
         {excerpt}"
    )
}

pub fn story_tags(excerpt: &str, location: &Location) -> String {
    format!(
        "Generate a comprehensive set of tags for a story based on its content and location context.\n\
         Provide tags that capture:\n\
         - Story genre\n\
         - Emotional themes\n\
         - Location-based keywords\n\
         - Narrative style\n\n\
         Location: {city}, {country}\n\
         Story Excerpt: {excerpt}",
        city = location.city_or(UNKNOWN),
        country = location.country_or(UNKNOWN),
    )
}

pub fn recommendations(excerpt: &str, location: &Location) -> String {
    format!(
        "Based on this story and its location, recommend similar stories or themes that a user might enjoy:\n\n\
         Story Excerpt: {excerpt}\n\
         Location: {city}, {country}\n\n\
         Provide:\n\
         - 3-4 thematic recommendations\n\
         - Brief explanation for each recommendation\n\
         - Potential emotional connections",
        city = location.city_or(UNKNOWN),
        country = location.country_or(UNKNOWN),
    )
}

pub fn historical_context(location: &Location) -> String {
    format!(
        "Provide a brief 2-3 sentence historical overview of {city}, {country}. \
         Focus on key historical events or periods.",
        city = location.city_or(UNKNOWN),
        country = location.country_or(UNKNOWN),
    )
}

pub fn cultural_insights(location: &Location) -> String {
    format!(
        "Describe the unique cultural aspects of {city}, {country} in 2-3 sentences.",
        city = location.city_or(UNKNOWN),
        country = location.country_or(UNKNOWN),
    )
}

pub fn natural_features(location: &Location) -> String {
    format!(
        "Describe the natural landscape and geographical features around {city}, {country} in 2-3 sentences.",
        city = location.city_or(UNKNOWN),
        country = location.country_or(UNKNOWN),
    )
}
