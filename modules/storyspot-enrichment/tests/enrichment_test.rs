use std::collections::HashMap;
use std::sync::Arc;

use ai_client::TextGenerator;
use geocode_client::ReverseGeocoder;
use serde_json::json;
use storyspot_common::{
    Config, FileStore, Intensity, KeyValueStore, MemoryStore, Sentiment, Service,
};
use storyspot_enrichment::testing::{GEMINI_TEST_KEY, LISBON, OPENAI_TEST_KEY};
use storyspot_enrichment::{fallback, session, Feature, StoryDraft, StorySpot};
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GEMINI_PATH: &str = "/models/gemini-1.5-flash-latest:generateContent";

fn config(pairs: &[(&str, String)]) -> Config {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect();
    Config::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

fn gemini_config(server: &MockServer) -> Config {
    config(&[
        ("GEMINI_API_KEY", GEMINI_TEST_KEY.to_string()),
        ("GEMINI_BASE_URL", server.uri()),
        ("NOMINATIM_URL", server.uri()),
    ])
}

fn candidate(text: &str) -> serde_json::Value {
    json!({ "candidates": [{ "content": { "parts": [{ "text": text }] } }] })
}

async fn mount_gemini(server: &MockServer, needle: &str, text: &str) {
    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .and(query_param("key", GEMINI_TEST_KEY))
        .and(body_string_contains(needle))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate(text)))
        .mount(server)
        .await;
}

async fn mount_lisbon_geocode(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "display_name": "Lisboa, Portugal",
            "address": { "city": "Lisboa", "state": "Lisboa", "country": "Portugal" }
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn lisbon_story_over_gemini() {
    let server = MockServer::start().await;
    mount_lisbon_geocode(&server).await;
    mount_gemini(
        &server,
        "sentiment and emotional tone",
        "Overall sentiment: Positive. Emotional intensity: moderate. Primary emotions: joy, love. Themes: discovery, connection.",
    )
    .await;
    mount_gemini(
        &server,
        "comprehensive set of tags",
        "Genre: Travel memoir\nMood: Nostalgic\nSetting: Lisboa",
    )
    .await;
    mount_gemini(
        &server,
        "recommend similar stories",
        "1. Tales of the Alfama\n2. River crossings\n3. Letters never sent",
    )
    .await;
    mount_gemini(&server, "historical overview", "Founded long before Rome.").await;
    mount_gemini(&server, "cultural aspects", "Fado drifts from every tavern.").await;
    mount_gemini(&server, "natural landscape", "Seven hills above the Tagus.").await;

    let app = StorySpot::with_store(gemini_config(&server), Arc::new(MemoryStore::new())).unwrap();
    let location = app.geocoder().reverse_geocode(LISBON.0, LISBON.1).await;
    assert_eq!(location.city.as_deref(), Some("Lisboa"));

    let story = app
        .enricher()
        .compose_story(
            StoryDraft::new("Tram 28", "We rode the old tram up the hill at dusk."),
            location,
        )
        .await
        .unwrap();

    assert_eq!(story.ai.sentiment.overall_sentiment, Sentiment::Positive);
    assert_eq!(story.ai.sentiment.emotional_intensity, Intensity::Medium);
    assert_eq!(story.ai.sentiment.primary_emotions, vec!["joy", "love"]);
    assert_eq!(story.ai.sentiment.themes, vec!["discovery", "connection"]);
    assert_eq!(
        story.ai.tags,
        vec!["genre", "travel memoir", "mood", "nostalgic", "setting", "lisboa"]
    );
    assert_eq!(
        story.ai.recommendations,
        vec!["Tales of the Alfama", "River crossings", "Letters never sent"]
    );
    assert_eq!(story.location_insights.historical_context, "Founded long before Rome.");
    assert_eq!(story.location_insights.cultural_significance, "Fado drifts from every tavern.");
    assert_eq!(story.location_insights.natural_features, "Seven hills above the Tagus.");

    let json = serde_json::to_value(&story).unwrap();
    assert_eq!(json["locationInsights"]["naturalFeatures"], "Seven hills above the Tagus.");
    assert_eq!(json["ai"]["sentiment"]["overallSentiment"], "positive");
}

#[tokio::test]
async fn every_upstream_down_still_yields_a_complete_story() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let app = StorySpot::with_store(gemini_config(&server), Arc::new(MemoryStore::new())).unwrap();
    let location = app.geocoder().reverse_geocode(LISBON.0, LISBON.1).await;
    assert_eq!(location.city.as_deref(), Some("Unknown City"));
    assert_eq!(location.full_address.as_deref(), Some("Location at 38.7223, -9.1393"));

    let enricher = app.enricher();
    let prompt = enricher.generate_story_prompt(&location).await;
    assert!(fallback::story_prompt_options(&location).contains(&prompt));

    let story = enricher
        .compose_story(StoryDraft::new("Lost", "Nobody answered."), location.clone())
        .await
        .unwrap();
    assert_eq!(story.ai.sentiment, fallback::sentiment());
    assert_eq!(story.ai.tags, fallback::story_tags());
    assert_eq!(story.ai.recommendations, fallback::recommendations());
    assert!(fallback::historical_context_options(&location)
        .contains(&story.location_insights.historical_context));
    assert!(fallback::cultural_insights_options(&location)
        .contains(&story.location_insights.cultural_significance));
    assert!(fallback::natural_features_options(&location)
        .contains(&story.location_insights.natural_features));
}

#[tokio::test]
async fn missing_credential_never_touches_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate("should not be used")))
        .expect(0)
        .mount(&server)
        .await;

    let app = StorySpot::with_store(
        config(&[("GEMINI_BASE_URL", server.uri())]),
        Arc::new(MemoryStore::new()),
    )
    .unwrap();

    let sentiment = app.enricher().analyze_sentiment("A quiet morning.").await;
    assert_eq!(sentiment, fallback::sentiment());
}

#[tokio::test]
async fn disabled_feature_is_honoured_across_sessions() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("recommend similar stories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate("1. Never asked")))
        .expect(0)
        .mount(&server)
        .await;
    mount_gemini(&server, "comprehensive set of tags", "Harbour").await;

    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let first = StorySpot::with_store(gemini_config(&server), store.clone()).unwrap();
    let mut features = first.features();
    features.disable(Feature::Recommendations);
    features.save(first.store()).unwrap();

    let second = StorySpot::with_store(gemini_config(&server), store).unwrap();
    let enricher = second.enricher();
    let location = storyspot_common::Location::new(LISBON.0, LISBON.1);

    assert_eq!(
        enricher.recommend_similar_stories("text", &location).await,
        fallback::recommendations()
    );
    assert_eq!(
        enricher.generate_story_tags("text", &location).await,
        vec!["harbour"]
    );
}

#[tokio::test]
async fn pending_selection_is_carried_to_the_story() {
    let server = MockServer::start().await;
    mount_lisbon_geocode(&server).await;

    let app = StorySpot::with_store(gemini_config(&server), Arc::new(MemoryStore::new())).unwrap();
    let selected = app.geocoder().reverse_geocode(LISBON.0, LISBON.1).await;
    session::save_selection(app.store(), &selected).unwrap();

    let pending = session::take_selection(app.store()).unwrap();
    assert_eq!(pending, selected);
    assert!(session::load_selection(app.store()).is_none());
}

#[test]
fn credentials_persist_in_the_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    let cfg = config(&[("STORYSPOT_BACKEND", "openai".to_string())]);

    let first = StorySpot::with_store(cfg.clone(), Arc::new(FileStore::new(path.clone()))).unwrap();
    assert!(first.credentials().set(Service::OpenAi, "not-a-key").is_err());
    first
        .credentials()
        .set(Service::OpenAi, OPENAI_TEST_KEY)
        .unwrap();

    let second = StorySpot::with_store(cfg, Arc::new(FileStore::new(path.clone()))).unwrap();
    assert!(second.credentials().is_configured(Service::OpenAi));
    assert_eq!(second.text_generator().provider(), "openai");

    second.credentials().clear(Service::OpenAi);
    let third = FileStore::new(path);
    assert_eq!(third.get("OPENAI_API_KEY").unwrap(), None);
}
