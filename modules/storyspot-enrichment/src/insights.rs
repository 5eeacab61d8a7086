//! Location insights: three short paragraphs about a place, generated
//! concurrently.

use std::panic::AssertUnwindSafe;

use futures::future::try_join3;
use futures::FutureExt;
use storyspot_common::{Location, LocationInsights};
use tracing::{info, warn};

use crate::enricher::Enricher;
use crate::features::Feature;
use crate::{fallback, prompts};

impl Enricher {
    pub async fn generate_historical_context(&self, location: &Location) -> String {
        let prompt = prompts::historical_context(location);
        match self.call(Feature::LocationInsights, "historical_context", &prompt).await {
            Some(text) => text,
            None => fallback::historical_context(location),
        }
    }

    pub async fn generate_cultural_insights(&self, location: &Location) -> String {
        let prompt = prompts::cultural_insights(location);
        match self.call(Feature::LocationInsights, "cultural_insights", &prompt).await {
            Some(text) => text,
            None => fallback::cultural_insights(location),
        }
    }

    pub async fn generate_natural_features(&self, location: &Location) -> String {
        let prompt = prompts::natural_features(location);
        match self.call(Feature::LocationInsights, "natural_features", &prompt).await {
            Some(text) => text,
            None => fallback::natural_features(location),
        }
    }

    /// All three insights. Each field falls back independently when its own
    /// call fails; if the join itself breaks down the fixed
    /// [`fallback::insights_unavailable`] triple is returned instead.
    pub async fn generate_location_insights(&self, location: &Location) -> LocationInsights {
        let joined = try_join3(
            AssertUnwindSafe(self.generate_historical_context(location)).catch_unwind(),
            AssertUnwindSafe(self.generate_cultural_insights(location)).catch_unwind(),
            AssertUnwindSafe(self.generate_natural_features(location)).catch_unwind(),
        )
        .await;

        match joined {
            Ok((historical_context, cultural_significance, natural_features)) => {
                info!(
                    city = location.city_or("unknown"),
                    provider = self.provider(),
                    "Location insights generated"
                );
                LocationInsights {
                    historical_context,
                    cultural_significance,
                    natural_features,
                }
            }
            Err(_) => {
                warn!(
                    latitude = location.latitude,
                    longitude = location.longitude,
                    "Location insight generation aborted, using placeholder insights"
                );
                fallback::insights_unavailable()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::testing::{FailingGenerator, FixedGenerator, PanickingGenerator, ScriptedGenerator};

    fn lisbon() -> Location {
        Location::new(38.7223, -9.1393)
            .with_city("Lisbon")
            .with_country("Portugal")
    }

    #[tokio::test]
    async fn each_field_comes_from_its_own_prompt() {
        let generator = ScriptedGenerator::new()
            .on("historical overview", "Founded by Phoenicians.")
            .on("cultural aspects", "Fado and azulejos.")
            .on("natural landscape", "Seven hills on the Tagus.");
        let enricher = Enricher::new(Arc::new(generator));

        let insights = enricher.generate_location_insights(&lisbon()).await;
        assert_eq!(insights.historical_context, "Founded by Phoenicians.");
        assert_eq!(insights.cultural_significance, "Fado and azulejos.");
        assert_eq!(insights.natural_features, "Seven hills on the Tagus.");
    }

    #[tokio::test]
    async fn insight_text_is_trimmed() {
        let enricher = Enricher::new(Arc::new(FixedGenerator::new("\n  Founded by Phoenicians.\n\n")));

        assert_eq!(
            enricher.generate_historical_context(&lisbon()).await,
            "Founded by Phoenicians."
        );
        let insights = enricher.generate_location_insights(&lisbon()).await;
        assert_eq!(insights.natural_features, "Founded by Phoenicians.");
    }

    #[tokio::test]
    async fn one_failing_call_only_replaces_its_field() {
        let generator = ScriptedGenerator::new()
            .on("historical overview", "Founded by Phoenicians.")
            .on("natural landscape", "Seven hills on the Tagus.");
        let enricher = Enricher::new(Arc::new(generator));
        let loc = lisbon();

        let insights = enricher.generate_location_insights(&loc).await;
        assert_eq!(insights.historical_context, "Founded by Phoenicians.");
        assert!(fallback::cultural_insights_options(&loc).contains(&insights.cultural_significance));
        assert_eq!(insights.natural_features, "Seven hills on the Tagus.");
    }

    #[tokio::test]
    async fn every_call_failing_gives_per_field_fallbacks() {
        let enricher = Enricher::new(Arc::new(FailingGenerator));
        let loc = lisbon();

        let insights = enricher.generate_location_insights(&loc).await;
        assert!(fallback::historical_context_options(&loc).contains(&insights.historical_context));
        assert!(fallback::natural_features_options(&loc).contains(&insights.natural_features));
        assert_ne!(insights, fallback::insights_unavailable());
    }

    #[tokio::test]
    async fn broken_join_gives_unavailable_triple() {
        let enricher = Enricher::new(Arc::new(PanickingGenerator));

        let insights = enricher.generate_location_insights(&lisbon()).await;
        assert_eq!(insights, fallback::insights_unavailable());
    }
}
