use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use geocode_client::ReverseGeocoder;
use storyspot_common::{Config, Location, Service};
use storyspot_enrichment::{session, Feature, StoryDraft, StorySpot};

#[derive(Parser)]
#[command(name = "storyspot", about = "Location-anchored story enrichment")]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Clone, Copy)]
struct Coordinates {
    #[arg(long, allow_negative_numbers = true, requires = "lng")]
    lat: Option<f64>,
    #[arg(long, allow_negative_numbers = true, requires = "lat")]
    lng: Option<f64>,
}

#[derive(Subcommand)]
enum Command {
    /// Reverse-geocode a coordinate pair
    Locate {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
    },
    /// Generate a writing prompt for a location
    Prompt {
        #[command(flatten)]
        at: Coordinates,
    },
    /// Historical, cultural and natural notes about a location
    Insights {
        #[command(flatten)]
        at: Coordinates,
    },
    /// Sentiment analysis of story text
    Analyze {
        #[arg(long)]
        text: String,
    },
    /// Tags for story text at a location
    Tags {
        #[arg(long)]
        text: String,
        #[command(flatten)]
        at: Coordinates,
    },
    /// Similar-story recommendations
    Recommend {
        #[arg(long)]
        text: String,
        #[command(flatten)]
        at: Coordinates,
    },
    /// Compose a fully enriched story
    Story {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        image: Option<String>,
        #[command(flatten)]
        at: Coordinates,
    },
    /// Manage API keys
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },
    /// Manage the pending map selection
    Select {
        #[command(subcommand)]
        action: SelectAction,
    },
    /// Toggle AI features
    Features {
        #[command(subcommand)]
        action: FeatureAction,
    },
}

#[derive(Subcommand)]
enum KeyAction {
    Set { service: Service, key: String },
    Get { service: Service },
    Clear { service: Service },
}

#[derive(Subcommand)]
enum SelectAction {
    Set {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
    },
    Show,
    Clear,
}

#[derive(Subcommand)]
enum FeatureAction {
    Show,
    Enable { feature: Feature },
    Disable { feature: Feature },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Explicit coordinates are geocoded; otherwise the pending selection, then
/// the map center.
async fn resolve_location(app: &StorySpot, at: Coordinates, consume: bool) -> Location {
    if let (Some(lat), Some(lng)) = (at.lat, at.lng) {
        return app.geocoder().reverse_geocode(lat, lng).await;
    }

    let pending = if consume {
        session::take_selection(app.store())
    } else {
        session::load_selection(app.store())
    };
    pending.unwrap_or_else(Location::default_center)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::from_default_env()
        .add_directive("storyspot=info".parse()?)
        .add_directive("ai_client=info".parse()?)
        .add_directive("geocode_client=info".parse()?);
    if cli.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let config = Config::from_env()?;
    config.log_redacted();

    let app = StorySpot::init(config)?;

    match cli.command {
        Command::Locate { lat, lng } => {
            let location = app.geocoder().reverse_geocode(lat, lng).await;
            print_json(&location)?;
        }
        Command::Prompt { at } => {
            let location = resolve_location(&app, at, false).await;
            let prompt = app.enricher().generate_story_prompt(&location).await;
            print_json(&json!({ "location": location, "prompt": prompt }))?;
        }
        Command::Insights { at } => {
            let location = resolve_location(&app, at, false).await;
            let insights = app.enricher().generate_location_insights(&location).await;
            print_json(&insights)?;
        }
        Command::Analyze { text } => {
            print_json(&app.enricher().analyze_sentiment(&text).await)?;
        }
        Command::Tags { text, at } => {
            let location = resolve_location(&app, at, false).await;
            print_json(&app.enricher().generate_story_tags(&text, &location).await)?;
        }
        Command::Recommend { text, at } => {
            let location = resolve_location(&app, at, false).await;
            let recommendations = app
                .enricher()
                .recommend_similar_stories(&text, &location)
                .await;
            print_json(&recommendations)?;
        }
        Command::Story {
            title,
            description,
            image,
            at,
        } => {
            let mut draft = StoryDraft::new(title, description);
            draft.image = image;
            draft.validate()?;

            let location = resolve_location(&app, at, true).await;
            let story = app.enricher().compose_story(draft, location).await?;
            print_json(&story)?;
        }
        Command::Key { action } => match action {
            KeyAction::Set { service, key } => {
                app.credentials().set(service, &key)?;
                print_json(&json!({ "service": service.name(), "configured": true }))?;
            }
            KeyAction::Get { service } => {
                let configured = app.credentials().is_configured(service);
                print_json(&json!({ "service": service.name(), "configured": configured }))?;
            }
            KeyAction::Clear { service } => {
                app.credentials().clear(service);
                print_json(&json!({ "service": service.name(), "configured": false }))?;
            }
        },
        Command::Select { action } => match action {
            SelectAction::Set { lat, lng } => {
                let location = app.geocoder().reverse_geocode(lat, lng).await;
                session::save_selection(app.store(), &location)?;
                print_json(&location)?;
            }
            SelectAction::Show => match session::load_selection(app.store()) {
                Some(location) => print_json(&location)?,
                None => bail!("No location selected"),
            },
            SelectAction::Clear => {
                session::clear_selection(app.store());
                info!("Selection cleared");
            }
        },
        Command::Features { action } => {
            let mut features = app.features();
            match action {
                FeatureAction::Show => {}
                FeatureAction::Enable { feature } => {
                    features.enable(feature);
                    features.save(app.store())?;
                }
                FeatureAction::Disable { feature } => {
                    features.disable(feature);
                    features.save(app.store())?;
                }
            }
            print_json(&features)?;
        }
    }

    Ok(())
}
