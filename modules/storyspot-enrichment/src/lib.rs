pub mod enricher;
pub mod fallback;
pub mod features;
pub mod insights;
pub mod parsers;
pub mod prompts;
pub mod runtime;
pub mod session;
pub mod story;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use enricher::Enricher;
pub use features::{AiFeatures, Feature};
pub use runtime::StorySpot;
pub use story::{StoryCollection, StoryDraft};
