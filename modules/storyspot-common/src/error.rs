use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorySpotError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
