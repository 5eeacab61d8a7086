pub mod config;
pub mod credentials;
pub mod error;
pub mod store;
pub mod types;

pub use config::{Backend, Config, GeocoderKind};
pub use credentials::{CredentialError, CredentialStore, Service};
pub use error::StorySpotError;
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use types::*;
