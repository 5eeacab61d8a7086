use async_trait::async_trait;
use std::sync::Arc;

use crate::error::{Result, UpstreamError};

// =============================================================================
// TextGenerator Trait
// =============================================================================

/// A generative-text backend: one prompt in, the first candidate text out.
///
/// Implementations make a single attempt. Retry and fallback policy belong
/// to the caller.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Short provider name used in log fields.
    fn provider(&self) -> &str;

    async fn generate(&self, prompt: &str) -> Result<String>;
}

#[async_trait]
impl<T: TextGenerator + ?Sized> TextGenerator for Arc<T> {
    fn provider(&self) -> &str {
        (**self).provider()
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        (**self).generate(prompt).await
    }
}

// =============================================================================
// Unconfigured
// =============================================================================

/// Stand-in used when no credential is live for the selected backend.
/// Every call fails with [`UpstreamError::NotConfigured`] without touching
/// the network.
#[derive(Debug, Clone)]
pub struct Unconfigured {
    service: String,
}

impl Unconfigured {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }
}

#[async_trait]
impl TextGenerator for Unconfigured {
    fn provider(&self) -> &str {
        "unconfigured"
    }

    async fn generate(&self, _prompt: &str) -> Result<String> {
        Err(UpstreamError::NotConfigured(self.service.clone()))
    }
}
