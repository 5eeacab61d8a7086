mod client;
pub(crate) mod types;

use async_trait::async_trait;

use crate::error::{Result, UpstreamError};
use crate::traits::TextGenerator;

use client::GeminiClient;

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";

// =============================================================================
// Gemini Generator
// =============================================================================

#[derive(Clone)]
pub struct Gemini {
    api_key: String,
    pub(crate) model: String,
    base_url: Option<String>,
    http: reqwest::Client,
}

impl Gemini {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: None,
            http: reqwest::Client::new(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Use a preconfigured HTTP client (timeouts, proxies).
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub(crate) fn client(&self) -> GeminiClient {
        let client = GeminiClient::new(&self.api_key, self.http.clone());
        if let Some(ref url) = self.base_url {
            client.with_base_url(url)
        } else {
            client
        }
    }
}

#[async_trait]
impl TextGenerator for Gemini {
    fn provider(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = types::GenerateRequest::from_prompt(prompt);
        let response = self.client().generate_content(&self.model, &request).await?;

        response
            .first_text()
            .ok_or_else(|| UpstreamError::MalformedResponse("No candidate text from Gemini".into()))
    }
}
