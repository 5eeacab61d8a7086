mod client;
pub(crate) mod types;

use async_trait::async_trait;

use crate::error::{Result, UpstreamError};
use crate::traits::TextGenerator;

use client::OpenAiClient;

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

// =============================================================================
// OpenAi Generator
// =============================================================================

#[derive(Clone)]
pub struct OpenAi {
    api_key: String,
    pub(crate) model: String,
    base_url: Option<String>,
    http: reqwest::Client,
}

impl OpenAi {
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

    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Get the model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    pub(crate) fn client(&self) -> OpenAiClient {
        let client = OpenAiClient::new(&self.api_key, self.http.clone());
        if let Some(ref url) = self.base_url {
            client.with_base_url(url)
        } else {
            client
        }
    }
}

#[async_trait]
impl TextGenerator for OpenAi {
    fn provider(&self) -> &str {
        "openai"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let request =
            types::ChatRequest::new(&self.model).message(types::WireMessage::user(prompt));

        let response = self.client().chat(&request).await?;

        response
            .first_content()
            .ok_or_else(|| UpstreamError::MalformedResponse("No response from OpenAI".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_openai_new() {
        let ai = OpenAi::new("sk-test", "gpt-4o");
        assert_eq!(ai.model, "gpt-4o");
        assert_eq!(ai.api_key, "sk-test");
    }

    #[test]
    fn test_openai_with_base_url() {
        let ai = OpenAi::new("sk-test", "gpt-4o").with_base_url("https://custom.api.com");
        assert_eq!(ai.base_url, Some("https://custom.api.com".to_string()));
    }

    #[tokio::test]
    async fn test_generate_sends_bearer_and_single_user_message() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer sk-test"))
            .and(body_json(serde_json::json!({
                "model": DEFAULT_MODEL,
                "messages": [{"role": "user", "content": "Describe Lisbon"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "A city of hills."}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let ai = OpenAi::new("sk-test", DEFAULT_MODEL).with_base_url(server.uri());
        let text = ai.generate("Describe Lisbon").await.unwrap();
        assert_eq!(text, "A city of hills.");
    }

    #[tokio::test]
    async fn test_generate_error_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .mount(&server)
            .await;

        let ai = OpenAi::new("sk-test", DEFAULT_MODEL).with_base_url(server.uri());
        let err = ai.generate("hi").await.unwrap_err();
        assert!(matches!(err, UpstreamError::Api { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_generate_empty_choices_is_malformed() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})),
            )
            .mount(&server)
            .await;

        let ai = OpenAi::new("sk-test", DEFAULT_MODEL).with_base_url(server.uri());
        let err = ai.generate("hi").await.unwrap_err();
        assert!(matches!(err, UpstreamError::MalformedResponse(_)));
    }
}
