//! AI suggestion bridge: one prompt in, one trimmed suggestion out,
//! over an OpenAI-compatible chat-completions endpoint. The bridge
//! knows nothing about which input field asked; callers own the UI
//! side (disabling the trigger while a request is in flight, routing
//! failures to the notification queue).

use std::time::Duration;

use common::ExternalServiceFailure;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

pub const ENV_API_KEY: &str = "LLM_API_KEY";
pub const ENV_MODEL: &str = "LLM_MODEL";
pub const ENV_ENDPOINT: &str = "LLM_ENDPOINT";

const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// System prompt shared by every suggestion request: short, concrete,
/// pt-BR, no surrounding prose.
const SYSTEM_PROMPT: &str = "Você é um assistente de bem-estar. Responda com uma única sugestão \
     curta e concreta em português do Brasil, sem explicações adicionais.";

#[derive(Debug, Clone)]
pub struct SuggestionClient {
    api_key: String,
    model: String,
    endpoint: String,
    client: Client,
}

impl SuggestionClient {
    pub fn new(
        api_key: String,
        model: String,
        endpoint: Option<String>,
    ) -> Result<Self, ExternalServiceFailure> {
        if api_key.is_empty() {
            return Err(ExternalServiceFailure::NotConfigured);
        }
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ExternalServiceFailure::Request(e.to_string()))?;
        Ok(Self {
            api_key,
            model,
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            client,
        })
    }

    /// Builds a client from `LLM_API_KEY` / `LLM_MODEL` /
    /// `LLM_ENDPOINT`. A missing key means the feature is off, not an
    /// error: suggestion buttons render disabled.
    pub fn from_env() -> Result<Option<Self>, ExternalServiceFailure> {
        let Ok(api_key) = std::env::var(ENV_API_KEY) else {
            return Ok(None);
        };
        if api_key.is_empty() {
            return Ok(None);
        }
        let model = std::env::var(ENV_MODEL).unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let endpoint = std::env::var(ENV_ENDPOINT).ok();
        Self::new(api_key, model, endpoint).map(Some)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// One suggestion round-trip. The returned text is trimmed; an
    /// API-side failure or an empty body is an error, never an empty
    /// string.
    pub async fn suggest(&self, prompt: &str) -> Result<String, ExternalServiceFailure> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            max_tokens: Some(120),
            temperature: Some(0.7),
        };

        debug!(model = %self.model, "sending suggestion request");
        let response = self
            .client
            .post(format!("{}/chat/completions", self.endpoint))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| ExternalServiceFailure::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), "suggestion request rejected");
            return Err(ExternalServiceFailure::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ExternalServiceFailure::Request(e.to_string()))?;
        let content = parsed
            .choices
            .first()
            .map(|c| c.message.content.trim())
            .filter(|c| !c.is_empty())
            .ok_or(ExternalServiceFailure::EmptyResponse)?;
        Ok(content.to_string())
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[test]
    fn empty_api_key_is_not_configured() {
        let err = SuggestionClient::new(String::new(), DEFAULT_MODEL.to_string(), None)
            .err()
            .unwrap();
        assert!(matches!(err, ExternalServiceFailure::NotConfigured));
    }

    #[tokio::test]
    async fn suggest_returns_trimmed_content() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                "choices": [{
                    "message": {
                        "role": "assistant",
                        "content": "  Meditar 10 minutos por dia.  "
                    }
                }]
            }"#,
            )
            .create_async()
            .await;

        let client = SuggestionClient::new(
            "test-api-key".to_string(),
            DEFAULT_MODEL.to_string(),
            Some(server.url()),
        )
        .unwrap();

        let suggestion = client.suggest("Sugira um objetivo").await.unwrap();
        assert_eq!(suggestion, "Meditar 10 minutos por dia.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_becomes_api_failure() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(429)
            .with_body("rate limited")
            .create_async()
            .await;

        let client = SuggestionClient::new(
            "test-api-key".to_string(),
            DEFAULT_MODEL.to_string(),
            Some(server.url()),
        )
        .unwrap();

        let err = client.suggest("oi").await.err().unwrap();
        match err {
            ExternalServiceFailure::Api { status, body } => {
                assert_eq!(status, 429);
                assert_eq!(body, "rate limited");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn blank_choice_is_an_empty_response() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices": [{"message": {"role": "assistant", "content": "   "}}]}"#)
            .create_async()
            .await;

        let client = SuggestionClient::new(
            "test-api-key".to_string(),
            DEFAULT_MODEL.to_string(),
            Some(server.url()),
        )
        .unwrap();

        let err = client.suggest("oi").await.err().unwrap();
        assert!(matches!(err, ExternalServiceFailure::EmptyResponse));
    }
}
