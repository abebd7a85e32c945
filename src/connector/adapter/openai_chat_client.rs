use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::openai_error::upstream_status_error;
use super::OpenAiConfig;
use crate::application::ChatClient;
use crate::domain::DomainError;

const COMPLETIONS_PATH: &str = "/v1/chat/completions";

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ApiMessage<'a>>,
}

#[derive(Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// HTTP client for the OpenAI Chat Completions API and compatible servers.
///
/// Each prompt is sent as a single `user` message. No request timeout is set,
/// so a slow model blocks the stage until the server answers or the
/// connection drops.
pub struct OpenAiChatClient {
    client: reqwest::Client,
    model: String,
    temperature: f32,
    url: String,
}

impl OpenAiChatClient {
    pub fn new(config: &OpenAiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            model: config.model.clone(),
            temperature: config.temperature,
            url: config.endpoint(COMPLETIONS_PATH),
        }
    }
}

#[async_trait]
impl ChatClient for OpenAiChatClient {
    async fn complete(&self, credential: &str, prompt: &str) -> Result<String, DomainError> {
        let request = ApiRequest {
            model: &self.model,
            temperature: self.temperature,
            messages: vec![ApiMessage {
                role: "user",
                content: prompt,
            }],
        };

        debug!("OpenAiChatClient: POST {} (model {})", self.url, self.model);

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(credential)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::upstream(format!("OpenAiChatClient: request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("OpenAiChatClient: API returned {status}");
            return Err(upstream_status_error("OpenAiChatClient", status, &body));
        }

        let api_response: ApiResponse = response.json().await.map_err(|e| {
            DomainError::upstream(format!("OpenAiChatClient: failed to parse response: {e}"))
        })?;

        api_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| DomainError::upstream("OpenAiChatClient: response contained no message"))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer) -> OpenAiChatClient {
        OpenAiChatClient::new(&OpenAiConfig::default().with_base_url(server.uri()))
    }

    #[tokio::test]
    async fn sends_prompt_and_returns_content() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "gpt-3.5-turbo",
                "messages": [{"role": "user", "content": "Topic: composting at home"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"index": 0, "message": {"role": "assistant", "content": "- one\n- two\n- three"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = client_for(&server)
            .complete("sk-test", "Topic: composting at home")
            .await
            .unwrap();

        assert_eq!(text, "- one\n- two\n- three");
    }

    #[tokio::test]
    async fn auth_failure_is_upstream_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {"message": "Incorrect API key provided: sk-bad"}
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).complete("sk-bad", "prompt").await.unwrap_err();

        assert!(err.is_upstream());
        assert!(err.to_string().contains("authentication failed"));
    }

    #[tokio::test]
    async fn rate_limit_is_not_retried() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server).complete("sk-test", "prompt").await.unwrap_err();

        assert!(err.to_string().contains("rate limited"));
    }

    #[tokio::test]
    async fn malformed_body_is_upstream_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server).complete("sk-test", "prompt").await.unwrap_err();
        assert!(err.is_upstream());
    }

    #[tokio::test]
    async fn empty_choices_is_upstream_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let err = client_for(&server).complete("sk-test", "prompt").await.unwrap_err();
        assert!(err.to_string().contains("no message"));
    }

    #[tokio::test]
    async fn unreachable_server_is_upstream_error() {
        let config = OpenAiConfig::default().with_base_url("http://127.0.0.1:1");
        let err = OpenAiChatClient::new(&config)
            .complete("sk-test", "prompt")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("request failed"));
    }
}
