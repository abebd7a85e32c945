use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::openai_error::upstream_status_error;
use super::OpenAiConfig;
use crate::application::ImageClient;
use crate::domain::{DomainError, ImageRequest};

const GENERATIONS_PATH: &str = "/v1/images/generations";

#[derive(Serialize)]
struct ApiRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    prompt: &'a str,
    n: u8,
    size: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    data: Vec<ImageData>,
}

#[derive(Deserialize)]
struct ImageData {
    url: Option<String>,
}

/// HTTP client for the OpenAI image generation endpoint.
pub struct OpenAiImageClient {
    client: reqwest::Client,
    model: Option<String>,
    url: String,
}

impl OpenAiImageClient {
    pub fn new(config: &OpenAiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            model: config.image_model.clone(),
            url: config.endpoint(GENERATIONS_PATH),
        }
    }
}

#[async_trait]
impl ImageClient for OpenAiImageClient {
    async fn generate(
        &self,
        credential: &str,
        request: &ImageRequest,
    ) -> Result<String, DomainError> {
        let body = ApiRequest {
            model: self.model.as_deref(),
            prompt: request.prompt(),
            n: request.count(),
            size: request.size().as_str(),
        };

        debug!("OpenAiImageClient: POST {} (size {})", self.url, body.size);

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(credential)
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::upstream(format!("OpenAiImageClient: request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!("OpenAiImageClient: API returned {status}");
            return Err(upstream_status_error("OpenAiImageClient", status, &text));
        }

        let api_response: ApiResponse = response.json().await.map_err(|e| {
            DomainError::upstream(format!("OpenAiImageClient: failed to parse response: {e}"))
        })?;

        api_response
            .data
            .into_iter()
            .next()
            .and_then(|image| image.url)
            .ok_or_else(|| {
                DomainError::upstream("OpenAiImageClient: response contained no image URL")
            })
    }
}
