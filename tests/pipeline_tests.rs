//! End-to-end tests for the blog post pipeline.
//!
//! These run the real HTTP adapters against a local mock server.

use std::sync::Arc;

use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use postsmith::{
    DomainError, GenerateBlogPostUseCase, MockChatClient, MockImageClient, OpenAiChatClient,
    OpenAiConfig, OpenAiImageClient, PromptLibrary,
};

/// Answers chat requests with a reply that depends on which stage's prompt it saw.
struct StageAwareResponder;

impl Respond for StageAwareResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap_or(Value::Null);
        let prompt = body["messages"][0]["content"].as_str().unwrap_or_default();

        let reply = if prompt.contains("3 clear and concise bullet points") {
            "- Choose a bin\n- Balance greens and browns\n- Turn the pile"
        } else if prompt.contains("Expand the following bullet points") {
            "Choosing a bin matters. Balancing greens and browns keeps the pile healthy. Turning the pile adds air."
        } else {
            "Introduction: composting is easy.\n\nBody.\n\nConclusion: start today."
        };

        ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": reply}}]
        }))
    }
}

async fn chat_prompts(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == "/v1/chat/completions")
        .map(|r| {
            let body: Value = serde_json::from_slice(&r.body).unwrap();
            body["messages"][0]["content"].as_str().unwrap().to_string()
        })
        .collect()
}

fn config_for(server: &MockServer) -> OpenAiConfig {
    OpenAiConfig::default().with_base_url(server.uri())
}

#[tokio::test]
async fn test_full_pipeline_with_background() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(StageAwareResponder)
        .expect(3)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/images/generations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"url": "https://images.example.com/compost.png?sig=1"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let use_case = GenerateBlogPostUseCase::new(
        Arc::new(OpenAiChatClient::new(&config)),
        PromptLibrary::new().unwrap(),
    )
    .with_background(Arc::new(OpenAiImageClient::new(&config)));

    let post = use_case
        .execute("composting at home", "sk-test")
        .await
        .expect("pipeline should succeed");

    assert!(post.bullets().contains("Choose a bin"));
    assert!(post.post().starts_with("Introduction"));
    assert!(post.post().contains("Conclusion"));

    let prompts = chat_prompts(&server).await;
    assert_eq!(prompts.len(), 3);
    assert!(prompts[0].contains("Topic: composting at home"));
    assert!(prompts[1].contains(post.bullets()));
    assert!(prompts[2].contains(post.expanded()));

    let background = post.background().expect("background requested");
    assert_eq!(background.url(), "https://images.example.com/compost.png?sig=1");
    assert!(background.css().contains(background.url()));

    let image_request = server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .find(|r| r.url.path() == "/v1/images/generations")
        .expect("image request sent");
    let body: Value = serde_json::from_slice(&image_request.body).unwrap();
    assert!(body["prompt"].as_str().unwrap().contains("composting at home"));
    assert_eq!(body["n"], 1);
    assert_eq!(body["size"], "1024x1024");
}

#[tokio::test]
async fn test_second_stage_failure_stops_pipeline() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"content": "- a\n- b\n- c"}}]
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {"message": "Rate limit reached"}
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/images/generations"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let use_case = GenerateBlogPostUseCase::new(
        Arc::new(OpenAiChatClient::new(&config)),
        PromptLibrary::new().unwrap(),
    )
    .with_background(Arc::new(OpenAiImageClient::new(&config)));

    let err = use_case
        .execute("composting at home", "sk-test")
        .await
        .expect_err("second stage should fail");

    assert!(matches!(err, DomainError::UpstreamError(_)));
    assert!(err.to_string().contains("Rate limit reached"));
    assert_eq!(chat_prompts(&server).await.len(), 2);
}

#[tokio::test]
async fn test_blank_inputs_never_reach_the_network() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let use_case = GenerateBlogPostUseCase::new(
        Arc::new(OpenAiChatClient::new(&config_for(&server))),
        PromptLibrary::new().unwrap(),
    );

    let err = use_case.execute("composting at home", "  ").await.unwrap_err();
    assert!(matches!(err, DomainError::MissingCredential));

    let err = use_case.execute("\t", "sk-test").await.unwrap_err();
    assert!(matches!(err, DomainError::MissingTopic));
}

#[tokio::test]
async fn test_offline_clients_run_the_whole_pipeline() {
    let use_case = GenerateBlogPostUseCase::new(
        Arc::new(MockChatClient::new()),
        PromptLibrary::new().unwrap(),
    )
    .with_background(Arc::new(MockImageClient::new()));

    let post = use_case.execute("urban beekeeping", "mock").await.unwrap();

    assert!(post.bullets().contains("urban beekeeping"));
    assert!(!post.post().is_empty());
    assert!(post.background().is_some());
}
