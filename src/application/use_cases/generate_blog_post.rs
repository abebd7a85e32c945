use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::application::{ChatClient, ImageClient, NoopObserver, StageObserver};
use crate::domain::{
    BackgroundImage, BlogPost, DomainError, ImageRequest, PipelineRequest, PipelineState,
    PromptLibrary, Stage,
};

/// Turns a topic into a finished blog post.
///
/// Runs summarize, expand and assemble strictly in order, each stage feeding
/// its text to the next, and optionally generates a background image from the
/// raw topic afterwards. The first failing stage aborts the run; nothing is
/// retried or cached.
pub struct GenerateBlogPostUseCase {
    chat_client: Arc<dyn ChatClient>,
    image_client: Option<Arc<dyn ImageClient>>,
    observer: Arc<dyn StageObserver>,
    prompts: PromptLibrary,
}

impl GenerateBlogPostUseCase {
    pub fn new(chat_client: Arc<dyn ChatClient>, prompts: PromptLibrary) -> Self {
        Self {
            chat_client,
            image_client: None,
            observer: Arc::new(NoopObserver),
            prompts,
        }
    }

    pub fn with_background(mut self, image_client: Arc<dyn ImageClient>) -> Self {
        self.image_client = Some(image_client);
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn StageObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub async fn execute(&self, topic: &str, credential: &str) -> Result<BlogPost, DomainError> {
        self.execute_with_state(topic, credential).await.1
    }

    /// Like [`execute`](Self::execute), also returning the terminal state the
    /// run ended in (`Done` or `Failed`).
    pub async fn execute_with_state(
        &self,
        topic: &str,
        credential: &str,
    ) -> (PipelineState, Result<BlogPost, DomainError>) {
        let start_time = Instant::now();
        let mut state = PipelineState::Idle;

        let result = self.run(topic, credential, &mut state).await;

        match &result {
            Ok(_) => {
                self.transition(&mut state, PipelineState::Done);
                info!("Blog post generated in {:?}", start_time.elapsed());
            }
            Err(e) => {
                warn!("Pipeline failed while {:?}: {}", state, e);
                self.transition(&mut state, PipelineState::Failed);
            }
        }

        (state, result)
    }

    async fn run(
        &self,
        topic: &str,
        credential: &str,
        state: &mut PipelineState,
    ) -> Result<BlogPost, DomainError> {
        self.transition(state, PipelineState::Validating);
        let request = PipelineRequest::new(topic, credential)?;

        info!("Generating blog post for topic: {}", request.topic());

        let bullets = self
            .run_text_stage(Stage::Summarize, request.topic(), &request, state)
            .await?;
        let expanded = self
            .run_text_stage(Stage::Expand, &bullets, &request, state)
            .await?;
        let post = self
            .run_text_stage(Stage::Assemble, &expanded, &request, state)
            .await?;

        let mut blog_post = BlogPost::new(request.topic(), bullets, expanded, post);

        if let Some(image_client) = &self.image_client {
            let background = self
                .run_background_stage(image_client.as_ref(), &request, state)
                .await?;
            blog_post = blog_post.with_background(background);
        }

        Ok(blog_post)
    }

    async fn run_text_stage(
        &self,
        stage: Stage,
        input: &str,
        request: &PipelineRequest,
        state: &mut PipelineState,
    ) -> Result<String, DomainError> {
        self.transition(state, PipelineState::running(stage));
        self.observer.stage_started(stage);
        let start_time = Instant::now();

        let outcome = match self.prompts.render(stage, input) {
            Ok(prompt) => {
                debug!("Rendered {} prompt ({} chars)", stage, prompt.len());
                self.chat_client.complete(request.credential(), &prompt).await
            }
            Err(e) => Err(e),
        };

        match outcome {
            Ok(text) => {
                info!(
                    "Stage {} completed in {:?} ({} chars)",
                    stage,
                    start_time.elapsed(),
                    text.len()
                );
                self.observer.stage_completed(stage, &text);
                Ok(text)
            }
            Err(e) => {
                self.observer.stage_failed(stage);
                Err(e)
            }
        }
    }

    async fn run_background_stage(
        &self,
        image_client: &dyn ImageClient,
        request: &PipelineRequest,
        state: &mut PipelineState,
    ) -> Result<BackgroundImage, DomainError> {
        let stage = Stage::Background;
        self.transition(state, PipelineState::running(stage));
        self.observer.stage_started(stage);

        let outcome = match self.prompts.render(stage, request.topic()) {
            Ok(prompt) => {
                image_client
                    .generate(request.credential(), &ImageRequest::new(prompt))
                    .await
            }
            Err(e) => Err(e),
        };

        match outcome {
            Ok(url) => {
                info!("Background image generated: {}", url);
                self.observer.stage_completed(stage, &url);
                Ok(BackgroundImage::new(url))
            }
            Err(e) => {
                self.observer.stage_failed(stage);
                Err(e)
            }
        }
    }

    fn transition(&self, state: &mut PipelineState, next: PipelineState) {
        debug_assert!(
            state.can_transition_to(next),
            "invalid pipeline transition {:?} -> {:?}",
            state,
            next
        );
        debug!("Pipeline state: {:?} -> {:?}", state, next);
        *state = next;
        self.observer.state_changed(next);
    }
}
