pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    ChatClient, GenerateBlogPostUseCase, ImageClient, NoopObserver, StageObserver,
};

pub use connector::{
    MockChatClient, MockImageClient, OpenAiChatClient, OpenAiConfig, OpenAiImageClient,
    TerminalPresenter,
};

pub use domain::{
    BackgroundImage, BlogPost, DomainError, ImageRequest, ImageSize, PipelineRequest,
    PipelineState, PromptLibrary, PromptTemplate, Stage,
};
