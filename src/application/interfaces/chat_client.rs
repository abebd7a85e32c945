use async_trait::async_trait;

use crate::domain::DomainError;

/// Sends a rendered prompt to a chat-completion model and returns its reply.
///
/// The credential is passed on every call rather than held by the client, so
/// one client instance can serve independent submissions.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn complete(&self, credential: &str, prompt: &str) -> Result<String, DomainError>;
}
