use async_trait::async_trait;

use crate::domain::{DomainError, ImageRequest};

/// Generates images from a text prompt.
#[async_trait]
pub trait ImageClient: Send + Sync {
    /// Returns the retrieval URL of the first generated image.
    async fn generate(
        &self,
        credential: &str,
        request: &ImageRequest,
    ) -> Result<String, DomainError>;
}
