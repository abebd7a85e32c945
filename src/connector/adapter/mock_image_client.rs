use async_trait::async_trait;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::application::ImageClient;
use crate::domain::{DomainError, ImageRequest};

/// Offline [`ImageClient`] returning a stable placeholder URL per prompt.
pub struct MockImageClient;

impl MockImageClient {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MockImageClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageClient for MockImageClient {
    async fn generate(
        &self,
        _credential: &str,
        request: &ImageRequest,
    ) -> Result<String, DomainError> {
        let mut hasher = DefaultHasher::new();
        request.prompt().hash(&mut hasher);
        Ok(format!(
            "https://placehold.co/{}/mock-{:016x}.png",
            request.size().as_str(),
            hasher.finish()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_image_url_is_stable() {
        let client = MockImageClient::new();
        let request = ImageRequest::new("bees");

        let a = client.generate("sk", &request).await.unwrap();
        let b = client.generate("sk", &request).await.unwrap();

        assert_eq!(a, b);
        assert!(a.starts_with("https://placehold.co/1024x1024/"));
    }
}
