use async_trait::async_trait;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use tracing::debug;

use crate::application::ChatClient;
use crate::domain::DomainError;

/// Offline [`ChatClient`] for trying the pipeline without an API account.
///
/// Replies are derived from a hash of the prompt, so the same prompt always
/// yields the same text. The tail of the prompt is echoed back, which makes
/// the hand-off between stages visible in the output.
pub struct MockChatClient;

impl MockChatClient {
    pub fn new() -> Self {
        Self
    }

    fn prompt_hash(prompt: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        prompt.hash(&mut hasher);
        hasher.finish()
    }
}

impl Default for MockChatClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatClient for MockChatClient {
    async fn complete(&self, _credential: &str, prompt: &str) -> Result<String, DomainError> {
        let hash = Self::prompt_hash(prompt);
        let tail: Vec<&str> = prompt
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .rev()
            .take(3)
            .collect();

        debug!("Generated mock completion {:016x}", hash);

        let mut reply = format!("[mock {hash:016x}]");
        for line in tail.into_iter().rev() {
            reply.push_str("\n- ");
            reply.push_str(line);
        }
        Ok(reply)
    }
}
