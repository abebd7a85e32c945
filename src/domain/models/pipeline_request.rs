use crate::domain::DomainError;

/// A validated submission: both fields are guaranteed non-blank.
///
/// The only way to obtain one is [`PipelineRequest::new`], so every stage
/// downstream of validation can rely on the invariant without re-checking.
#[derive(Clone, PartialEq, Eq)]
pub struct PipelineRequest {
    topic: String,
    credential: String,
}

impl PipelineRequest {
    /// Validate the raw inputs. The credential is checked before the topic.
    pub fn new(
        topic: impl Into<String>,
        credential: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let topic = topic.into();
        let credential = credential.into();

        if credential.trim().is_empty() {
            return Err(DomainError::MissingCredential);
        }
        if topic.trim().is_empty() {
            return Err(DomainError::MissingTopic);
        }

        Ok(Self { topic, credential })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn credential(&self) -> &str {
        &self.credential
    }
}

// Keep the secret out of logs and panic messages.
impl std::fmt::Debug for PipelineRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineRequest")
            .field("topic", &self.topic)
            .field("credential", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_non_blank_inputs() {
        let request = PipelineRequest::new("composting at home", "sk-test").unwrap();
        assert_eq!(request.topic(), "composting at home");
        assert_eq!(request.credential(), "sk-test");
    }

    #[test]
    fn rejects_blank_credentials() {
        for credential in ["", " ", "\t\n", "   \r\n "] {
            let err = PipelineRequest::new("topic", credential).unwrap_err();
            assert!(matches!(err, DomainError::MissingCredential), "{credential:?}");
            assert!(err.is_validation());
        }
    }

    #[test]
    fn rejects_blank_topics() {
        for topic in ["", "  ", "\n\t"] {
            let err = PipelineRequest::new(topic, "sk-test").unwrap_err();
            assert!(matches!(err, DomainError::MissingTopic), "{topic:?}");
        }
    }

    #[test]
    fn credential_is_checked_before_topic() {
        let err = PipelineRequest::new("", "").unwrap_err();
        assert!(matches!(err, DomainError::MissingCredential));
    }

    #[test]
    fn debug_output_redacts_credential() {
        let request = PipelineRequest::new("topic", "sk-secret").unwrap();
        let debug = format!("{request:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
