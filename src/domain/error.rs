use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("API key is required")]
    MissingCredential,

    #[error("Please enter a valid topic")]
    MissingTopic,

    #[error("Template '{template}' has no value for variable '{variable}'")]
    MissingVariable { template: String, variable: String },

    #[error("Upstream error: {0}")]
    UpstreamError(String),
}

impl DomainError {
    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::UpstreamError(msg.into())
    }

    pub fn missing_variable(template: impl Into<String>, variable: impl Into<String>) -> Self {
        Self::MissingVariable {
            template: template.into(),
            variable: variable.into(),
        }
    }

    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::UpstreamError(_))
    }

    /// Validation failures are raised before any network call is made.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::MissingCredential | Self::MissingTopic)
    }
}
