pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Connection settings shared by the chat and image clients.
///
/// The API key is deliberately absent: it is supplied per request.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenAiConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    /// `None` lets the image endpoint pick its default model.
    pub image_model: Option<String>,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            image_model: None,
        }
    }
}

impl OpenAiConfig {
    /// Read settings from the environment, falling back to defaults:
    ///
    /// | Variable             | Default                  |
    /// |----------------------|--------------------------|
    /// | `OPENAI_BASE_URL`    | `https://api.openai.com` |
    /// | `OPENAI_MODEL`       | `gpt-3.5-turbo`          |
    /// | `OPENAI_TEMPERATURE` | `0.7`                    |
    /// | `OPENAI_IMAGE_MODEL` | unset                    |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let temperature = match lookup("OPENAI_TEMPERATURE") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(
                    "Invalid OPENAI_TEMPERATURE '{}', using {}",
                    raw,
                    DEFAULT_TEMPERATURE
                );
                DEFAULT_TEMPERATURE
            }),
            None => defaults.temperature,
        };

        Self {
            base_url: lookup("OPENAI_BASE_URL").unwrap_or(defaults.base_url),
            model: lookup("OPENAI_MODEL").unwrap_or(defaults.model),
            temperature,
            image_model: lookup("OPENAI_IMAGE_MODEL").filter(|m| !m.trim().is_empty()),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Join `path` onto the base URL, tolerating a trailing slash.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}
