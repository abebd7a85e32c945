use serde::{Deserialize, Serialize};

/// Decorative background produced by the image stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundImage {
    url: String,
}

impl BackgroundImage {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Full-page background styling referencing the image URL verbatim.
    pub fn css(&self) -> String {
        format!(
            "body {{\n    background-image: url(\"{}\");\n    background-size: cover;\n    background-position: center;\n    background-attachment: fixed;\n}}",
            self.url
        )
    }
}

/// Everything a successful run produced, in stage order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    topic: String,
    bullets: String,
    expanded: String,
    post: String,
    background: Option<BackgroundImage>,
}

impl BlogPost {
    pub fn new(
        topic: impl Into<String>,
        bullets: impl Into<String>,
        expanded: impl Into<String>,
        post: impl Into<String>,
    ) -> Self {
        Self {
            topic: topic.into(),
            bullets: bullets.into(),
            expanded: expanded.into(),
            post: post.into(),
            background: None,
        }
    }

    pub fn with_background(mut self, background: BackgroundImage) -> Self {
        self.background = Some(background);
        self
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn bullets(&self) -> &str {
        &self.bullets
    }

    pub fn expanded(&self) -> &str {
        &self.expanded
    }

    pub fn post(&self) -> &str {
        &self.post
    }

    pub fn background(&self) -> Option<&BackgroundImage> {
        self.background.as_ref()
    }
}
