use serde::{Deserialize, Serialize};

/// Square output resolutions accepted by the image endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ImageSize {
    #[serde(rename = "256x256")]
    S256,
    #[serde(rename = "512x512")]
    S512,
    #[default]
    #[serde(rename = "1024x1024")]
    S1024,
}

impl ImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::S256 => "256x256",
            ImageSize::S512 => "512x512",
            ImageSize::S1024 => "1024x1024",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRequest {
    prompt: String,
    count: u8,
    size: ImageSize,
}

impl ImageRequest {
    /// A request for a single 1024x1024 image.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            count: 1,
            size: ImageSize::S1024,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn count(&self) -> u8 {
        self.count
    }

    pub fn size(&self) -> ImageSize {
        self.size
    }
}
