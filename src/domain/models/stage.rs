use serde::{Deserialize, Serialize};

/// One step of the generation pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Summarize,
    Expand,
    Assemble,
    Background,
}

impl Stage {
    /// The three text stages; the background stage is optional and runs after them.
    pub const TEXT_STAGES: [Stage; 3] = [Stage::Summarize, Stage::Expand, Stage::Assemble];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Summarize => "summarize",
            Stage::Expand => "expand",
            Stage::Assemble => "assemble",
            Stage::Background => "background",
        }
    }

    /// Heading shown above the stage's output.
    pub fn heading(&self) -> &'static str {
        match self {
            Stage::Summarize => "Step 1: Bullet Points",
            Stage::Expand => "Step 2: Expanded Paragraphs",
            Stage::Assemble => "Step 3: Final Blog Post",
            Stage::Background => "Background Image",
        }
    }

    /// Message shown while the stage is running.
    pub fn progress_message(&self) -> &'static str {
        match self {
            Stage::Summarize => "Generating bullet points...",
            Stage::Expand => "Expanding bullet points into paragraphs...",
            Stage::Assemble => "Generating the final blog post...",
            Stage::Background => "Generating background image...",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
