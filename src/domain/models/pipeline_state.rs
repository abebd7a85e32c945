use serde::{Deserialize, Serialize};

use super::Stage;

/// Lifecycle of a single pipeline run.
///
/// ```text
/// Idle -> Validating -> Summarizing -> Expanding -> Assembling -> [ImageGenerating] -> Done
/// ```
///
/// Any non-terminal state may move to `Failed`. `Done` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    #[default]
    Idle,
    Validating,
    Summarizing,
    Expanding,
    Assembling,
    ImageGenerating,
    Done,
    Failed,
}

impl PipelineState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Failed)
    }

    /// The state a pipeline is in while `stage` runs.
    pub fn running(stage: Stage) -> Self {
        match stage {
            Stage::Summarize => PipelineState::Summarizing,
            Stage::Expand => PipelineState::Expanding,
            Stage::Assemble => PipelineState::Assembling,
            Stage::Background => PipelineState::ImageGenerating,
        }
    }

    /// Whether the machine allows moving from `self` to `next`.
    pub fn can_transition_to(&self, next: PipelineState) -> bool {
        use PipelineState::*;

        if self.is_terminal() {
            return false;
        }
        if next == Failed {
            return true;
        }

        matches!(
            (self, next),
            (Idle, Validating)
                | (Validating, Summarizing)
                | (Summarizing, Expanding)
                | (Expanding, Assembling)
                | (Assembling, ImageGenerating)
                | (Assembling, Done)
                | (ImageGenerating, Done)
        )
    }
}
