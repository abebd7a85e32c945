use crate::domain::{PipelineState, Stage};

/// Receives progress from a running pipeline so it can be shown to the user.
///
/// Calls arrive in stage order. `stage_completed` is only invoked for stages
/// that succeeded; a failed stage gets `stage_failed` and nothing follows it.
pub trait StageObserver: Send + Sync {
    fn state_changed(&self, _state: PipelineState) {}

    fn stage_started(&self, _stage: Stage) {}

    fn stage_completed(&self, stage: Stage, output: &str);

    fn stage_failed(&self, _stage: Stage) {}
}

/// Observer that discards all events.
pub struct NoopObserver;

impl StageObserver for NoopObserver {
    fn stage_completed(&self, _stage: Stage, _output: &str) {}
}
